//! Field-level parameter injection into constructed targets.

use std::borrow::Cow;
use tracing::{debug, warn};
use xrouter_api::{ParamMap, ParamSlot, ParamValue, RouteTarget};

/// Outcome of one injection pass, by receiver name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    pub applied: Vec<String>,
    /// Receivers with no parameter of that name.
    pub missing: Vec<String>,
    /// Receivers whose parameter had the wrong kind or failed to decode.
    pub mismatched: Vec<String>,
}

impl InjectionReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}

pub struct ParameterInjector;

impl ParameterInjector {
    /// Set every receiver of `target` from `params`.
    ///
    /// No coercion: a value of the wrong kind is skipped and logged, never an
    /// error. `Value` slots take any kind; `Decoded` slots decode through serde.
    pub fn apply(target: &mut dyn RouteTarget, params: &ParamMap) -> InjectionReport {
        let mut report = InjectionReport::default();

        for receiver in target.param_receivers() {
            let name = receiver.name.into_owned();
            let Some(value) = params.get(&name) else {
                report.missing.push(name);
                continue;
            };

            match assign(receiver.slot, value) {
                Ok(()) => {
                    debug!("Injected parameter {}", name);
                    report.applied.push(name);
                }
                Err(expected) => {
                    warn!(
                        "Skipping parameter {}: receiver expects {}, got {}",
                        name,
                        expected,
                        value.kind()
                    );
                    report.mismatched.push(name);
                }
            }
        }

        report
    }
}

fn assign(slot: ParamSlot<'_>, value: &ParamValue) -> Result<(), Cow<'static, str>> {
    match (slot, value) {
        (ParamSlot::Text(field), ParamValue::Text(v)) => field.clone_from(v),
        (ParamSlot::Integer(field), ParamValue::Integer(v)) => *field = *v,
        (ParamSlot::Boolean(field), ParamValue::Boolean(v)) => *field = *v,
        (ParamSlot::Value(field), v) => *field = v.to_json(),
        (ParamSlot::Decoded(field), v) => {
            if let Err(e) = field.decode(v) {
                return Err(Cow::Owned(format!("{} ({e})", field.expected())));
            }
        }
        (slot, _) => return Err(slot.describe()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{Value, json};
    use xrouter_api::ParamReceiver;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Coupon {
        code: String,
        percent: u8,
    }

    #[derive(Default)]
    struct Checkout {
        note: String,
        amount: i64,
        express: bool,
        raw: Value,
        coupon: Option<Coupon>,
    }

    impl RouteTarget for Checkout {
        fn param_receivers(&mut self) -> Vec<ParamReceiver<'_>> {
            vec![
                ParamReceiver::new("note", &mut self.note),
                ParamReceiver::new("total", &mut self.amount),
                ParamReceiver::new("express", &mut self.express),
                ParamReceiver::new("raw", &mut self.raw),
                ParamReceiver::new("coupon", ParamSlot::decoded(&mut self.coupon)),
            ]
        }
    }

    #[test]
    fn test_apply_by_name_and_alias() {
        let mut params = ParamMap::new();
        params.insert("note".into(), "gift".into());
        params.insert("total".into(), 1200.into());
        params.insert("express".into(), true.into());
        params.insert("raw".into(), 7.into());
        params.insert("coupon".into(), json!({"code": "SPRING", "percent": 10}).into());

        let mut target = Checkout::default();
        let report = ParameterInjector::apply(&mut target, &params);

        assert!(report.is_complete());
        assert_eq!(report.applied.len(), 5);
        assert_eq!(target.note, "gift");
        assert_eq!(target.amount, 1200);
        assert!(target.express);
        assert_eq!(target.raw, json!(7));
        assert_eq!(
            target.coupon,
            Some(Coupon {
                code: "SPRING".into(),
                percent: 10
            })
        );
    }

    #[test]
    fn test_no_coercion() {
        let mut params = ParamMap::new();
        params.insert("note".into(), 5.into());
        params.insert("total".into(), "1200".into());
        params.insert("coupon".into(), json!({"code": 1}).into());

        let mut target = Checkout {
            note: "unchanged".into(),
            ..Default::default()
        };
        let report = ParameterInjector::apply(&mut target, &params);

        assert_eq!(report.mismatched, vec!["note", "total", "coupon"]);
        assert_eq!(report.missing, vec!["express", "raw"]);
        assert!(report.applied.is_empty());
        assert_eq!(target.note, "unchanged");
        assert_eq!(target.amount, 0);
        assert!(target.coupon.is_none());
    }

    #[test]
    fn test_target_without_receivers() {
        #[derive(Default)]
        struct Plain;
        impl RouteTarget for Plain {}

        let mut params = ParamMap::new();
        params.insert("anything".into(), true.into());
        let report = ParameterInjector::apply(&mut Plain, &params);
        assert_eq!(report, InjectionReport::default());
    }
}
