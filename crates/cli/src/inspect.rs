use crate::print_diagnostics;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};
use xrouter::{route_table_name, service_provider_name};
use xrouter_compiler::{CompileOutput, RegistryCompiler};

#[derive(Tabled)]
pub struct RouteRow {
    #[tabled(rename = "Module")]
    pub module: String,
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Provider")]
    pub provider: String,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Target")]
    pub target: String,
}

#[derive(Tabled)]
pub struct ServiceRow {
    #[tabled(rename = "Module")]
    pub module: String,
    #[tabled(rename = "Provider")]
    pub provider: String,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Published As")]
    pub published: String,
    #[tabled(rename = "Constructors")]
    pub constructors: String,
}

pub fn route_rows(output: &CompileOutput) -> Vec<RouteRow> {
    let mut rows = Vec::new();
    for module in &output.modules {
        for (group, routes) in &module.groups {
            for route in routes.values() {
                let target = match &route.factory {
                    Some(factory) => format!("{} via {}", route.target, factory),
                    None => route.target.clone(),
                };
                rows.push(RouteRow {
                    module: module.module.clone(),
                    group: group.clone(),
                    provider: route_table_name(&module.module, group),
                    path: route.path.clone(),
                    target,
                });
            }
        }
    }
    rows
}

pub fn service_rows(output: &CompileOutput) -> Vec<ServiceRow> {
    let mut rows = Vec::new();
    for module in &output.modules {
        for service in module.services.values() {
            let constructors = service
                .constructors
                .iter()
                .map(|ctor| {
                    let kinds: Vec<&str> = ctor.signature.iter().map(|k| k.as_str()).collect();
                    format!("({})", kinds.join(", "))
                })
                .collect::<Vec<_>>()
                .join(" ");
            rows.push(ServiceRow {
                module: module.module.clone(),
                provider: service_provider_name(&module.module),
                path: service.path.clone(),
                published: format!("Arc<{}>", service.published_type()),
                constructors,
            });
        }
    }
    rows
}

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let output = RegistryCompiler::default().compile_dir(path)?;

    let routes = route_rows(&output);
    let services = service_rows(&output);

    if routes.is_empty() {
        println!("No routes declared.");
    } else {
        println!("{}", Table::new(&routes).with(Style::psql()));
    }
    if !services.is_empty() {
        println!();
        println!("{}", Table::new(&services).with(Style::psql()));
    }

    print_diagnostics(&output.report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_rows_are_sorted_by_module_group_path() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("xrouter.json"),
            r#"{"module": "order", "routes": [
                {"path": "/pay/home", "group": "pay", "target": "crate::PayHome"},
                {"path": "/order/detail", "target": "crate::OrderDetail", "factory": "crate::OrderDetail::create"}
            ], "services": [
                {"path": "/order/api", "target": "crate::OrderApi", "interface": "dyn crate::Api",
                 "constructors": [{"signature": []}, {"signature": ["text", "integer"], "function": "crate::OrderApi::new"}]}
            ]}"#,
        )
        .unwrap();

        let output = RegistryCompiler::default().compile_dir(dir.path()).unwrap();

        let routes = route_rows(&output);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].provider, "order$RouteTable_order");
        assert_eq!(routes[0].target, "crate::OrderDetail via crate::OrderDetail::create");
        assert_eq!(routes[1].group, "pay");

        let services = service_rows(&output);
        assert_eq!(services[0].provider, "Service_order$RouterService");
        assert_eq!(services[0].published, "Arc<dyn crate::Api>");
        assert_eq!(services[0].constructors, "() (text, integer)");
    }
}
