#![allow(dead_code)]

//! Targets and services referenced by the checked-in generated providers
//! under `tests/fixtures/generated`, plus small test collaborators.
//!
//! Test crates pull this in with `mod common; use common::*;` so the
//! generated `crate::OrderDetail`-style paths resolve.

use serde::Deserialize;
use std::cell::Cell;
use std::sync::{Arc, Mutex};
use xrouter_api::{
    BoxError, LaunchExtras, Launcher, ParamReceiver, ParamSlot, ParamValue, ProviderCatalog,
    RouteTarget, TargetDescriptor,
};

pub mod order_router {
    include!("../fixtures/generated/order_router.rs");
}

pub mod user_router {
    include!("../fixtures/generated/user_router.rs");
}

thread_local! {
    static ORDER_ROUTE_BUILDS: Cell<usize> = const { Cell::new(0) };
}

/// Times `OrderServiceImpl::create` ran on the current thread.
pub fn order_route_builds() -> usize {
    ORDER_ROUTE_BUILDS.with(Cell::get)
}

pub trait OrderService: Send + Sync {
    fn owner(&self) -> String;
}

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Default)]
pub struct OrderDetail {
    pub id: i64,
}

impl RouteTarget for OrderDetail {
    fn param_receivers(&mut self) -> Vec<ParamReceiver<'_>> {
        vec![ParamReceiver::new("id", &mut self.id)]
    }
}

#[derive(Default)]
pub struct OrderServiceImpl {
    pub owner: String,
}

impl OrderServiceImpl {
    pub fn create() -> Result<Self, BoxError> {
        ORDER_ROUTE_BUILDS.with(|builds| builds.set(builds.get() + 1));
        Ok(Self {
            owner: "router".into(),
        })
    }

    pub fn with_name(args: &[ParamValue]) -> Result<Self, BoxError> {
        let owner = args
            .first()
            .and_then(ParamValue::as_text)
            .ok_or("owner name required")?;
        if owner.is_empty() {
            return Err("owner name must not be empty".into());
        }
        Ok(Self {
            owner: owner.to_string(),
        })
    }
}

impl RouteTarget for OrderServiceImpl {}

impl OrderService for OrderServiceImpl {
    fn owner(&self) -> String {
        if self.owner.is_empty() {
            "anonymous".to_string()
        } else {
            self.owner.clone()
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Coupon {
    pub code: String,
    pub percent: i64,
}

#[derive(Default)]
pub struct PayHome {
    pub amount: i64,
    pub note: String,
    pub express: bool,
    pub coupon: Option<Coupon>,
}

impl RouteTarget for PayHome {
    fn param_receivers(&mut self) -> Vec<ParamReceiver<'_>> {
        vec![
            ParamReceiver::new("amount", &mut self.amount),
            ParamReceiver::new("note", &mut self.note),
            ParamReceiver::new("express", &mut self.express),
            ParamReceiver::new("coupon", ParamSlot::decoded(&mut self.coupon)),
        ]
    }
}

#[derive(Default)]
pub struct UserHome {
    pub user: String,
}

impl RouteTarget for UserHome {
    fn param_receivers(&mut self) -> Vec<ParamReceiver<'_>> {
        vec![ParamReceiver::new("user", &mut self.user)]
    }
}

#[derive(Default)]
pub struct UserSettings;

impl RouteTarget for UserSettings {}

#[derive(Default)]
pub struct OrderGreeter;

impl Greeter for OrderGreeter {
    fn greet(&self) -> String {
        "hello from order".into()
    }
}

#[derive(Default)]
pub struct UserGreeter;

impl Greeter for UserGreeter {
    fn greet(&self) -> String {
        "hello from user".into()
    }
}

/// A page registered at run time to shadow generated routes.
#[derive(Default)]
pub struct Maintenance;

impl RouteTarget for Maintenance {}

pub fn maintenance() -> TargetDescriptor {
    TargetDescriptor::of::<Maintenance>("ops")
}

/// Catalog with both generated modules, order first.
pub fn catalog() -> ProviderCatalog {
    ProviderCatalog::from_registrars(&[order_router::register, user_router::register])
}

/// Catalog with both generated modules, user first.
pub fn catalog_user_first() -> ProviderCatalog {
    ProviderCatalog::from_registrars(&[user_router::register, order_router::register])
}

/// Launcher that records what it was asked to start.
#[derive(Default)]
pub struct RecordingLauncher {
    started: Mutex<Vec<(String, LaunchExtras)>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            started: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn started(&self) -> Vec<(String, LaunchExtras)> {
        self.started.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn start(&self, descriptor: &TargetDescriptor, extras: &LaunchExtras) -> Result<(), BoxError> {
        if self.fail {
            return Err("display unavailable".into());
        }
        self.started
            .lock()
            .unwrap()
            .push((descriptor.type_name().to_string(), extras.clone()));
        Ok(())
    }
}

pub fn recording() -> Arc<RecordingLauncher> {
    Arc::new(RecordingLauncher::default())
}
