//! Shared fixtures for the integration tests: a small car factory.
#![allow(dead_code)]

use fibre_injector::{injectable, Arguments, Injectable, Parameter, Result};
use std::sync::Arc;

pub struct Engine {
  pub kind: &'static str,
}

impl Injectable for Engine {
  fn construct(_: &mut Arguments) -> Result<Self> {
    Ok(Engine { kind: "standard" })
  }
}

pub struct Dashboard;
injectable!(Dashboard {});

pub struct Car {
  pub engine: Arc<Engine>,
}
injectable!(Car { engine: Engine });

// Bound under the `Car` token to stand in for a specialised car.
pub struct SportsCar {
  pub engine: Arc<Engine>,
}
injectable!(SportsCar { engine: Engine });

pub struct CarWithDashboard {
  pub engine: Arc<Engine>,
  pub dashboard: Arc<Dashboard>,
}
injectable!(CarWithDashboard {
  engine: Engine,
  dashboard: Dashboard,
});

// Declares an `Engine` parameter but asks for the "turbo" token instead.
pub struct CarWithInject {
  pub engine: Arc<Engine>,
}
injectable!(CarWithInject { engine: Engine => "turbo" });

// Optional radio, lazily resolved navigation.
pub struct LuxuryCar {
  pub engine: Arc<Engine>,
  pub radio: Option<Arc<String>>,
  pub navigation: fibre_injector::Lazy<String>,
}

impl Injectable for LuxuryCar {
  fn parameters() -> Vec<Parameter> {
    vec![
      Parameter::of::<Engine>(),
      Parameter::of::<String>().inject("radio").optional(),
      Parameter::of::<String>().inject("navigation").lazy(),
    ]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(LuxuryCar {
      engine: args.next()?,
      radio: args.next_optional()?,
      navigation: args.next_lazy()?,
    })
  }
}
