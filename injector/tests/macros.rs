mod common;

use common::*;
use fibre_injector::{bind, class, dependencies_of, maybe_resolve, resolve, Injector, Token};
use std::sync::Arc;

fn garage() -> Injector {
  Injector::new([
    class::<Engine>(),
    class::<Car>(),
    bind("turbo").to_value(Engine { kind: "turbo" }),
    class::<CarWithInject>(),
  ])
  .unwrap()
}

// --- injectable! ---

#[test]
fn test_injectable_declares_field_types_as_dependencies() {
  let tokens: Vec<Token> = dependencies_of::<CarWithDashboard>()
    .iter()
    .map(|dependency| dependency.token().clone())
    .collect();

  assert_eq!(tokens, vec![Token::of::<Engine>(), Token::of::<Dashboard>()]);
}

#[test]
fn test_injectable_uses_the_override_token() {
  let dependencies = dependencies_of::<CarWithInject>();

  assert_eq!(dependencies.len(), 1);
  assert_eq!(*dependencies[0].token(), Token::named("turbo"));
  assert_eq!(garage().get_type::<CarWithInject>().unwrap().engine.kind, "turbo");
}

#[test]
fn test_injectable_without_fields_has_no_dependencies() {
  assert!(dependencies_of::<Dashboard>().is_empty());
}

// --- resolve! / maybe_resolve! ---

#[test]
fn test_resolve_by_type() {
  let injector = garage();

  let car = resolve!(injector, Car);

  assert!(Arc::ptr_eq(&car, &injector.get_type::<Car>().unwrap()));
}

#[test]
fn test_resolve_by_token() {
  let injector = garage();

  let engine = resolve!(injector, Engine, "turbo");

  assert_eq!(engine.kind, "turbo");
}

#[test]
#[should_panic(expected = "Failed to resolve required service: No provider for Dashboard!")]
fn test_resolve_panics_when_missing() {
  let injector = garage();
  let _ = resolve!(injector, Dashboard);
}

#[test]
fn test_maybe_resolve() {
  let injector = garage();

  assert!(maybe_resolve!(injector, Car).is_some());
  assert!(maybe_resolve!(injector, Engine, "turbo").is_some());
  assert!(maybe_resolve!(injector, Dashboard).is_none());
  // Wrong type for a bound token.
  assert!(maybe_resolve!(injector, String, "turbo").is_none());
}
