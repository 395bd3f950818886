mod common;

use common::*;
use fibre_injector::{bind, class, Binding, Declaration, Error, Injector, Token};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Declaration Errors ---

#[test]
fn test_invalid_declaration_is_rejected() {
  let err = Injector::new(["blah"]).unwrap_err();

  assert_eq!(err.to_string(), "Invalid binding blah");
  assert!(matches!(err, Error::InvalidBinding(_)));
}

#[test]
fn test_builder_without_provider_is_rejected() {
  let err = Injector::new([bind("blah")]).unwrap_err();

  assert_eq!(err.to_string(), "Invalid binding blah");
}

#[test]
fn test_child_with_invalid_declaration_is_rejected() {
  let parent = Injector::new([class::<Engine>()]).unwrap();

  let err = parent
    .create_child(vec![
      Declaration::from(class::<Car>()),
      Declaration::from(bind(Token::of::<Dashboard>())),
    ])
    .unwrap_err();

  assert_eq!(err.to_string(), "Invalid binding Dashboard");
}

// --- Resolution Errors ---

#[test]
fn test_missing_provider_for_requested_token() {
  let injector = Injector::new(Vec::<Binding>::new()).unwrap();

  let err = injector.get(&Token::named("NonExisting")).unwrap_err();

  assert_eq!(err.to_string(), "No provider for NonExisting!");
}

#[test]
fn test_missing_provider_lists_the_dependency_path() {
  let injector = Injector::new([class::<CarWithDashboard>(), class::<Engine>()]).unwrap();

  let err = injector.get(&Token::of::<CarWithDashboard>()).unwrap_err();

  assert_eq!(
    err.to_string(),
    "No provider for Dashboard! (CarWithDashboard -> Dashboard)"
  );
  match err {
    Error::NoProvider { token, path } => {
      assert_eq!(token, Token::of::<Dashboard>());
      assert_eq!(path.len(), 2);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_missing_provider_path_spans_deep_chains_and_scopes() {
  let parent = Injector::new([bind("b").to_factory(["c"], |_| Ok(()))]).unwrap();
  let child = parent.create_child([bind("a").to_factory(["b"], |_| Ok(()))]).unwrap();

  let err = child.get(&Token::named("a")).unwrap_err();

  assert_eq!(err.to_string(), "No provider for c! (a -> b -> c)");
}

#[test]
fn test_injector_stays_usable_after_a_failure() {
  let injector = Injector::new([class::<CarWithDashboard>(), class::<Engine>()]).unwrap();

  assert!(injector.get(&Token::of::<CarWithDashboard>()).is_err());

  // Dependencies built before the failure stay cached; other tokens still resolve.
  assert!(injector.is_cached(&Token::of::<Engine>()));
  assert!(!injector.is_cached(&Token::of::<CarWithDashboard>()));
  assert!(injector.get_type::<Engine>().is_ok());
}

#[test]
fn test_provider_failure_propagates_unchanged_and_is_not_cached() {
  // Arrange: fails on the first call, succeeds afterwards.
  let attempts = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&attempts);
  let injector = Injector::new([
    bind("flaky").to_factory(Vec::<Token>::new(), move |_| {
      if counter.fetch_add(1, Ordering::SeqCst) == 0 {
        return Err(Error::provider("connection refused"));
      }
      Ok(String::from("connected"))
    }),
    bind("client").to_factory(["flaky"], |args| args.next::<String>().map(|s| s.len())),
  ])
  .unwrap();

  // Act
  let first = injector.get(&Token::named("client")).unwrap_err();
  let second = injector.get_as::<usize>(&Token::named("client")).unwrap();

  // Assert
  assert_eq!(first.to_string(), "connection refused");
  assert!(matches!(first, Error::Provider(_)));
  assert_eq!(*second, "connected".len());
  assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_type_mismatch_names_the_token() {
  let injector = Injector::new([bind("answer").to_value(42_u32)]).unwrap();

  let err = injector.get_as::<String>(&Token::named("answer")).unwrap_err();

  let message = err.to_string();
  assert!(message.starts_with("Instance for `answer` is not a `"));
  assert!(message.ends_with("String`"));
}

#[test]
fn test_provider_reading_too_many_arguments() {
  let injector = Injector::new([
    bind("one").to_value(1_u8),
    bind("greedy").to_factory(["one"], |args| {
      let _ = args.next::<u8>()?;
      args.next::<u8>()
    }),
  ])
  .unwrap();

  let err = injector.get(&Token::named("greedy")).unwrap_err();

  assert_eq!(
    err.to_string(),
    "Provider for `greedy` asked for argument 1 which was not supplied"
  );
}

// --- Cycles ---

#[test]
fn test_cyclic_dependency_is_reported_with_its_path() {
  let injector = Injector::new([
    bind("a").to_factory(["b"], |_| Ok(())),
    bind("b").to_factory(["a"], |_| Ok(())),
  ])
  .unwrap();

  let err = injector.get(&Token::named("a")).unwrap_err();

  assert_eq!(
    err.to_string(),
    "Cannot instantiate cyclic dependency! (a -> b -> a)"
  );
  assert!(!injector.is_cached(&Token::named("a")));
  assert!(!injector.is_cached(&Token::named("b")));
}

#[test]
fn test_self_dependency_is_a_cycle() {
  let injector = Injector::new([bind("a").to_factory(["a"], |_| Ok(()))]).unwrap();

  let err = injector.get(&Token::named("a")).unwrap_err();

  assert_eq!(err.to_string(), "Cannot instantiate cyclic dependency! (a -> a)");
}
