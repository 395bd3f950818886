use fibre_injector::{bind, class, injectable, resolve, Injector, Token};
use std::panic;
use std::sync::Arc;

struct Engine;
injectable!(Engine {});

struct Dashboard;
injectable!(Dashboard {});

struct Car {
  _engine: Arc<Engine>,
  _dashboard: Arc<Dashboard>,
}
injectable!(Car {
  _engine: Engine,
  _dashboard: Dashboard,
});

fn main() {
  // `Dashboard` is never bound.
  let injector = Injector::new([class::<Engine>(), class::<Car>()]).unwrap();

  // --- Using the fallible `get()` method ---
  println!("Resolving a car whose dashboard was never bound...");
  match injector.get(&Token::of::<Car>()) {
    Ok(_) => panic!("Should not have built the car!"),
    Err(err) => println!("Error: {}", err),
  }

  match injector.get(&Token::named("NonExisting")) {
    Ok(_) => panic!("Should not have found the token!"),
    Err(err) => println!("Error: {}", err),
  }

  // --- Invalid declarations are rejected up front ---
  match Injector::new([bind("blah")]) {
    Ok(_) => panic!("A builder without a provider is not a binding!"),
    Err(err) => println!("Error: {}", err),
  }

  // --- Using the panicking `resolve!` macro ---
  println!("\nNow, attempting to resolve with resolve!...");
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _car = resolve!(injector, Car);
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}
