//! Public macros for declaring injectable types and resolving services.

/// Implements [`Injectable`](crate::Injectable) for a struct whose fields are `Arc`s of
/// its dependencies.
///
/// Each field is listed with the type it holds. The field's parameter token is that
/// type, unless an override token follows `=>`.
///
/// # Examples
///
/// ```
/// use fibre_injector::{bind, class, injectable, Injector};
/// use std::sync::Arc;
///
/// struct Engine;
/// injectable!(Engine {});
///
/// struct Car {
///   engine: Arc<Engine>,
///   plate: Arc<String>,
/// }
/// injectable!(Car { engine: Engine, plate: String => "plate" });
///
/// let injector = Injector::new([
///   class::<Engine>(),
///   class::<Car>(),
///   bind("plate").to_value(String::from("B-IO 42")),
/// ])
/// .unwrap();
///
/// let car = injector.get_type::<Car>().unwrap();
/// assert_eq!(*car.plate, "B-IO 42");
/// ```
#[macro_export]
macro_rules! injectable {
  ($name:ident { $($field:ident : $ty:ty $(=> $inject:expr)?),* $(,)? }) => {
    impl $crate::Injectable for $name {
      fn parameters() -> ::std::vec::Vec<$crate::Parameter> {
        ::std::vec![$($crate::Parameter::of::<$ty>()$(.inject($inject))?),*]
      }

      #[allow(unused_variables)]
      fn construct(args: &mut $crate::Arguments) -> $crate::Result<Self> {
        ::std::result::Result::Ok($name {
          $($field: args.next::<$ty>()?,)*
        })
      }
    }
  };
}

/// Resolves a service from an injector, panicking if it cannot be resolved.
///
/// # Panics
///
/// Panics with the resolution error if the service is missing, fails to construct,
/// or has a different type. For a non-panicking version, use [`maybe_resolve!`] or
/// `Injector::get_as` directly.
///
/// # Examples
///
/// ```
/// use fibre_injector::{bind, resolve, Injector};
///
/// let injector = Injector::new([bind("greeting").to_value(String::from("hello"))]).unwrap();
///
/// let message = resolve!(injector, String, "greeting");
/// assert_eq!(*message, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for resolving by type: resolve!(injector, MyService)
  ($injector:expr, $type:ty) => {
    $crate::resolve!($injector, $type, $crate::Token::of::<$type>())
  };

  // Arm for resolving a token: resolve!(injector, MyService, "name")
  ($injector:expr, $type:ty, $token:expr) => {
    match $injector.get_as::<$type>(&$crate::Token::from($token)) {
      ::std::result::Result::Ok(service) => service,
      ::std::result::Result::Err(err) => {
        panic!("Failed to resolve required service: {}", err)
      }
    }
  };
}

/// Resolves a service from an injector, returning `None` on any resolution error.
#[macro_export]
macro_rules! maybe_resolve {
  ($injector:expr, $type:ty) => {
    $crate::maybe_resolve!($injector, $type, $crate::Token::of::<$type>())
  };

  ($injector:expr, $type:ty, $token:expr) => {
    $injector
      .get_as::<$type>(&$crate::Token::from($token))
      .ok()
  };
}
