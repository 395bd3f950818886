//! # Fibre Injector
//!
//! A hierarchical, thread-safe dependency injection container for Rust.
//!
//! An [`Injector`] is built from a list of bindings that say how to produce an instance
//! for a [`Token`]. Resolving a token builds its whole object graph: dependencies are
//! resolved first, in declared order, and every instance is cached as a singleton of the
//! injector that owns its binding.
//!
//! ## Core Concepts
//!
//! - **Token**: a Rust type (`Token::of::<T>()`) or a string (`Token::named("db.url")`).
//! - **Binding**: a class, value or factory provider for a token, plus its dependencies.
//!   Built with [`class`] or [`bind`].
//! - **Injectable**: the constructor descriptor a type supplies to be bound as a class.
//!   The [`injectable!`] macro derives it for plain structs.
//! - **Child injectors**: [`Injector::create_child`] makes a scope whose bindings shadow
//!   the parent's and whose cache is its own.
//! - **Self injection**: every injector resolves [`Token::injector()`] to itself.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_injector::{bind, class, injectable, Injector, Token};
//! use std::sync::Arc;
//!
//! struct Engine;
//! injectable!(Engine {});
//!
//! struct Car {
//!   engine: Arc<Engine>,
//! }
//! injectable!(Car { engine: Engine });
//!
//! fn main() -> fibre_injector::Result<()> {
//!   let parent = Injector::new([class::<Engine>(), class::<Car>()])?;
//!
//!   // Singletons per scope.
//!   let car = parent.get_type::<Car>()?;
//!   assert!(Arc::ptr_eq(&car, &parent.get_type::<Car>()?));
//!
//!   // A child that overrides `Car` builds its own, but shares the parent's `Engine`.
//!   let child = parent.create_child([bind(Token::of::<Car>()).to_class::<Car>()])?;
//!   let child_car = child.get_type::<Car>()?;
//!   assert!(!Arc::ptr_eq(&car, &child_car));
//!   assert!(Arc::ptr_eq(&car.engine, &child_car.engine));
//!   Ok(())
//! }
//! ```

mod arguments;
mod binding;
mod core;
mod error;
mod injector;
mod introspect;
mod lazy;
mod macros;
mod token;

pub use arguments::Arguments;
pub use binding::{bind, class, Binding, BindingBuilder, BindingKind, Declaration, Dependency};
pub use crate::core::Instance;
pub use error::{DependencyPath, DynError, Error, Result};
pub use injector::Injector;
pub use introspect::{dependencies_of, Injectable, Parameter};
pub use lazy::Lazy;
pub use token::{Token, TypeKey};
