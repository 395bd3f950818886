//! Constructor descriptors for types the injector can build.
//!
//! Rust has no runtime reflection over constructor signatures, so a type that wants to be
//! bound as a class describes its own constructor by implementing [`Injectable`]: the
//! ordered list of parameters it takes, and how to build itself from their resolved values.
//! The [`injectable!`](crate::injectable) macro writes both halves for plain structs.

use crate::arguments::Arguments;
use crate::binding::Dependency;
use crate::error::Result;
use crate::token::Token;
use std::any::Any;

/// A type the injector can instantiate as a class provider.
pub trait Injectable: Any + Send + Sync + Sized {
  /// Declared constructor parameters, in positional order.
  fn parameters() -> Vec<Parameter> {
    Vec::new()
  }

  /// Builds an instance from the resolved parameters.
  fn construct(args: &mut Arguments) -> Result<Self>;
}

/// One declared constructor parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
  declared: Token,
  inject: Option<Token>,
  optional: bool,
  lazy: bool,
}

impl Parameter {
  /// A parameter whose declared type is `T`.
  pub fn of<T: ?Sized + 'static>() -> Self {
    Self::declared(Token::of::<T>())
  }

  pub fn declared(token: Token) -> Self {
    Self {
      declared: token,
      inject: None,
      optional: false,
      lazy: false,
    }
  }

  /// Overrides the token this parameter is resolved with.
  pub fn inject(mut self, token: impl Into<Token>) -> Self {
    self.inject = Some(token.into());
    self
  }

  /// The argument is absent, rather than an error, when nothing provides it.
  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  /// The argument is handed over unresolved, as a [`Lazy`](crate::Lazy).
  pub fn lazy(mut self) -> Self {
    self.lazy = true;
    self
  }

  pub fn declared_token(&self) -> &Token {
    &self.declared
  }

  pub fn inject_token(&self) -> Option<&Token> {
    self.inject.as_ref()
  }

  /// The token the injector resolves for this parameter: the override if there is one,
  /// otherwise the declared type.
  pub fn dependency_token(&self) -> &Token {
    self.inject.as_ref().unwrap_or(&self.declared)
  }

  pub fn to_dependency(&self) -> Dependency {
    Dependency::new(self.dependency_token().clone(), self.optional, self.lazy)
  }
}

/// The dependency list of a class binding for `T`.
pub fn dependencies_of<T: Injectable>() -> Vec<Dependency> {
  T::parameters().iter().map(Parameter::to_dependency).collect()
}
