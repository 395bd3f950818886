//! Bindings, declarations and the fluent binding builder.

use crate::arguments::Arguments;
use crate::core::{Instance, Provider};
use crate::error::Result;
use crate::introspect::{dependencies_of, Injectable};
use crate::token::{Token, TypeKey};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The three ways a binding can produce its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
  /// Construct a type from its resolved constructor parameters.
  Class,
  /// Hand out a ready-made value.
  Value,
  /// Call a function with the resolved dependencies.
  Factory,
}

/// One positional dependency of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
  token: Token,
  optional: bool,
  lazy: bool,
}

impl Dependency {
  pub(crate) fn new(token: Token, optional: bool, lazy: bool) -> Self {
    Self {
      token,
      optional,
      lazy,
    }
  }

  /// A required dependency, resolved before the provider runs.
  pub fn required(token: impl Into<Token>) -> Self {
    Self::new(token.into(), false, false)
  }

  /// Resolved before the provider runs, but absent instead of failing when nothing
  /// in the injector chain provides it.
  pub fn optional(token: impl Into<Token>) -> Self {
    Self::new(token.into(), true, false)
  }

  /// Handed to the provider as a [`Lazy`](crate::Lazy), resolved on first use.
  pub fn lazy(token: impl Into<Token>) -> Self {
    Self::new(token.into(), false, true)
  }

  pub fn token(&self) -> &Token {
    &self.token
  }

  pub fn is_optional(&self) -> bool {
    self.optional
  }

  pub fn is_lazy(&self) -> bool {
    self.lazy
  }
}

impl From<Token> for Dependency {
  fn from(token: Token) -> Self {
    Dependency::required(token)
  }
}

impl From<&'static str> for Dependency {
  fn from(name: &'static str) -> Self {
    Dependency::required(name)
  }
}

/// An immutable declaration of how to produce the instance for a token.
#[derive(Clone)]
pub struct Binding {
  token: Token,
  provider: Provider,
  dependencies: Vec<Dependency>,
}

impl Binding {
  pub fn token(&self) -> &Token {
    &self.token
  }

  pub fn kind(&self) -> BindingKind {
    match self.provider {
      Provider::Class { .. } => BindingKind::Class,
      Provider::Value(_) => BindingKind::Value,
      Provider::Factory(_) => BindingKind::Factory,
    }
  }

  pub fn dependencies(&self) -> &[Dependency] {
    &self.dependencies
  }

  pub(crate) fn provider(&self) -> &Provider {
    &self.provider
  }

  fn class<C: Injectable>(token: Token) -> Self {
    Binding {
      token,
      provider: Provider::Class {
        class: TypeKey::of::<C>(),
        construct: Arc::new(|args: &mut Arguments| -> Result<Instance> {
          Ok(Arc::new(C::construct(args)?))
        }),
      },
      dependencies: dependencies_of::<C>(),
    }
  }
}

impl fmt::Debug for Binding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("Binding");
    s.field("token", &self.token).field("kind", &self.kind());
    if let Provider::Class { class, .. } = &self.provider {
      s.field("class", class);
    }
    s.field("dependencies", &self.dependencies).finish()
  }
}

/// Binds type `C` to itself as a class provider.
pub fn class<C: Injectable>() -> Binding {
  Binding::class::<C>(Token::of::<C>())
}

/// Starts a binding for `token`.
pub fn bind(token: impl Into<Token>) -> BindingBuilder {
  BindingBuilder {
    token: token.into(),
  }
}

/// Turns a bare token into a [`Binding`] of a chosen kind. Performs no resolution.
#[derive(Debug, Clone)]
pub struct BindingBuilder {
  token: Token,
}

impl BindingBuilder {
  pub fn token(&self) -> &Token {
    &self.token
  }

  /// Instantiate `C`, with dependencies taken from its constructor parameters.
  pub fn to_class<C: Injectable>(self) -> Binding {
    Binding::class::<C>(self.token)
  }

  /// Hand out `value` itself; the same shared instance on every request.
  pub fn to_value<T: Any + Send + Sync>(self, value: T) -> Binding {
    Binding {
      token: self.token,
      provider: Provider::Value(Arc::new(value)),
      dependencies: Vec::new(),
    }
  }

  /// Call `factory` with the resolved `dependencies` as positional arguments.
  pub fn to_factory<T, D, F>(self, dependencies: D, factory: F) -> Binding
  where
    T: Any + Send + Sync,
    D: IntoIterator,
    D::Item: Into<Dependency>,
    F: Fn(&mut Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Binding {
      token: self.token,
      provider: Provider::Factory(Arc::new(move |args: &mut Arguments| -> Result<Instance> {
        Ok(Arc::new(factory(args)?))
      })),
      dependencies: dependencies.into_iter().map(Into::into).collect(),
    }
  }
}

/// An entry of the declaration list an injector is built from.
#[derive(Debug, Clone)]
pub enum Declaration {
  /// A finished binding: a builder result or a bare class.
  Bound(Binding),
  /// A builder on which no provider kind was selected.
  Unbound(Token),
  /// A value that is not a declaration at all.
  Invalid(String),
}

impl From<Binding> for Declaration {
  fn from(binding: Binding) -> Self {
    Declaration::Bound(binding)
  }
}

impl From<BindingBuilder> for Declaration {
  fn from(builder: BindingBuilder) -> Self {
    Declaration::Unbound(builder.token)
  }
}

impl From<&str> for Declaration {
  fn from(value: &str) -> Self {
    Declaration::Invalid(value.to_owned())
  }
}

impl From<String> for Declaration {
  fn from(value: String) -> Self {
    Declaration::Invalid(value)
  }
}
