//! Error types returned by injector construction and resolution.

use crate::token::Token;
use std::fmt;
use thiserror::Error;

/// A boxed error raised by a provider while it builds an instance.
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the `fibre_injector` library.
#[derive(Debug, Error)]
pub enum Error {
  /// A declaration handed to an injector is neither a class nor a finished binding.
  #[error("Invalid binding {0}")]
  InvalidBinding(String),

  /// Neither the injector nor any ancestor can provide `token`.
  #[error("No provider for {token}!{}", .path.suffix())]
  NoProvider { token: Token, path: DependencyPath },

  /// A token was requested again while it was still being constructed.
  #[error("Cannot instantiate cyclic dependency!{}", .path.suffix())]
  CyclicDependency { path: DependencyPath },

  /// The instance bound to `token` does not have the requested type.
  #[error("Instance for `{token}` is not a `{expected}`")]
  TypeMismatch { token: Token, expected: &'static str },

  /// A provider read more positional arguments than its binding declares.
  #[error("Provider for `{consumer}` asked for argument {position} which was not supplied")]
  MissingArgument { consumer: Token, position: usize },

  /// A `Lazy` dependency outlived the injector that should resolve it.
  #[error("Injector was dropped before lazy dependency `{0}` was resolved")]
  InjectorDropped(Token),

  /// A provider failed; its error is reported unchanged.
  #[error(transparent)]
  Provider(#[from] DynError),
}

impl Error {
  /// Wraps an arbitrary provider failure.
  pub fn provider<E>(error: E) -> Self
  where
    E: Into<DynError>,
  {
    Error::Provider(error.into())
  }
}

/// A specialized `Result` type for `fibre_injector` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The chain of tokens that was being resolved when an error occurred,
/// from the originally requested token down to the failing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPath(Vec<Token>);

impl DependencyPath {
  pub(crate) fn new(tokens: Vec<Token>) -> Self {
    Self(tokens)
  }

  pub fn tokens(&self) -> &[Token] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// The ` (A -> B -> C)` tail of an error message. Empty when resolution was not nested.
  fn suffix(&self) -> String {
    if self.0.len() <= 1 {
      return String::new();
    }
    format!(" ({})", self)
  }
}

impl fmt::Display for DependencyPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, token) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(" -> ")?;
      }
      write!(f, "{}", token)?;
    }
    Ok(())
  }
}
