//! Deferred dependencies.

use crate::core::{downcast, Instance};
use crate::error::{Error, Result};
use crate::injector::{Injector, Scope};
use crate::token::Token;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// A dependency that is resolved on first use instead of while its dependent is built.
///
/// The token is resolved from the scope that declared the dependency, and the result is
/// memoized. A `Lazy` only holds a weak reference to that scope: using it after the
/// injector has been dropped fails with [`Error::InjectorDropped`].
///
/// Lazy dependencies are the way to express a dependency cycle: `A` can take a
/// `Lazy<B>` while `B` takes `A` directly.
pub struct Lazy<T> {
  source: Option<(Token, Weak<Scope>)>,
  cell: OnceCell<Arc<T>>,
}

impl<T: Any + Send + Sync> Lazy<T> {
  pub(crate) fn new(token: Token, scope: Weak<Scope>) -> Self {
    Self {
      source: Some((token, scope)),
      cell: OnceCell::new(),
    }
  }

  pub(crate) fn ready(value: Arc<T>) -> Self {
    Self {
      source: None,
      cell: OnceCell::with_value(value),
    }
  }

  /// Resolves the dependency, or returns the memoized instance.
  ///
  /// A failed resolution is not memoized; the next call tries again.
  pub fn get(&self) -> Result<Arc<T>> {
    self
      .cell
      .get_or_try_init(|| match &self.source {
        Some((token, scope)) => downcast(token, resolve_deferred(token, scope)?),
        None => unreachable!("a ready Lazy is always initialized"),
      })
      .cloned()
  }

  /// Whether the dependency has been resolved already.
  pub fn is_resolved(&self) -> bool {
    self.cell.get().is_some()
  }
}

impl<T: Any + Send + Sync + fmt::Debug> fmt::Debug for Lazy<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.cell.get() {
      Some(value) => f.debug_tuple("Lazy").field(value).finish(),
      None => f.debug_tuple("Lazy").field(&"<unresolved>").finish(),
    }
  }
}

pub(crate) fn resolve_deferred(token: &Token, scope: &Weak<Scope>) -> Result<Instance> {
  let scope = scope
    .upgrade()
    .ok_or_else(|| Error::InjectorDropped(token.clone()))?;
  Injector::from_scope(scope).get(token)
}
