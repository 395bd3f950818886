//! Core, non-public data structures for the injector.

use crate::arguments::Arguments;
use crate::error::{DependencyPath, Error, Result};
use crate::token::{Token, TypeKey};
use once_cell::sync::OnceCell;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

thread_local! {
  // The (scope, token) pairs whose cache slot this thread is currently filling.
  // Re-entering one through a fresh `get`, e.g. a `Lazy` forced inside a constructor,
  // must fail instead of blocking on the cell.
  static CONSTRUCTING: RefCell<HashSet<(usize, Token)>> = RefCell::new(HashSet::new());
}

/// A resolved, shared instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type ConstructFn = Arc<dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync>;

/// How a binding produces its instance.
#[derive(Clone)]
pub(crate) enum Provider {
  Class { class: TypeKey, construct: ConstructFn },
  Value(Instance),
  Factory(ConstructFn),
}

/// A cache slot of one scope. The cell stays empty until construction succeeds.
pub(crate) type Slot = Arc<OnceCell<Instance>>;

/// Downcasts a resolved instance to its concrete type.
pub(crate) fn downcast<T: Any + Send + Sync>(token: &Token, instance: Instance) -> Result<Arc<T>> {
  instance.downcast::<T>().map_err(|_| Error::TypeMismatch {
    token: token.clone(),
    expected: type_name::<T>(),
  })
}

/// An RAII guard marking a cache slot as under construction on this thread.
///
/// Entering a slot that is already marked fails with `CyclicDependency`.
/// The mark is removed when the guard is dropped.
pub(crate) struct ConstructionGuard {
  key: (usize, Token),
}

impl ConstructionGuard {
  pub(crate) fn enter(scope_id: usize, token: &Token, path: &ResolutionPath) -> Result<Self> {
    let key = (scope_id, token.clone());
    let fresh = CONSTRUCTING.with(|marks| marks.borrow_mut().insert(key.clone()));
    if !fresh {
      let mut cycle = path.tokens.clone();
      if cycle.last() != Some(token) {
        cycle.push(token.clone());
      }
      return Err(Error::CyclicDependency {
        path: DependencyPath::new(cycle),
      });
    }
    Ok(Self { key })
  }
}

impl Drop for ConstructionGuard {
  fn drop(&mut self) {
    CONSTRUCTING.with(|marks| {
      marks.borrow_mut().remove(&self.key);
    });
  }
}

/// The tokens currently being resolved by one `get` call, outermost first.
/// Delegation to a parent scope does not push the token again.
///
/// The path only names the chain for error messages. The same token may appear twice
/// when each occurrence is bound in a different scope; cycles are detected by
/// [`ConstructionGuard`], which knows the owning scope.
#[derive(Default)]
pub(crate) struct ResolutionPath {
  tokens: Vec<Token>,
}

impl ResolutionPath {
  /// Runs `f` with `token` pushed on the path.
  pub(crate) fn within<R>(&mut self, token: &Token, f: impl FnOnce(&mut Self) -> R) -> R {
    self.tokens.push(token.clone());
    let result = f(self);
    self.tokens.pop();
    result
  }

  pub(crate) fn snapshot(&self) -> DependencyPath {
    DependencyPath::new(self.tokens.clone())
  }
}
