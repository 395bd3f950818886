//! The `Injector`: a scope of bindings, its instance cache and an optional parent.

use crate::arguments::{Argument, Arguments};
use crate::binding::{Binding, Declaration, Dependency};
use crate::core::{downcast, ConstructionGuard, Instance, Provider, ResolutionPath, Slot};
use crate::error::{Error, Result};
use crate::token::Token;
use dashmap::DashMap;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A hierarchical dependency injection container.
///
/// An injector is built once from a list of declarations and never changes its bindings
/// afterwards. Instances are created on first request and cached for the lifetime of the
/// injector, so every binding behaves as a singleton within its scope.
///
/// Lookups start in the injector's own bindings and fall back to its parent. A child
/// never copies its parent's bindings or cache; a binding declared in the child shadows
/// the parent's binding for the same token, for lookups that start at the child.
///
/// `Injector` is a cheap handle: clones refer to the same scope.
#[derive(Clone)]
pub struct Injector {
  scope: Arc<Scope>,
}

pub(crate) struct Scope {
  bindings: HashMap<Token, Binding>,
  cache: DashMap<Token, Slot>,
  parent: Option<Injector>,
}

impl Injector {
  /// Creates a root injector from `declarations`.
  ///
  /// Later declarations for the same token replace earlier ones. Fails with
  /// [`Error::InvalidBinding`] if a declaration is not a finished binding; no injector
  /// is produced in that case.
  pub fn new<I>(declarations: I) -> Result<Self>
  where
    I: IntoIterator,
    I::Item: Into<Declaration>,
  {
    Self::build(declarations, None)
  }

  /// Creates an injector from `declarations` whose lookups fall back to `parent`.
  pub fn with_parent<I>(declarations: I, parent: &Injector) -> Result<Self>
  where
    I: IntoIterator,
    I::Item: Into<Declaration>,
  {
    Self::build(declarations, Some(parent.clone()))
  }

  /// Creates a child of this injector. See [`Injector::with_parent`].
  pub fn create_child<I>(&self, declarations: I) -> Result<Self>
  where
    I: IntoIterator,
    I::Item: Into<Declaration>,
  {
    Self::with_parent(declarations, self)
  }

  pub(crate) fn from_scope(scope: Arc<Scope>) -> Self {
    Self { scope }
  }

  fn build<I>(declarations: I, parent: Option<Injector>) -> Result<Self>
  where
    I: IntoIterator,
    I::Item: Into<Declaration>,
  {
    let bindings = normalize(declarations)?;
    tracing::debug!(
      bindings = bindings.len(),
      has_parent = parent.is_some(),
      "Created injector"
    );

    Ok(Self {
      scope: Arc::new(Scope {
        bindings,
        cache: DashMap::new(),
        parent,
      }),
    })
  }

  // --- Resolution ---

  /// Returns the instance bound to `token`, constructing it on first request.
  ///
  /// The token is looked up in this injector first and then in its ancestors. An
  /// instance is cached by the injector that owns the binding, never by the injector
  /// `get` was called on.
  ///
  /// [`Token::injector()`] is answered with a fresh `Arc` handle to this injector on
  /// every call. Compare those results with [`Injector::ptr_eq`], not `Arc::ptr_eq`.
  pub fn get(&self, token: &Token) -> Result<Instance> {
    let mut path = ResolutionPath::default();
    self.resolve(token, &mut path).map_err(|err| {
      tracing::debug!(token = %token, error = %err, "Resolution failed");
      err
    })
  }

  /// Like [`get`](Injector::get), downcasting the instance to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, token: &Token) -> Result<Arc<T>> {
    downcast(token, self.get(token)?)
  }

  /// Shorthand for `get_as::<T>(&Token::of::<T>())`.
  pub fn get_type<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.get_as(&Token::of::<T>())
  }

  fn resolve(&self, token: &Token, path: &mut ResolutionPath) -> Result<Instance> {
    path.within(token, |path| self.resolve_in_scope(token, path))
  }

  /// Resolves a token already pushed on `path`, starting at this scope.
  fn resolve_in_scope(&self, token: &Token, path: &mut ResolutionPath) -> Result<Instance> {
    if token.is_injector() {
      return Ok(Arc::new(self.clone()));
    }

    if let Some(instance) = self.cached(token) {
      tracing::trace!(token = %token, "Cache hit");
      return Ok(instance);
    }

    if let Some(binding) = self.scope.bindings.get(token) {
      let slot = self.slot(token);
      if let Some(instance) = slot.get() {
        return Ok(instance.clone());
      }

      let _guard = ConstructionGuard::enter(self.scope_id(), token, path)?;
      // Another thread may finish first; `get_or_try_init` then returns its instance.
      return slot
        .get_or_try_init(|| self.instantiate(binding, path))
        .cloned();
    }

    match &self.scope.parent {
      Some(parent) => {
        tracing::trace!(token = %token, "Delegating to parent injector");
        parent.resolve_in_scope(token, path)
      }
      None => Err(Error::NoProvider {
        token: token.clone(),
        path: path.snapshot(),
      }),
    }
  }

  fn instantiate(&self, binding: &Binding, path: &mut ResolutionPath) -> Result<Instance> {
    let construct = match binding.provider() {
      Provider::Value(value) => return Ok(value.clone()),
      Provider::Class { construct, .. } | Provider::Factory(construct) => construct,
    };

    let mut values = Vec::with_capacity(binding.dependencies().len());
    for dependency in binding.dependencies() {
      values.push(self.argument_for(dependency, path)?);
    }

    tracing::debug!(token = %binding.token(), kind = ?binding.kind(), "Instantiating binding");
    construct(&mut Arguments::new(binding.token().clone(), values))
  }

  fn argument_for(&self, dependency: &Dependency, path: &mut ResolutionPath) -> Result<Argument> {
    let token = dependency.token();
    if dependency.is_lazy() {
      return Ok(Argument::deferred(token.clone(), Arc::downgrade(&self.scope)));
    }

    match self.resolve(token, path) {
      Ok(instance) => Ok(Argument::resolved(token.clone(), instance)),
      Err(Error::NoProvider { token: missing, .. })
        if dependency.is_optional() && missing == *token =>
      {
        Ok(Argument::absent(missing))
      }
      Err(err) => Err(err),
    }
  }

  fn cached(&self, token: &Token) -> Option<Instance> {
    self
      .scope
      .cache
      .get(token)
      .and_then(|slot| slot.value().get().cloned())
  }

  /// The cache slot for `token`. The map guard is released before returning.
  fn slot(&self, token: &Token) -> Slot {
    self
      .scope
      .cache
      .entry(token.clone())
      .or_default()
      .value()
      .clone()
  }

  fn scope_id(&self) -> usize {
    Arc::as_ptr(&self.scope) as usize
  }

  // --- Introspection ---

  pub fn parent(&self) -> Option<&Injector> {
    self.scope.parent.as_ref()
  }

  /// Whether `token` can be resolved from this injector: it is the self-injector token,
  /// or it is bound here or in an ancestor. Does not construct anything.
  pub fn contains(&self, token: &Token) -> bool {
    token.is_injector()
      || self.has_own_binding(token)
      || self.parent().map_or(false, |parent| parent.contains(token))
  }

  /// Whether this injector itself declares a binding for `token`.
  pub fn has_own_binding(&self, token: &Token) -> bool {
    self.scope.bindings.contains_key(token)
  }

  /// Whether this injector's own cache holds an instance for `token`.
  pub fn is_cached(&self, token: &Token) -> bool {
    self.cached(token).is_some()
  }

  /// Whether `a` and `b` are handles to the same injector.
  pub fn ptr_eq(a: &Injector, b: &Injector) -> bool {
    Arc::ptr_eq(&a.scope, &b.scope)
  }
}

impl fmt::Debug for Injector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut tokens: Vec<String> = self.scope.bindings.keys().map(Token::to_string).collect();
    tokens.sort();
    f.debug_struct("Injector")
      .field("bindings", &tokens)
      .field("cached", &self.scope.cache.iter().filter(|slot| slot.value().get().is_some()).count())
      .field("has_parent", &self.scope.parent.is_some())
      .finish()
  }
}

/// Indexes declarations by token. The last declaration for a token wins.
fn normalize<I>(declarations: I) -> Result<HashMap<Token, Binding>>
where
  I: IntoIterator,
  I::Item: Into<Declaration>,
{
  let mut bindings = HashMap::new();
  for declaration in declarations {
    match declaration.into() {
      Declaration::Bound(binding) => {
        bindings.insert(binding.token().clone(), binding);
      }
      Declaration::Unbound(token) => return Err(Error::InvalidBinding(token.to_string())),
      Declaration::Invalid(value) => return Err(Error::InvalidBinding(value)),
    }
  }
  Ok(bindings)
}
