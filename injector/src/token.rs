//! Tokens: the keys bindings are registered and looked up under.

use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type used as a token.
///
/// Equality and hashing only look at the `TypeId`; the type name is kept for display.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + 'static>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  /// The fully qualified type name, as reported by `std::any::type_name`.
  pub fn full_name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

/// An identity used to register and request a dependency.
///
/// Either a Rust type or an arbitrary string. Two tokens are the same when they name
/// the same type, or hold equal strings.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
  Type(TypeKey),
  Named(Cow<'static, str>),
}

impl Token {
  /// The token for type `T`. Trait objects (`dyn Trait`) are valid tokens.
  pub fn of<T: ?Sized + 'static>() -> Self {
    Token::Type(TypeKey::of::<T>())
  }

  /// A token identified by a string value.
  pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
    Token::Named(name.into())
  }

  /// The token every injector answers with itself.
  pub fn injector() -> Self {
    Token::of::<crate::Injector>()
  }

  pub fn is_injector(&self) -> bool {
    *self == Token::injector()
  }
}

impl From<&'static str> for Token {
  fn from(name: &'static str) -> Self {
    Token::Named(Cow::Borrowed(name))
  }
}

impl From<String> for Token {
  fn from(name: String) -> Self {
    Token::Named(Cow::Owned(name))
  }
}

impl From<TypeKey> for Token {
  fn from(key: TypeKey) -> Self {
    Token::Type(key)
  }
}

impl From<&Token> for Token {
  fn from(token: &Token) -> Self {
    token.clone()
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Token::Type(key) => f.write_str(&short_type_name(key.name)),
      Token::Named(name) => f.write_str(name),
    }
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Token::Type(key) => write!(f, "Token::Type({})", key.name),
      Token::Named(name) => write!(f, "Token::Named({:?})", name),
    }
  }
}

/// Strips module paths from every path segment of a type name.
///
/// `app::cars::Car<alloc::string::String>` becomes `Car<String>`.
fn short_type_name(full: &str) -> String {
  let mut out = String::with_capacity(full.len());
  let mut segment = String::new();
  for c in full.chars() {
    if c.is_alphanumeric() || c == '_' {
      segment.push(c);
    } else if c == ':' {
      segment.clear();
    } else {
      out.push_str(&segment);
      segment.clear();
      out.push(c);
    }
  }
  out.push_str(&segment);
  out
}
