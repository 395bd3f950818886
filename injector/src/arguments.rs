//! Positional resolved dependencies handed to class and factory providers.

use crate::core::{downcast, Instance};
use crate::error::{DependencyPath, Error, Result};
use crate::injector::Scope;
use crate::lazy::{resolve_deferred, Lazy};
use crate::token::Token;
use std::any::Any;
use std::sync::{Arc, Weak};
use std::vec;

pub(crate) enum ArgumentValue {
  Resolved(Instance),
  Deferred(Weak<Scope>),
  Absent,
}

/// One resolved dependency, tagged with the token it was resolved for.
pub(crate) struct Argument {
  token: Token,
  value: ArgumentValue,
}

impl Argument {
  pub(crate) fn resolved(token: Token, instance: Instance) -> Self {
    Self {
      token,
      value: ArgumentValue::Resolved(instance),
    }
  }

  pub(crate) fn deferred(token: Token, scope: Weak<Scope>) -> Self {
    Self {
      token,
      value: ArgumentValue::Deferred(scope),
    }
  }

  pub(crate) fn absent(token: Token) -> Self {
    Self {
      token,
      value: ArgumentValue::Absent,
    }
  }
}

/// The resolved dependencies of one binding, consumed in declaration order.
///
/// Each `next*` call takes the following positional argument. Reading past the end
/// fails with [`Error::MissingArgument`].
pub struct Arguments {
  consumer: Token,
  values: vec::IntoIter<Argument>,
  position: usize,
}

impl Arguments {
  pub(crate) fn new(consumer: Token, values: Vec<Argument>) -> Self {
    Self {
      consumer,
      values: values.into_iter(),
      position: 0,
    }
  }

  /// The token whose provider receives these arguments.
  pub fn consumer(&self) -> &Token {
    &self.consumer
  }

  /// Number of arguments not consumed yet.
  pub fn remaining(&self) -> usize {
    self.values.len()
  }

  fn take(&mut self) -> Result<Argument> {
    let position = self.position;
    self.position += 1;
    self.values.next().ok_or_else(|| Error::MissingArgument {
      consumer: self.consumer.clone(),
      position,
    })
  }

  /// The next argument as an untyped instance. Lazy arguments are resolved on the spot.
  pub fn next_instance(&mut self) -> Result<Instance> {
    let Argument { token, value } = self.take()?;
    match value {
      ArgumentValue::Resolved(instance) => Ok(instance),
      ArgumentValue::Deferred(scope) => resolve_deferred(&token, &scope),
      ArgumentValue::Absent => Err(Error::NoProvider {
        path: DependencyPath::new(vec![self.consumer.clone(), token.clone()]),
        token,
      }),
    }
  }

  /// The next argument, downcast to `T`.
  pub fn next<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
    let Argument { token, value } = self.take()?;
    match value {
      ArgumentValue::Resolved(instance) => downcast(&token, instance),
      ArgumentValue::Deferred(scope) => Lazy::<T>::new(token, scope).get(),
      ArgumentValue::Absent => Err(Error::NoProvider {
        path: DependencyPath::new(vec![self.consumer.clone(), token.clone()]),
        token,
      }),
    }
  }

  /// The next argument of an optional dependency; `None` when nothing provided it.
  pub fn next_optional<T: Any + Send + Sync>(&mut self) -> Result<Option<Arc<T>>> {
    let Argument { token, value } = self.take()?;
    match value {
      ArgumentValue::Resolved(instance) => downcast(&token, instance).map(Some),
      ArgumentValue::Deferred(scope) => Lazy::<T>::new(token, scope).get().map(Some),
      ArgumentValue::Absent => Ok(None),
    }
  }

  /// The next argument as a [`Lazy`] handle. Already resolved arguments are wrapped as-is.
  pub fn next_lazy<T: Any + Send + Sync>(&mut self) -> Result<Lazy<T>> {
    let Argument { token, value } = self.take()?;
    match value {
      ArgumentValue::Resolved(instance) => Ok(Lazy::ready(downcast(&token, instance)?)),
      ArgumentValue::Deferred(scope) => Ok(Lazy::new(token, scope)),
      ArgumentValue::Absent => Err(Error::NoProvider {
        path: DependencyPath::new(vec![self.consumer.clone(), token.clone()]),
        token,
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arguments_are_consumed_in_order() {
    let mut args = Arguments::new(
      Token::named("car"),
      vec![
        Argument::resolved(Token::named("engine"), Arc::new(8_u32)),
        Argument::absent(Token::named("radio")),
      ],
    );

    assert_eq!(args.remaining(), 2);
    assert_eq!(*args.next::<u32>().unwrap(), 8);
    assert!(args.next_optional::<String>().unwrap().is_none());
    assert_eq!(args.remaining(), 0);
  }

  #[test]
  fn reading_past_the_end_is_an_error() {
    let mut args = Arguments::new(Token::named("car"), Vec::new());
    let err = args.next::<u32>().unwrap_err();
    assert_eq!(
      err.to_string(),
      "Provider for `car` asked for argument 0 which was not supplied"
    );
  }

  #[test]
  fn wrong_type_is_a_mismatch() {
    let mut args = Arguments::new(
      Token::named("car"),
      vec![Argument::resolved(Token::named("engine"), Arc::new(8_u32))],
    );
    assert!(matches!(
      args.next::<String>(),
      Err(Error::TypeMismatch { token, .. }) if token == Token::named("engine")
    ));
  }
}
