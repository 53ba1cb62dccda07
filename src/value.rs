//! Type-erased values passed through dispatch.
//!
//! Receivers travel as `&dyn Any`, everything else as [`Value`]s. Arguments
//! are positional and are taken out of [`Args`] by index with a checked
//! downcast, so a caller passing the wrong type gets a
//! [`BoltonError::TypeMismatch`] instead of a panic.

use std::any::{Any, type_name};
use std::fmt;

use crate::error::{BoltonError, Result};

// ------------- Value -------------
pub struct Value(Box<dyn Any>);

impl Value {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Box::new(value))
    }
    pub fn unit() -> Self {
        Self::new(())
    }
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
    pub fn downcast<T: Any>(self) -> Result<T> {
        self.0
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| BoltonError::TypeMismatch {
                context: String::from("return value"),
                expected: type_name::<T>(),
            })
    }
}
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Value({:?})", (*self.0).type_id())
    }
}

// ------------- Args -------------
#[derive(Default)]
pub struct Args {
    values: Vec<Option<Box<dyn Any>>>,
}

impl Args {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }
    /// Appends a positional argument.
    pub fn with<T: Any>(mut self, value: T) -> Self {
        self.values.push(Some(Box::new(value)));
        self
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Borrows the argument at `index`.
    pub fn get<T: Any>(&self, index: usize) -> Result<&T> {
        let value = self
            .values
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(BoltonError::MissingArgument { index })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(index))
    }
    /// Moves the argument at `index` out. Taking the same position twice
    /// reports it as missing.
    pub fn take<T: Any>(&mut self, index: usize) -> Result<T> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or(BoltonError::MissingArgument { index })?;
        let value = slot.take().ok_or(BoltonError::MissingArgument { index })?;
        match value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => {
                // put it back so a second attempt with the right type still works
                *slot = Some(value);
                Err(mismatch::<T>(index))
            }
        }
    }
}
impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Args({})", self.values.len())
    }
}

fn mismatch<T: Any>(index: usize) -> BoltonError {
    BoltonError::TypeMismatch {
        context: format!("argument {}", index),
        expected: type_name::<T>(),
    }
}
