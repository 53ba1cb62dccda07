use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoltonError, Result};
use crate::registry::KeyHasher;
use crate::value::{Args, Value};

/// An erased method: receives the receiver and the positional arguments.
pub type Method = Arc<dyn Fn(&dyn Any, Args) -> Result<Value> + Send + Sync>;

/// Wraps a closure over a concrete receiver type into a [`Method`]. A
/// receiver of any other type is a [`BoltonError::TypeMismatch`].
pub fn typed_method<R, F>(name: &str, f: F) -> Method
where
    R: Any,
    F: Fn(&R, Args) -> Result<Value> + Send + Sync + 'static,
{
    let context = format!("receiver of {}", name);
    Arc::new(move |receiver: &dyn Any, args: Args| match receiver.downcast_ref::<R>() {
        Some(receiver) => f(receiver, args),
        None => Err(BoltonError::TypeMismatch {
            context: context.clone(),
            expected: type_name::<R>(),
        }),
    })
}

// ------------- Implementation -------------
/// A named method table registered as satisfying a capability.
pub struct Implementation {
    name: String,
    methods: HashMap<String, Method, KeyHasher>,
    order: Vec<String>,
}

impl Implementation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: HashMap::default(),
            order: Vec::new(),
        }
    }
    pub fn method<R, F>(self, name: &str, f: F) -> Self
    where
        R: Any,
        F: Fn(&R, Args) -> Result<Value> + Send + Sync + 'static,
    {
        let method = typed_method(name, f);
        self.insert(name, method)
    }
    /// Like [`method`](Self::method), for methods that accept any receiver.
    pub fn method_any<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&dyn Any, Args) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(f))
    }
    fn insert(mut self, name: &str, method: Method) -> Self {
        if self.methods.insert(name.to_owned(), method).is_none() {
            self.order.push(name.to_owned());
        }
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn get(&self, method: &str) -> Option<&Method> {
        self.methods.get(method)
    }
    /// Method names in the order they were first added.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("name", &self.name)
            .field("methods", &self.order)
            .finish()
    }
}
