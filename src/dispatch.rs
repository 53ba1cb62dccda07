use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::capability::{Capability, TraitId};
use crate::error::{BoltonError, Result};
use crate::registry::{ImplementationRecord, Registry};
use crate::target::TypeDescriptor;
use crate::value::{Args, Value};

/// First record, in registration order, that is unconditional or has a
/// guard holding for `receiver`. First match wins, there is no scoring.
pub fn select<'r>(
    records: &'r [Arc<ImplementationRecord>],
    receiver: &dyn Any,
) -> Option<&'r Arc<ImplementationRecord>> {
    records.iter().find(|record| record.matches(receiver))
}

// ------------- Dispatcher -------------
/// Calls methods of `C` with an explicit receiver. The `capability!` macro
/// adds one typed forwarding method per declared method on top of `call`.
pub struct Dispatcher<C: Capability> {
    registry: Arc<Registry>,
    capability: PhantomData<fn() -> C>,
}

impl<C: Capability> Dispatcher<C> {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            capability: PhantomData,
        }
    }
    /// A dispatcher on the process-wide registry.
    pub fn global() -> Self {
        Self::new(Registry::global())
    }
    pub fn capability(&self) -> TraitId {
        C::id()
    }
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
    /// Dispatches `method` for `receiver`. Any name is accepted unless the
    /// registry runs with `strict_dispatch`, in which case only the names
    /// declared by `C` are.
    pub fn call(&self, receiver: &dyn Any, method: &str, args: Args) -> Result<Value> {
        if self.registry.settings().strict_dispatch && !C::id().declares(method) {
            return Err(BoltonError::UndeclaredMethod {
                capability: C::NAME,
                method: method.to_owned(),
            });
        }
        self.registry.dispatch(C::id(), method, receiver, args, None)
    }
    pub fn forwarder(&self, method: &str) -> Forwarder<'_, C> {
        Forwarder {
            dispatcher: self,
            method: method.to_owned(),
        }
    }
}
impl<C: Capability> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.registry))
    }
}
impl<C: Capability> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dispatcher<{}>", C::NAME)
    }
}

/// A dispatcher method bound by name, resolved again on every call.
pub struct Forwarder<'d, C: Capability> {
    dispatcher: &'d Dispatcher<C>,
    method: String,
}
impl<C: Capability> Forwarder<'_, C> {
    pub fn method(&self) -> &str {
        &self.method
    }
    pub fn call(&self, receiver: &dyn Any, args: Args) -> Result<Value> {
        self.dispatcher.call(receiver, &self.method, args)
    }
}

// ------------- Instance -------------
/// A receiver bound to a registry, so injected methods can be called on it
/// with method syntax through the generated instance traits.
pub struct Instance<'a> {
    registry: &'a Registry,
    receiver: &'a dyn Any,
    descriptor: TypeDescriptor,
}

impl<'a> Instance<'a> {
    pub(crate) fn new(registry: &'a Registry, receiver: &'a dyn Any, descriptor: TypeDescriptor) -> Self {
        Self {
            registry,
            receiver,
            descriptor,
        }
    }
    pub fn receiver(&self) -> &'a dyn Any {
        self.receiver
    }
    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }
    pub fn invoke(&self, method: &str, args: Args) -> Result<Value> {
        self.registry
            .invoke_as(self.receiver, Some(&self.descriptor), method, args)
    }
    pub fn responds_to(&self, method: &str) -> Result<bool> {
        self.registry.responds_to(self.receiver, method)
    }
}
