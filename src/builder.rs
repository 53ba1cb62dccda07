use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::capability::Capability;
use crate::error::Result;
use crate::implementation::Implementation;
use crate::registry::{ImplementationRecord, Predicate, Registry};
use crate::target::Target;

// ------------- TraitBuilder -------------
/// Registration with the capability chosen but no target yet.
pub struct TraitBuilder<'r, C: Capability> {
    registry: &'r Registry,
    capability: PhantomData<fn() -> C>,
}

impl<'r, C: Capability> TraitBuilder<'r, C> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            capability: PhantomData,
        }
    }
    pub fn target(self, target: Target) -> TargetBuilder<'r, C> {
        TargetBuilder {
            registry: self.registry,
            target,
            predicates: Vec::new(),
            capability: PhantomData,
        }
    }
    pub fn for_type<T: Any>(self) -> TargetBuilder<'r, C> {
        self.target(Target::of::<T>())
    }
    pub fn for_guard<F>(self, matcher: F) -> TargetBuilder<'r, C>
    where
        F: Fn(&dyn Any) -> bool + Send + Sync + 'static,
    {
        self.target(Target::guard(matcher))
    }
}

// ------------- TargetBuilder -------------
/// Registration with a bound target, accumulating guards until `with`.
pub struct TargetBuilder<'r, C: Capability> {
    registry: &'r Registry,
    target: Target,
    predicates: Vec<Predicate>,
    capability: PhantomData<fn() -> C>,
}

impl<'r, C: Capability> TargetBuilder<'r, C> {
    /// Adds a guard over receivers of type `R`. Receivers of any other type
    /// fail it.
    pub fn when<R, F>(self, predicate: F) -> Self
    where
        R: Any,
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.when_any(move |receiver: &dyn Any| {
            receiver.downcast_ref::<R>().is_some_and(|r| predicate(r))
        })
    }
    pub fn when_any<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn Any) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate = Arc::new(predicate);
        self.predicates.push(predicate);
        self
    }
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Commits the registration and, for a concrete target, injects the
    /// implementation's methods into the target's capability table.
    pub fn with(self, implementation: Implementation) -> Result<()> {
        let capability = C::id();
        let methods: Vec<String> = implementation.method_names().map(str::to_owned).collect();
        let target = self.target.clone();
        self.registry.register(
            capability,
            ImplementationRecord::new(self.predicates, implementation, self.target),
        )?;
        if let Some(descriptor) = target.as_type() {
            if self.registry.settings().injection {
                self.registry
                    .inject(capability, *descriptor, methods.iter().map(String::as_str))?;
            } else {
                debug!(capability = %capability, target_type = %descriptor, "injection disabled");
            }
        }
        Ok(())
    }
}
