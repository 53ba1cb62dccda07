use core::hash::BuildHasherDefault;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};

use lazy_static::lazy_static;
use seahash::SeaHasher;
use tracing::{debug, trace, warn};

use crate::builder::TraitBuilder;
use crate::capability::{Capability, TraitId};
use crate::dispatch::{Dispatcher, Instance, select};
use crate::error::{BoltonError, Result};
use crate::implementation::{Implementation, Method, typed_method};
use crate::settings::RegistrySettings;
use crate::target::{Target, TypeDescriptor};
use crate::value::{Args, Value};

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

/// A boolean test on a receiver.
pub type Predicate = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

// ------------- ImplementationRecord -------------
pub struct ImplementationRecord {
    predicates: Vec<Predicate>,
    implementation: Arc<Implementation>,
    target: Target,
}
impl ImplementationRecord {
    pub fn new(predicates: Vec<Predicate>, implementation: Implementation, target: Target) -> Self {
        Self {
            predicates,
            implementation: Arc::new(implementation),
            target,
        }
    }
    pub fn is_unconditional(&self) -> bool {
        self.predicates.is_empty()
    }
    // predicates within one record are OR'ed
    pub fn matches(&self, receiver: &dyn Any) -> bool {
        self.is_unconditional() || self.predicates.iter().any(|p| p(receiver))
    }
    pub fn implementation(&self) -> Arc<Implementation> {
        Arc::clone(&self.implementation)
    }
    pub fn target(&self) -> &Target {
        &self.target
    }
}

// ------------- TraitMeta -------------
pub struct TraitMeta {
    id: TraitId,
    impls: Vec<Arc<ImplementationRecord>>,
}
impl TraitMeta {
    fn new(id: TraitId) -> Self {
        Self {
            id,
            impls: Vec::new(),
        }
    }
    pub fn id(&self) -> TraitId {
        self.id
    }
    pub fn impls(&self) -> &[Arc<ImplementationRecord>] {
        &self.impls
    }
}

// ------------- TypeTable -------------
#[derive(Clone)]
pub enum Slot {
    // defined by the type itself, never replaced by injection
    Own(Method),
    Trampoline {
        capability: TraitId,
        target: TypeDescriptor,
    },
}

pub struct TypeTable {
    descriptor: TypeDescriptor,
    slots: HashMap<String, Slot, KeyHasher>,
}
impl TypeTable {
    fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            slots: HashMap::default(),
        }
    }
    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }
    pub fn slot(&self, method: &str) -> Option<&Slot> {
        self.slots.get(method)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|e| BoltonError::Lock(e.to_string()))
}

// ------------- Registry -------------
/// Owns every registered implementation and the capability tables of the
/// types they were injected into.
pub struct Registry {
    settings: RegistrySettings,
    traits: Mutex<HashMap<TypeId, TraitMeta, KeyHasher>>,
    types: Mutex<HashMap<TypeId, TypeTable, KeyHasher>>,
}

lazy_static! {
    static ref GLOBAL: Arc<Registry> = {
        let settings = RegistrySettings::from_env().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default registry settings");
            RegistrySettings::default()
        });
        Arc::new(Registry::with_settings(settings))
    };
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            settings,
            traits: Mutex::new(HashMap::default()),
            types: Mutex::new(HashMap::default()),
        }
    }
    /// The process-wide registry, created on first use.
    pub fn global() -> Arc<Registry> {
        Arc::clone(&GLOBAL)
    }
    pub fn global_ref() -> &'static Registry {
        &GLOBAL
    }
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    // functions to reach the builder, dispatchers and bound receivers
    pub fn implement<C: Capability>(&self) -> TraitBuilder<'_, C> {
        TraitBuilder::new(self)
    }
    pub fn dispatcher<C: Capability>(self: &Arc<Self>) -> Dispatcher<C> {
        Dispatcher::new(Arc::clone(self))
    }
    pub fn on<'a, T: Any>(&'a self, receiver: &'a T) -> Instance<'a> {
        Instance::new(self, receiver, TypeDescriptor::of::<T>())
    }

    /// Appends an implementation record for `capability`, creating its
    /// metadata on first use.
    pub fn register(&self, capability: TraitId, record: ImplementationRecord) -> Result<()> {
        let mut traits = lock(&self.traits)?;
        let meta = traits
            .entry(capability.type_id())
            .or_insert_with(|| TraitMeta::new(capability));
        if meta.impls.iter().any(|r| r.is_unconditional()) {
            // shadowed: an earlier unconditional record always matches first
            trace!(capability = %capability, implementation = record.implementation.name(), "registered behind an unconditional implementation");
        }
        debug!(
            capability = %capability,
            implementation = record.implementation.name(),
            target_type = %record.target,
            predicates = record.predicates.len(),
            position = meta.impls.len(),
            "registered implementation"
        );
        meta.impls.push(Arc::new(record));
        Ok(())
    }

    /// Installs a trampoline for every listed method the target type does
    /// not already hold a slot for. Returns how many were installed.
    pub fn inject<'m>(
        &self,
        capability: TraitId,
        target: TypeDescriptor,
        methods: impl IntoIterator<Item = &'m str>,
    ) -> Result<usize> {
        let mut types = lock(&self.types)?;
        let table = types
            .entry(target.id())
            .or_insert_with(|| TypeTable::new(target));
        let mut installed = 0;
        for method in methods {
            match table.slots.entry(method.to_owned()) {
                Entry::Vacant(e) => {
                    e.insert(Slot::Trampoline { capability, target });
                    installed += 1;
                    debug!(capability = %capability, target_type = %target, method, "injected method");
                }
                Entry::Occupied(_) => {
                    debug!(capability = %capability, target_type = %target, method, "method already defined, left untouched");
                }
            }
        }
        Ok(installed)
    }

    /// Defines a method on the type itself. Own methods take precedence over
    /// anything injected, before or after.
    pub fn define_method<T, F>(&self, method: &str, f: F) -> Result<()>
    where
        T: Any,
        F: Fn(&T, Args) -> Result<Value> + Send + Sync + 'static,
    {
        let descriptor = TypeDescriptor::of::<T>();
        let mut types = lock(&self.types)?;
        let table = types
            .entry(descriptor.id())
            .or_insert_with(|| TypeTable::new(descriptor));
        if let Some(Slot::Trampoline { capability, .. }) = table.slots.get(method) {
            debug!(capability = %capability, target_type = %descriptor, method, "own method replaces injected method");
        }
        table
            .slots
            .insert(method.to_owned(), Slot::Own(typed_method(method, f)));
        Ok(())
    }

    // copies the ordered records so no lock is held while guards and methods run
    fn snapshot(&self, capability: TraitId) -> Result<Vec<Arc<ImplementationRecord>>> {
        let traits = lock(&self.traits)?;
        Ok(traits
            .get(&capability.type_id())
            .map(|meta| meta.impls.clone())
            .unwrap_or_default())
    }

    /// Selects the implementation of `capability` for `receiver` without
    /// invoking anything.
    pub fn select(
        &self,
        capability: TraitId,
        receiver: &dyn Any,
        target: Option<&TypeDescriptor>,
    ) -> Result<Arc<ImplementationRecord>> {
        let records = self.snapshot(capability)?;
        select(&records, receiver)
            .cloned()
            .ok_or_else(|| BoltonError::NoImplementationFound {
                capability: capability.name(),
                target: target.map(|t| t.name().to_owned()),
            })
    }

    pub fn resolve<C: Capability>(&self, receiver: &dyn Any) -> Result<Arc<Implementation>> {
        Ok(self.select(C::id(), receiver, None)?.implementation())
    }

    /// Runs the dispatch algorithm: first matching record in registration
    /// order, then its `method` with the receiver and arguments.
    pub fn dispatch(
        &self,
        capability: TraitId,
        method: &str,
        receiver: &dyn Any,
        args: Args,
        target: Option<&TypeDescriptor>,
    ) -> Result<Value> {
        let record = self.select(capability, receiver, target)?;
        let implementation = record.implementation();
        let resolved = implementation
            .get(method)
            .cloned()
            .ok_or_else(|| BoltonError::MethodNotImplemented {
                capability: capability.name(),
                implementation: implementation.name().to_owned(),
                method: method.to_owned(),
            })?;
        trace!(capability = %capability, implementation = implementation.name(), method, "dispatching");
        resolved(receiver, args)
    }

    /// Calls `method` on `receiver` through its type's capability table.
    pub fn invoke(&self, receiver: &dyn Any, method: &str, args: Args) -> Result<Value> {
        self.invoke_as(receiver, None, method, args)
    }

    pub(crate) fn invoke_as(
        &self,
        receiver: &dyn Any,
        descriptor: Option<&TypeDescriptor>,
        method: &str,
        args: Args,
    ) -> Result<Value> {
        let (slot, type_name) = {
            let types = lock(&self.types)?;
            match types.get(&(*receiver).type_id()) {
                Some(table) => (table.slot(method).cloned(), table.descriptor().name()),
                None => (None, descriptor.map_or("unregistered type", |d| d.name())),
            }
        };
        match slot {
            Some(Slot::Own(own)) => own(receiver, args),
            Some(Slot::Trampoline { capability, target }) => {
                self.dispatch(capability, method, receiver, args, Some(&target))
            }
            None => Err(BoltonError::NoSuchMethod {
                type_name: type_name.to_owned(),
                method: method.to_owned(),
            }),
        }
    }

    pub fn responds_to(&self, receiver: &dyn Any, method: &str) -> Result<bool> {
        let types = lock(&self.types)?;
        Ok(types
            .get(&(*receiver).type_id())
            .is_some_and(|table| table.slot(method).is_some()))
    }

    /// Implementation names for `C` in registration order.
    pub fn implementations<C: Capability>(&self) -> Result<Vec<String>> {
        Ok(self
            .snapshot(C::id())?
            .iter()
            .map(|r| r.implementation.name().to_owned())
            .collect())
    }
}
