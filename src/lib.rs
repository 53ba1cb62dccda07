//! Bolton – ad-hoc trait attachment with guard-based runtime dispatch.
//!
//! Bolton lets a caller declare a named *capability* (a set of method names),
//! register implementations of it against types defined elsewhere, and call
//! those methods either on the instances themselves or through a dispatcher:
//! * A [`Capability`] is a zero-sized marker type; its [`TraitId`] is the registry key.
//! * An [`Implementation`] is a named table of erased methods.
//! * The [`Registry`] keeps, per capability, implementation records in registration order,
//!   each with an optional list of guard predicates.
//! * A [`Dispatcher`] selects an implementation for each call by scanning those records.
//!
//! ## Selection
//! Records are scanned in registration order and the first one that matches
//! wins. A record without guards matches every receiver, a record with guards
//! matches when at least one of them holds. An unconditional implementation
//! therefore shadows everything registered after it. Selection runs again on
//! every call, so later registrations affect calls made through methods that
//! were injected earlier.
//!
//! ## Injection
//! Types cannot be reopened, so every type gets a capability table keyed by
//! method name. Registering an implementation for a concrete type (see
//! [`Target`]) installs a trampoline slot for each of its methods unless the
//! table already holds that name. Methods a type defines itself via
//! [`Registry::define_method`] always win. Calls through the table go through
//! [`Registry::invoke`] or, with method syntax, through an [`Instance`].
//!
//! ## Configuration
//! [`RegistrySettings`] are read with the `config` crate from an optional file
//! and `BOLTON_*` environment variables. The process-wide registry behind
//! [`Registry::global`] reads them from the environment on first use.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use bolton::{Implementation, Registry, Value};
//!
//! bolton::capability! {
//!     pub Speak(dispatch = SpeakDispatch, instance = SpeakMethods) {
//!         fn echo(value: String) -> String;
//!     }
//! }
//!
//! struct Animal { name: String }
//!
//! let registry = Arc::new(Registry::new());
//! registry
//!     .implement::<Speak>()
//!     .for_type::<Animal>()
//!     .with(Implementation::new("AnimalSpeak").method("echo", |_: &Animal, mut args: bolton::Args| {
//!         Ok(Value::new(args.take::<String>(0)?))
//!     }))
//!     .unwrap();
//!
//! let rex = Animal { name: "Rex".to_string() };
//! assert_eq!(registry.on(&rex).echo("hi".to_string()).unwrap(), "hi");
//! assert_eq!(registry.dispatcher::<Speak>().echo(&rex, "hi".to_string()).unwrap(), "hi");
//! # assert_eq!(rex.name, "Rex");
//! ```

pub mod builder;
pub mod capability;
pub mod dispatch;
pub mod error;
pub mod implementation;
mod macros;
pub mod registry;
pub mod settings;
pub mod target;
pub mod value;

pub use builder::{TargetBuilder, TraitBuilder};
pub use capability::{Capability, TraitId};
pub use dispatch::{Dispatcher, Forwarder, Instance};
pub use error::{BoltonError, Result};
pub use implementation::{Implementation, Method};
pub use registry::{Predicate, Registry};
pub use settings::RegistrySettings;
pub use target::{Target, TypeDescriptor};
pub use value::{Args, Value};

/// Starts a registration for `C` on the process-wide registry.
pub fn implement<C: Capability>() -> TraitBuilder<'static, C> {
    Registry::global_ref().implement::<C>()
}

/// The dispatcher for `C` on the process-wide registry.
pub fn dispatcher<C: Capability>() -> Dispatcher<C> {
    Dispatcher::global()
}
