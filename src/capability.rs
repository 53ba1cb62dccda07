use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A capability contract. Implemented by zero-sized marker types, normally
/// through the [`capability!`](crate::capability) macro, and used only as a
/// registry key plus a list of the method names it declares.
pub trait Capability: 'static {
    const NAME: &'static str;
    const METHODS: &'static [&'static str];

    fn id() -> TraitId {
        TraitId::of::<Self>()
    }
}

// ------------- TraitId -------------
#[derive(Clone, Copy)]
pub struct TraitId {
    type_id: TypeId,
    name: &'static str,
    methods: &'static [&'static str],
}

impl TraitId {
    pub fn of<C: Capability + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: C::NAME,
            methods: C::METHODS,
        }
    }
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn methods(&self) -> &'static [&'static str] {
        self.methods
    }
    pub fn declares(&self, method: &str) -> bool {
        self.methods.contains(&method)
    }
}
// identity is the marker type alone, the name is for humans
impl PartialEq for TraitId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}
impl Eq for TraitId {}
impl Hash for TraitId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}
impl fmt::Debug for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TraitId({})", self.name)
    }
}
impl fmt::Display for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
