use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

pub type Matcher = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

// ------------- TypeDescriptor -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}
impl TypeDescriptor {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
    pub fn id(&self) -> TypeId {
        self.id
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
}
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ------------- Target -------------
/// What an implementation is registered for: a concrete type, whose
/// capability table receives trampolines, or a guard function, which never
/// receives anything.
#[derive(Clone)]
pub enum Target {
    Type(TypeDescriptor),
    Guard(Matcher),
}

impl Target {
    pub fn of<T: Any>() -> Self {
        Target::Type(TypeDescriptor::of::<T>())
    }
    pub fn guard<F>(matcher: F) -> Self
    where
        F: Fn(&dyn Any) -> bool + Send + Sync + 'static,
    {
        Target::Guard(Arc::new(matcher))
    }
    pub fn is_type(&self) -> bool {
        matches!(self, Target::Type(_))
    }
    pub fn as_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Target::Type(descriptor) => Some(descriptor),
            Target::Guard(_) => None,
        }
    }
}
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Target::Type(descriptor) => write!(f, "{}", descriptor),
            Target::Guard(_) => write!(f, "<guard>"),
        }
    }
}
impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Target::Type(descriptor) => f.debug_tuple("Type").field(descriptor).finish(),
            Target::Guard(_) => f.write_str("Guard(..)"),
        }
    }
}
