use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

/// A value that can travel inside a row's argument list.
///
/// Implemented for every `'static + Debug + Send + Sync` type, so test
/// authors never implement it by hand.
pub trait Argument: Any + fmt::Debug + Send + Sync {
    /// Returns the value as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the fully qualified type name of the value.
    fn type_name(&self) -> &'static str;
}

impl<T> Argument for T
where
    T: Any + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// A single type-erased argument handed to a test host.
///
/// Cloning a `Param` only bumps a reference count; the host gets the
/// concrete value back with [`Param::downcast_ref`].
#[derive(Clone)]
pub struct Param(Arc<dyn Argument>);

impl Param {
    /// Wraps a value.
    pub fn new<T: Argument>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Wraps an already shared value without copying it.
    pub fn from_arc<T: Argument>(value: Arc<T>) -> Self {
        Param(value)
    }

    /// Returns the value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value().as_any().downcast_ref::<T>()
    }

    /// Checks whether the value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value().as_any().is::<T>()
    }

    /// Type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.value().type_name()
    }

    // `Arc<dyn Argument>` is itself an `Argument`; always go through the pointee.
    fn value(&self) -> &dyn Argument {
        &*self.0
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.value(), f)
    }
}
