//! Symmetry transforms as seen by the engine

use std::{any::Any, fmt, rc::Rc};

use super::printer::TreePrinter;

/// One symmetry operation (rotation, reflection, color swap).
///
/// Transforms are catalog data: built once per query, shared by every node
/// that uses them and never mutated. The engine only prints them; concrete
/// filters recover the concrete transform with `downcast_ref` and interpret
/// it in [`super::Filter::transform`].
pub trait Transform: AsAny + fmt::Debug {
    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result;
}

/// Access to a value as `&dyn Any`, implemented for every `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Transform + '_ {
    /// The concrete transform, if it is a `T`.
    pub fn downcast_ref<T: Transform + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Shared handle to a transform
pub type TransformRef = Rc<dyn Transform>;
