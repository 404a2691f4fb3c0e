//! The filter capability: predicates over a game context

use super::{node::Node, transform::Transform};
use crate::Result;

/// Numeric value produced by counting or sorting expressions
pub type NumValue = i64;

/// A predicate over a game context `G`.
///
/// Filters are owned exclusively by their parent node and are deep-copied,
/// never shared. The game type is opaque to the engine and only borrowed.
///
/// # Contract
///
/// * `transform` is capability-preserving: it always returns another filter
///   over the same game type, or an error if the transform does not apply.
/// * `match_position` must not have observable side effects. Callers may stop
///   evaluating sibling filters as soon as the outcome is known.
pub trait Filter<G: ?Sized>: Node {
    /// Whether this filter matches `game`.
    fn match_position(&mut self, game: &G) -> Result<bool>;

    /// A new filter equivalent to this one on the board mapped by `transform`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IncompatibleTransform`] when this filter cannot
    /// be expressed under `transform`.
    fn transform(&self, transform: &dyn Transform) -> Result<Box<dyn Filter<G>>>;

    /// A deep, independent copy of this filter.
    fn clone_filter(&self) -> Result<Box<dyn Filter<G>>>;

    /// Materialize any deferred symmetry expansion below this filter.
    ///
    /// Leaf filters have nothing to expand. Composite filters forward the
    /// call to their children.
    fn expand(&mut self) -> Result<()> {
        Ok(())
    }
}
