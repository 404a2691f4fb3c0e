//! Query tree evaluation under board symmetries

pub mod filter;
pub mod node;
pub mod printer;
pub mod range;
pub mod transform;
pub mod transform_node;

pub use filter::{Filter, NumValue};
pub use node::{Node, clone_verify, descendants, has_empty_square_mask_descendant, render};
pub use printer::TreePrinter;
pub use range::{CountRange, Range, RangeRef};
pub use transform::{Transform, TransformRef};
pub use transform_node::TransformNode;
