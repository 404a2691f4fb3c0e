//! Generic query tree nodes
//!
//! Every element of a query tree implements [`Node`]. Tree-wide operations
//! (descendant enumeration, degeneracy scans, clone verification, rendering)
//! are free functions over `&dyn Node` so they work on any node type.

use std::fmt;

use super::printer::TreePrinter;
use crate::{Error, Result};

/// A node in a query tree
pub trait Node {
    /// Short type name used in printed trees and shape checks
    fn class_name(&self) -> &'static str;

    /// Direct children of this node, in evaluation order
    fn children(&self) -> Vec<&dyn Node>;

    /// Whether this node, by itself, is structurally degenerate.
    ///
    /// A node whose square mask is empty can never match, so any transformed
    /// filter containing one is pruned during expansion.
    fn has_empty_square_mask(&self) -> bool {
        false
    }

    /// Print this node (and its subtree) into `out`.
    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result;
}

/// All nodes of the tree rooted at `node`, in depth-first preorder.
///
/// The root itself is the first element.
pub fn descendants(node: &dyn Node) -> Vec<&dyn Node> {
    let mut out = Vec::new();
    collect_descendants(node, &mut out);
    out
}

fn collect_descendants<'a>(node: &'a dyn Node, out: &mut Vec<&'a dyn Node>) {
    out.push(node);
    for child in node.children() {
        collect_descendants(child, out);
    }
}

/// Whether `node` or any node below it reports an empty square mask.
pub fn has_empty_square_mask_descendant(node: &dyn Node) -> bool {
    descendants(node).iter().any(|d| d.has_empty_square_mask())
}

/// Check that `clone` has the same shape as `source`.
///
/// Shape means the same class name at every position and the same number of
/// children under every node.
///
/// # Errors
///
/// Returns [`Error::CloneShapeMismatch`] naming the first differing position.
pub fn clone_verify(source: &dyn Node, clone: &dyn Node) -> Result<()> {
    verify_at(source, clone, source.class_name().to_string())
}

fn verify_at(source: &dyn Node, clone: &dyn Node, path: String) -> Result<()> {
    if source.class_name() != clone.class_name() {
        return Err(Error::CloneShapeMismatch {
            path,
            message: format!(
                "expected {} but clone is {}",
                source.class_name(),
                clone.class_name()
            ),
        });
    }

    let source_children = source.children();
    let clone_children = clone.children();
    if source_children.len() != clone_children.len() {
        return Err(Error::CloneShapeMismatch {
            path,
            message: format!(
                "expected {} children, clone has {}",
                source_children.len(),
                clone_children.len()
            ),
        });
    }

    for (i, (s, c)) in source_children.into_iter().zip(clone_children).enumerate() {
        verify_at(s, c, format!("{path}/{i}:{}", s.class_name()))?;
    }
    Ok(())
}

/// Render a node tree to a string.
pub fn render(node: &dyn Node) -> Result<String> {
    let mut out = String::new();
    node.print(&mut TreePrinter::new(&mut out))?;
    Ok(out)
}
