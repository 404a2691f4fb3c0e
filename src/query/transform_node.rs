//! Symmetry expansion and matching
//!
//! A [`TransformNode`] owns one base filter and a list of symmetry
//! transforms. Expansion replaces the base filter with one transformed copy
//! per transform; matching evaluates those copies against a game and folds
//! the results into a boolean, or into a count when a range is configured.
//!
//! # Lifecycle
//!
//! ```text
//!   new(filter, transforms, range)
//!            │
//!            ▼
//!   ┌────────────────┐  expand()   ┌────────────────────────┐
//!   │   Unexpanded   │ ──────────▶ │        Expanded        │
//!   │  base filter   │             │  transformed filters   │
//!   └────────────────┘             └────────────────────────┘
//!     try_clone() ok                 match_position() ok
//!     match_position() err           match_count() ok (with range)
//!                                    expand() / try_clone() err
//! ```
//!
//! Exactly one of the base filter and the transformed filters exists at any
//! time; the state enum makes the other combinations unrepresentable.

use std::fmt::{self, Write};

use log::{debug, trace};

use super::{
    filter::{Filter, NumValue},
    node::{Node, clone_verify, has_empty_square_mask_descendant},
    printer::TreePrinter,
    range::RangeRef,
    transform::{Transform, TransformRef},
};
use crate::{Error, Result};

const CLASS_NAME: &str = "TransformNode";

enum Expansion<G: ?Sized> {
    Unexpanded(Box<dyn Filter<G>>),
    Expanded(Vec<Box<dyn Filter<G>>>),
}

/// A filter evaluated under every transform in a symmetry set.
///
/// Without a range the node answers "does some transformed variant match".
/// With a range it counts the matching variants and asks the range whether
/// that count is acceptable, which also lets the node act as a numeric
/// expression via [`TransformNode::match_count`].
pub struct TransformNode<G: ?Sized> {
    transforms: Vec<TransformRef>,
    range: Option<RangeRef>,
    state: Expansion<G>,
    count: usize,
}

impl<G: ?Sized> TransformNode<G> {
    /// Create an unexpanded node.
    ///
    /// Transforms and range are shared with the caller; the filter is owned.
    pub fn new(
        filter: Box<dyn Filter<G>>,
        transforms: Vec<TransformRef>,
        range: Option<RangeRef>,
    ) -> Self {
        Self {
            transforms,
            range,
            state: Expansion::Unexpanded(filter),
            count: 0,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.state, Expansion::Expanded(_))
    }

    pub fn transforms(&self) -> &[TransformRef] {
        &self.transforms
    }

    pub fn range(&self) -> Option<&RangeRef> {
        self.range.as_ref()
    }

    /// The base filter, until expansion consumes it
    pub fn base_filter(&self) -> Option<&dyn Filter<G>> {
        match &self.state {
            Expansion::Unexpanded(filter) => Some(filter.as_ref()),
            Expansion::Expanded(_) => None,
        }
    }

    /// The transformed filters; empty until expansion
    pub fn expanded_filters(&self) -> &[Box<dyn Filter<G>>] {
        match &self.state {
            Expansion::Unexpanded(_) => &[],
            Expansion::Expanded(filters) => filters,
        }
    }

    /// Number of matching transformed filters seen by the last match.
    ///
    /// Without a range this stops at 1, since matching stops at the first
    /// success.
    pub fn last_match_count(&self) -> usize {
        self.count
    }

    /// Replace the base filter by its transformed copies.
    ///
    /// Transformed copies with an empty square mask anywhere in their tree
    /// can never match and are dropped. Surviving copies are expanded in
    /// turn, so nested transform nodes are materialized depth-first.
    ///
    /// On error the node is left unexpanded.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadyExpanded`] on a second call
    /// * [`Error::IncompatibleTransform`] if the base filter rejects a transform
    /// * [`Error::EmptyExpansion`] if no transformed copy survives pruning
    pub fn expand(&mut self) -> Result<()> {
        let Expansion::Unexpanded(base) = &self.state else {
            return Err(Error::AlreadyExpanded);
        };

        let mut filters = Vec::with_capacity(self.transforms.len());
        for (i, transform) in self.transforms.iter().enumerate() {
            let transformed = base.transform(transform.as_ref())?;
            if has_empty_square_mask_descendant(transformed.as_ref()) {
                debug!("pruned degenerate filter for transform {i} {transform:?}");
                continue;
            }
            filters.push(transformed);
        }

        if filters.is_empty() {
            return Err(Error::EmptyExpansion {
                ntransforms: self.transforms.len(),
            });
        }

        for filter in &mut filters {
            filter.expand()?;
        }

        debug!(
            "expanded {} of {} transforms under {}",
            filters.len(),
            self.transforms.len(),
            base.class_name()
        );
        self.state = Expansion::Expanded(filters);
        Ok(())
    }

    /// Match the transformed filters against `game`.
    ///
    /// Without a range this returns `true` at the first matching filter and
    /// skips the rest. With a range every filter is evaluated and the range
    /// decides on the exact number of matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotExpanded`] before [`TransformNode::expand`].
    pub fn match_position(&mut self, game: &G) -> Result<bool> {
        let Expansion::Expanded(filters) = &mut self.state else {
            return Err(Error::NotExpanded {
                operation: "match_position".to_string(),
            });
        };

        self.count = 0;
        for (i, filter) in filters.iter_mut().enumerate() {
            if filter.match_position(game)? {
                self.count += 1;
                trace!("transformed filter {i} matched");
                if self.range.is_none() {
                    return Ok(true);
                }
            }
        }

        Ok(self
            .range
            .as_ref()
            .is_some_and(|range| range.valid(self.count)))
    }

    /// Match and, on success, return the number of matching transforms.
    ///
    /// Returns `Ok(None)` when the match fails.
    ///
    /// # Errors
    ///
    /// * [`Error::RangeRequired`] if the node has no range, whatever the game
    /// * [`Error::NotExpanded`] before [`TransformNode::expand`]
    pub fn match_count(&mut self, game: &G) -> Result<Option<NumValue>> {
        if self.range.is_none() {
            return Err(Error::RangeRequired);
        }
        if !self.match_position(game)? {
            return Ok(None);
        }
        Ok(Some(
            NumValue::try_from(self.count).unwrap_or(NumValue::MAX),
        ))
    }

    /// Clone an unexpanded node.
    ///
    /// The base filter is deep-copied; transforms and range are shared with
    /// the source.
    ///
    /// # Errors
    ///
    /// * [`Error::CloneExpanded`] once the node is expanded
    /// * [`Error::CloneShapeMismatch`] if the filter's copy differs in shape
    pub fn try_clone(&self) -> Result<Self> {
        let Expansion::Unexpanded(base) = &self.state else {
            return Err(Error::CloneExpanded);
        };

        let clone = Self {
            transforms: self.transforms.clone(),
            range: self.range.clone(),
            state: Expansion::Unexpanded(base.clone_filter()?),
            count: 0,
        };
        clone_verify(self, &clone)?;
        Ok(clone)
    }
}

impl<G: ?Sized> Node for TransformNode<G> {
    fn class_name(&self) -> &'static str {
        CLASS_NAME
    }

    fn children(&self) -> Vec<&dyn Node> {
        match &self.state {
            Expansion::Unexpanded(filter) => vec![filter.as_ref() as &dyn Node],
            Expansion::Expanded(filters) => filters
                .iter()
                .map(|filter| filter.as_ref() as &dyn Node)
                .collect(),
        }
    }

    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        let ntransforms = self.transforms.len();
        let nfilters = self.expanded_filters().len();
        write!(
            out,
            "<{CLASS_NAME} ntransforms: {ntransforms} nfilters: {nfilters}"
        )?;
        if let Some(range) = &self.range {
            out.write_str(" range: ")?;
            range.print(out)?;
        }

        for (i, transform) in self.transforms.iter().enumerate() {
            print_entry(out, |out| {
                write!(out, "Transform {i} of {ntransforms}: ")?;
                transform.print(out)
            })?;
        }

        match &self.state {
            Expansion::Unexpanded(filter) => print_entry(out, |out| {
                out.write_str("Filter: ")?;
                filter.print(out)
            })?,
            Expansion::Expanded(filters) => {
                for (i, filter) in filters.iter().enumerate() {
                    print_entry(out, |out| {
                        write!(out, "TransformedFilter {i} of {nfilters}: ")?;
                        filter.print(out)
                    })?;
                }
            }
        }

        write!(out, " {CLASS_NAME}>")
    }
}

fn print_entry(
    out: &mut TreePrinter<'_>,
    body: impl FnOnce(&mut TreePrinter<'_>) -> fmt::Result,
) -> fmt::Result {
    out.newline()?;
    out.indent();
    out.tab()?;
    let result = body(out);
    out.unindent();
    result
}

impl<G: ?Sized + 'static> Filter<G> for TransformNode<G> {
    fn match_position(&mut self, game: &G) -> Result<bool> {
        TransformNode::match_position(self, game)
    }

    /// Transform the base filter, keeping the same symmetry set and range.
    fn transform(&self, transform: &dyn Transform) -> Result<Box<dyn Filter<G>>> {
        let Expansion::Unexpanded(base) = &self.state else {
            return Err(Error::AlreadyExpanded);
        };
        Ok(Box::new(Self::new(
            base.transform(transform)?,
            self.transforms.clone(),
            self.range.clone(),
        )))
    }

    fn clone_filter(&self) -> Result<Box<dyn Filter<G>>> {
        Ok(Box::new(self.try_clone()?))
    }

    fn expand(&mut self) -> Result<()> {
        TransformNode::expand(self)
    }
}
