//! Common test utilities for the symquery test suite.
//!
//! Provides scripted filters and transforms whose behavior under each
//! symmetry is fixed up front, plus call counters to observe evaluation.

#![allow(dead_code)]

use std::{
    cell::Cell,
    fmt::{self, Write},
    rc::Rc,
};

use symquery::{
    Error, Filter, Node, Result, Transform,
    query::{TransformRef, TreePrinter},
};

/// Opaque game context; filters here ignore its contents.
#[derive(Debug, Default)]
pub struct Position;

/// Symmetry identified by its index into a [`Script`].
#[derive(Debug)]
pub struct Symmetry(pub usize);

impl Transform for Symmetry {
    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        write!(out, "<Symmetry {}>", self.0)
    }
}

/// A transform no scripted filter understands.
#[derive(Debug)]
pub struct Unsupported;

impl Transform for Unsupported {
    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        out.write_str("<Unsupported>")
    }
}

pub fn symmetries(n: usize) -> Vec<TransformRef> {
    (0..n)
        .map(|i| Rc::new(Symmetry(i)) as TransformRef)
        .collect()
}

/// How the filter produced by one symmetry behaves.
#[derive(Debug, Clone)]
pub struct Variant {
    pub matches: bool,
    pub degenerate: bool,
    pub calls: Rc<Cell<usize>>,
}

impl Variant {
    pub fn matching() -> Self {
        Self::new(true, false)
    }

    pub fn failing() -> Self {
        Self::new(false, false)
    }

    pub fn degenerate() -> Self {
        Self::new(true, true)
    }

    fn new(matches: bool, degenerate: bool) -> Self {
        Self {
            matches,
            degenerate,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// How many times filters of this variant were matched.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

/// Variants by symmetry index
pub type Script = Rc<Vec<Variant>>;

/// Leaf filter driven by a [`Script`].
///
/// The base filter (no variant) is never matched directly; its transformed
/// copies take the variant at the symmetry's index.
#[derive(Debug)]
pub struct ScriptedFilter {
    pub label: String,
    script: Script,
    variant: Option<Variant>,
}

impl ScriptedFilter {
    pub fn new(label: &str, variants: Vec<Variant>) -> Self {
        Self {
            label: label.to_string(),
            script: Rc::new(variants),
            variant: None,
        }
    }

    pub fn boxed(label: &str, variants: Vec<Variant>) -> Box<dyn Filter<Position>> {
        Box::new(Self::new(label, variants))
    }
}

impl Node for ScriptedFilter {
    fn class_name(&self) -> &'static str {
        "ScriptedFilter"
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn has_empty_square_mask(&self) -> bool {
        self.variant.as_ref().is_some_and(|v| v.degenerate)
    }

    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        write!(out, "<ScriptedFilter {}>", self.label)
    }
}

impl Filter<Position> for ScriptedFilter {
    fn match_position(&mut self, _game: &Position) -> Result<bool> {
        let Some(variant) = &self.variant else {
            return Ok(false);
        };
        variant.calls.set(variant.calls.get() + 1);
        Ok(variant.matches)
    }

    fn transform(&self, transform: &dyn Transform) -> Result<Box<dyn Filter<Position>>> {
        let variant = transform
            .downcast_ref::<Symmetry>()
            .and_then(|Symmetry(i)| self.script.get(*i))
            .ok_or_else(|| Error::IncompatibleTransform {
                filter: self.label.clone(),
                transform: format!("{transform:?}"),
            })?;
        Ok(Box::new(Self {
            label: self.label.clone(),
            script: self.script.clone(),
            variant: Some(variant.clone()),
        }))
    }

    fn clone_filter(&self) -> Result<Box<dyn Filter<Position>>> {
        Ok(Box::new(Self {
            label: self.label.clone(),
            script: self.script.clone(),
            variant: self.variant.clone(),
        }))
    }
}

/// Conjunction of filters, transformed and expanded part by part.
pub struct AndFilter {
    pub parts: Vec<Box<dyn Filter<Position>>>,
}

impl Node for AndFilter {
    fn class_name(&self) -> &'static str {
        "AndFilter"
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.parts.iter().map(|p| p.as_ref() as &dyn Node).collect()
    }

    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        out.write_str("<AndFilter")?;
        for part in &self.parts {
            out.write_char(' ')?;
            part.print(out)?;
        }
        out.write_str(">")
    }
}

impl Filter<Position> for AndFilter {
    fn match_position(&mut self, game: &Position) -> Result<bool> {
        for part in &mut self.parts {
            if !part.match_position(game)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn transform(&self, transform: &dyn Transform) -> Result<Box<dyn Filter<Position>>> {
        let parts = self
            .parts
            .iter()
            .map(|p| p.transform(transform))
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(AndFilter { parts }))
    }

    fn clone_filter(&self) -> Result<Box<dyn Filter<Position>>> {
        let parts = self
            .parts
            .iter()
            .map(|p| p.clone_filter())
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(AndFilter { parts }))
    }

    fn expand(&mut self) -> Result<()> {
        for part in &mut self.parts {
            part.expand()?;
        }
        Ok(())
    }
}

/// Initialize logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
