//! Symmetry expansion and matching core for a chess position query language
//!
//! This crate provides:
//! - The [`query::Node`] and [`query::Filter`] contracts for query trees
//! - [`query::TransformNode`], which evaluates a filter under a set of board
//!   symmetries and folds the results into a boolean or a count
//! - Count ranges and indented tree printing
//! - A message channel port and adapters for talking to a UI front end

pub mod adapters;
pub mod app;
pub mod error;
pub mod ports;
pub mod query;

pub use error::{Error, Result};
pub use query::{CountRange, Filter, Node, NumValue, Range, Transform, TransformNode};
