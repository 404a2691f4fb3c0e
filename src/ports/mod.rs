//! Ports (trait boundaries) for external collaborators.
//!
//! These traits are owned by the crate and implemented by adapters in the
//! infrastructure layer.

pub mod channel;

pub use channel::MessageChannel;
