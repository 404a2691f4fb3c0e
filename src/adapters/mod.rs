//! Adapters implementing the ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Adapters depend on ports, not the other way around.

pub mod in_memory_channel;
#[cfg(unix)]
pub mod unix_socket_channel;

pub use in_memory_channel::InMemoryChannel;
#[cfg(unix)]
pub use unix_socket_channel::UnixSocketChannel;
