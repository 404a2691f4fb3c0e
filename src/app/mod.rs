//! Application layer configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  app: ChannelConfig (JSON / builder)        │
//! └──────────────┬──────────────────────────────┘
//!                │ opens
//!                ▼
//! ┌─────────────────────────────────────────────┐
//! │  adapters: UnixSocketChannel,               │
//! │            InMemoryChannel (testing)        │
//! └──────────────┬──────────────────────────────┘
//!                │ implements
//!                ▼
//! ┌─────────────────────────────────────────────┐
//! │  ports: MessageChannel                      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The query engine in [`crate::query`] needs no configuration; it is driven
//! entirely by the node tree it is given.

pub mod config;

pub use config::ChannelConfig;
