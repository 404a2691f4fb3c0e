//! In-memory message channel for testing.
//!
//! This adapter connects two endpoints through shared queues, so channel
//! users can be tested without sockets.

use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;

use crate::{
    Error, Result,
    app::ChannelConfig,
    ports::{
        MessageChannel,
        channel::{copy_truncated, render_message},
    },
};

type Queue = Arc<Mutex<VecDeque<String>>>;

/// One endpoint of an in-memory channel pair.
///
/// Messages sent on one endpoint are received, in order, on the other.
#[derive(Debug)]
pub struct InMemoryChannel {
    outbox: Queue,
    inbox: Queue,
    config: ChannelConfig,
    open: bool,
}

impl InMemoryChannel {
    /// Create two connected endpoints sharing `config`.
    pub fn pair(config: ChannelConfig) -> (Self, Self) {
        let a_to_b = Queue::default();
        let b_to_a = Queue::default();
        (
            Self {
                outbox: a_to_b.clone(),
                inbox: b_to_a.clone(),
                config: config.clone(),
                open: true,
            },
            Self {
                outbox: b_to_a,
                inbox: a_to_b,
                config,
                open: true,
            },
        )
    }

    /// Number of messages waiting to be received on this endpoint.
    pub fn pending(&self) -> usize {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(Error::ChannelClosed)
        }
    }
}

impl MessageChannel for InMemoryChannel {
    fn send_fmt(&mut self, message: fmt::Arguments<'_>) -> Result<()> {
        self.ensure_open()?;
        let text = render_message(message, self.config.max_message_len)?;
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(text);
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> {
        self.ensure_open()?;
        let message = self
            .inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Ok(message.map_or(0, |m| copy_truncated(m.as_bytes(), buffer)))
    }

    fn report_alive(&mut self) -> Result<()> {
        let heartbeat = self.config.heartbeat.clone();
        self.send(&heartbeat)
    }

    fn close(&mut self) -> Result<()> {
        if self.open {
            debug!("closing in-memory channel with {} pending", self.pending());
            self.open = false;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
