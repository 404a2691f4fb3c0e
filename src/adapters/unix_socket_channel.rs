//! Unix domain socket implementation of the message channel.
//!
//! Messages are lines terminated by `\n`. Senders emit UTF-8; receivers
//! hand back raw bytes and never read more than `max_message_len` bytes of a
//! line into memory.

use std::{
    fmt,
    io::{BufRead, BufReader, Read, Write},
    net::Shutdown,
    os::unix::net::UnixStream,
};

use log::{info, warn};

use crate::{
    Error, Result,
    app::ChannelConfig,
    ports::{
        MessageChannel,
        channel::{copy_truncated, render_message},
    },
};

/// Line-framed message channel over a Unix domain socket.
///
/// # Examples
///
/// ```no_run
/// use symquery::adapters::UnixSocketChannel;
/// use symquery::app::ChannelConfig;
/// use symquery::ports::MessageChannel;
///
/// let mut channel = UnixSocketChannel::connect(&ChannelConfig::new("/tmp/ui.sock"))?;
/// channel.report_alive()?;
/// channel.send_fmt(format_args!("search done: {} games", 12))?;
/// channel.close()?;
/// # Ok::<(), symquery::Error>(())
/// ```
#[derive(Debug)]
pub struct UnixSocketChannel {
    writer: UnixStream,
    reader: BufReader<UnixStream>,
    config: ChannelConfig,
    line: Vec<u8>,
    open: bool,
}

impl UnixSocketChannel {
    /// Connect to the socket named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the socket cannot
    /// be connected.
    pub fn connect(config: &ChannelConfig) -> Result<Self> {
        config.validate()?;
        let stream = UnixStream::connect(&config.socket_path).map_err(|source| Error::Io {
            operation: format!("connect to socket {:?}", config.socket_path),
            source,
        })?;
        info!("connected to UI socket {:?}", config.socket_path);
        Self::from_stream(stream, config.clone())
    }

    /// Wrap an already connected stream, e.g. one accepted by a listener.
    pub fn from_stream(stream: UnixStream, config: ChannelConfig) -> Result<Self> {
        config.validate()?;
        let reader = stream.try_clone().map_err(|source| Error::Io {
            operation: "clone socket for reading".to_string(),
            source,
        })?;
        Ok(Self {
            writer: stream,
            reader: BufReader::new(reader),
            config,
            line: Vec::new(),
            open: true,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(Error::ChannelClosed)
        }
    }
}

impl MessageChannel for UnixSocketChannel {
    fn send_fmt(&mut self, message: fmt::Arguments<'_>) -> Result<()> {
        self.ensure_open()?;
        let text = render_message(message, self.config.max_message_len)?;
        writeln!(self.writer, "{text}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| Error::Io {
                operation: "send message".to_string(),
                source,
            })
    }

    /// Block until the next non-empty line arrives.
    ///
    /// # Errors
    ///
    /// * [`Error::ChannelClosed`] once the peer has hung up
    /// * [`Error::MessageTooLong`] for a line over `max_message_len`; the
    ///   line is skipped and the next call reads the following message
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> {
        self.ensure_open()?;
        let max = self.config.max_message_len;
        let io_error = |source| Error::Io {
            operation: "receive message".to_string(),
            source,
        };

        loop {
            self.line.clear();
            let read = (&mut self.reader)
                .take(max as u64 + 1)
                .read_until(b'\n', &mut self.line)
                .map_err(io_error)?;
            if read == 0 {
                return Err(Error::ChannelClosed);
            }

            if self.line.last() == Some(&b'\n') {
                self.line.pop();
            } else if self.line.len() > max {
                let skipped = self.reader.skip_until(b'\n').map_err(io_error)?;
                let len = self.line.len() + skipped.saturating_sub(1);
                warn!("dropped over-long message of at least {len} bytes");
                return Err(Error::MessageTooLong { len, max });
            }

            if !self.line.is_empty() {
                return Ok(copy_truncated(&self.line, buffer));
            }
        }
    }

    fn report_alive(&mut self) -> Result<()> {
        let heartbeat = self.config.heartbeat.clone();
        self.send(&heartbeat)
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        if let Err(e) = self.writer.shutdown(Shutdown::Both) {
            // Peer may already be gone; nothing left to release.
            warn!("socket shutdown failed: {e}");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl Drop for UnixSocketChannel {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
