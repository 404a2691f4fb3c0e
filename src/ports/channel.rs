//! Message channel port for the UI front end.
//!
//! The query engine does not use this channel. It is the boundary a UI
//! process talks through: text messages in both directions plus a liveness
//! signal. Framing and transport belong to the adapters.

use std::fmt;

use crate::Result;

/// Port for exchanging text messages with a UI front end.
///
/// Channels are opened by adapter constructors (see
/// [`crate::adapters::UnixSocketChannel::connect`]) and stay usable until
/// [`MessageChannel::close`].
///
/// # Examples
///
/// ```
/// use symquery::adapters::InMemoryChannel;
/// use symquery::app::ChannelConfig;
/// use symquery::ports::MessageChannel;
///
/// let (mut engine, mut ui) = InMemoryChannel::pair(ChannelConfig::default());
/// engine.send_fmt(format_args!("matched {} positions", 3))?;
///
/// let mut buffer = [0u8; 64];
/// let len = ui.receive(&mut buffer)?;
/// assert_eq!(&buffer[..len], b"matched 3 positions");
/// # Ok::<(), symquery::Error>(())
/// ```
pub trait MessageChannel {
    /// Send one formatted message.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The channel is closed
    /// - The message is empty
    /// - The message exceeds the configured maximum length
    /// - The message contains a newline (messages are single lines)
    /// - I/O errors occur during writing
    fn send_fmt(&mut self, message: fmt::Arguments<'_>) -> Result<()>;

    /// Send a plain message.
    fn send(&mut self, message: &str) -> Result<()> {
        self.send_fmt(format_args!("{message}"))
    }

    /// Receive the next message into `buffer`.
    ///
    /// Messages longer than `buffer` are truncated. Returns the number of
    /// bytes written, `0` meaning no message was waiting; sent messages are
    /// never empty.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Tell the peer this side is still alive.
    fn report_alive(&mut self) -> Result<()>;

    /// Close the channel. Closing twice is a no-op.
    fn close(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;
}

/// Validate and render a message for sending.
pub(crate) fn render_message(message: fmt::Arguments<'_>, max_len: usize) -> Result<String> {
    let text = message.to_string();
    if text.is_empty() {
        return Err(crate::Error::InvalidMessage {
            reason: "messages must not be empty".to_string(),
        });
    }
    if text.contains('\n') {
        return Err(crate::Error::InvalidMessage {
            reason: "messages must not contain newlines".to_string(),
        });
    }
    if text.len() > max_len {
        return Err(crate::Error::MessageTooLong {
            len: text.len(),
            max: max_len,
        });
    }
    Ok(text)
}

/// Copy `message` into `buffer`, truncating. Returns the bytes copied.
pub(crate) fn copy_truncated(message: &[u8], buffer: &mut [u8]) -> usize {
    let len = message.len().min(buffer.len());
    buffer[..len].copy_from_slice(&message[..len]);
    len
}
