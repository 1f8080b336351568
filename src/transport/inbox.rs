//! Poll-then-receive on top of a receiving socket

use zeromq::SocketRecv;

use crate::error::Result;
use crate::timeout::Timeout;

use super::message::Message;

/// Receiving socket with a one-message lookahead
///
/// `poll` moves a message into the pending slot without handing it out, so
/// a later `recv` returns it immediately. A receive cut short by a timeout
/// loses nothing: the socket keeps the message until the next attempt.
pub(crate) struct Inbox<S> {
    socket: S,
    pending: Option<Message>,
}

impl<S: SocketRecv + Send> Inbox<S> {
    pub(crate) fn new(socket: S) -> Self {
        Self {
            socket,
            pending: None,
        }
    }

    pub(crate) fn socket_mut(&mut self) -> &mut S {
        &mut self.socket
    }

    /// Wait until a message is available
    pub(crate) async fn poll(&mut self, timeout: Timeout) -> Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }

        match timeout.run(self.socket.recv()).await {
            Some(received) => {
                self.pending = Some(received?.into());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Take the next message, waiting as long as needed
    pub(crate) async fn recv(&mut self) -> Result<Message> {
        match self.pending.take() {
            Some(msg) => Ok(msg),
            None => Ok(self.socket.recv().await?.into()),
        }
    }

    /// Drop everything that has already arrived
    pub(crate) async fn clear(&mut self) -> Result<usize> {
        let mut dropped = 0;
        while self.poll(Timeout::Immediate).await? {
            self.pending = None;
            dropped += 1;
        }
        Ok(dropped)
    }
}
