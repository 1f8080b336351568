//! Multi-part messages
//!
//! A message is an ordered list of independently sized parts that is
//! delivered as a whole or not at all. Parts are `Bytes`, so cloning a
//! message for fan-out only bumps reference counts, and converting to and
//! from [`ZmqMessage`] moves the parts without copying them.

use std::collections::VecDeque;
use std::fmt::Display;

use bytes::Bytes;
use zeromq::ZmqMessage;

use crate::error::{Error, Result};

/// An ordered list of message parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    parts: VecDeque<Bytes>,
}

impl Message {
    /// Create a message without parts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message holding a single empty part
    pub fn empty_part() -> Self {
        let mut msg = Self::new();
        msg.push_empty();
        msg
    }

    /// Append a part
    pub fn push(&mut self, part: impl Into<Bytes>) {
        self.parts.push_back(part.into());
    }

    /// Append a zero-length part
    pub fn push_empty(&mut self) {
        self.parts.push_back(Bytes::new());
    }

    /// Append the text form of a value
    pub fn push_text(&mut self, value: impl Display) {
        self.parts.push_back(Bytes::from(value.to_string()));
    }

    /// Prepend a part (used for routing identities)
    pub fn push_front(&mut self, part: impl Into<Bytes>) {
        self.parts.push_front(part.into());
    }

    /// Take the next part
    ///
    /// Running out of parts is a receive failure.
    pub fn next_part(&mut self) -> Result<Bytes> {
        self.parts.pop_front().ok_or(Error::MissingPart)
    }

    /// Take the next part as UTF-8 text
    pub fn next_str(&mut self) -> Result<String> {
        let part = self.next_part()?;
        String::from_utf8(part.to_vec()).map_err(Error::parse)
    }

    /// Take the next part and parse its text form
    pub fn next_value<T>(&mut self) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: Display,
    {
        let text = self.next_str()?;
        text.trim()
            .parse()
            .map_err(|e| Error::parse(format!("{:?}: {}", text, e)))
    }

    /// Discard the next part
    pub fn skip_part(&mut self) -> Result<()> {
        self.next_part().map(drop)
    }

    /// Number of remaining parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if no parts remain
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over the remaining parts
    pub fn parts(&self) -> impl Iterator<Item = &Bytes> {
        self.parts.iter()
    }

    /// Total payload size across all parts
    pub fn byte_len(&self) -> usize {
        self.parts.iter().map(Bytes::len).sum()
    }

    /// Hand the parts to the socket library
    ///
    /// A ZMTP message has at least one part.
    pub(crate) fn into_zmq(self) -> Result<ZmqMessage> {
        let mut parts = self.parts.into_iter();
        let mut msg = ZmqMessage::from(parts.next().ok_or(Error::EmptyMessage)?);
        for part in parts {
            msg.push_back(part);
        }
        Ok(msg)
    }
}

impl From<ZmqMessage> for Message {
    fn from(msg: ZmqMessage) -> Self {
        Self::from(msg.into_vec())
    }
}

impl From<Vec<Bytes>> for Message {
    fn from(parts: Vec<Bytes>) -> Self {
        Self {
            parts: parts.into(),
        }
    }
}

impl IntoIterator for Message {
    type Item = Bytes;
    type IntoIter = std::collections::vec_deque::IntoIter<Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_in_order() {
        let mut msg = Message::new();
        msg.push_text(3);
        msg.push(Bytes::from_static(b"raw"));
        msg.push_empty();

        assert_eq!(msg.len(), 3);
        assert_eq!(msg.byte_len(), 4);
        assert_eq!(msg.next_value::<usize>().unwrap(), 3);
        assert_eq!(&msg.next_part().unwrap()[..], b"raw");
        assert!(msg.next_part().unwrap().is_empty());
        assert!(matches!(msg.next_part(), Err(Error::MissingPart)));
    }

    #[test]
    fn test_push_front_identity() {
        let mut msg = Message::empty_part();
        msg.push_front(Bytes::from_static(b"peer-1"));

        assert_eq!(msg.len(), 2);
        assert_eq!(&msg.next_part().unwrap()[..], b"peer-1");
    }

    #[test]
    fn test_zmq_conversion_keeps_parts() {
        let mut msg = Message::new();
        msg.push_text("user");
        msg.push_empty();
        msg.push(Bytes::from_static(&[1, 2, 3]));

        let zmq = msg.clone().into_zmq().unwrap();
        assert_eq!(zmq.len(), 3);
        assert_eq!(Message::from(zmq), msg);
    }

    #[test]
    fn test_empty_message_not_sendable() {
        assert!(matches!(Message::new().into_zmq(), Err(Error::EmptyMessage)));
    }

    #[test]
    fn test_next_value_parse_error() {
        let mut msg = Message::new();
        msg.push_text("abc");
        assert!(matches!(msg.next_value::<usize>(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_next_str_rejects_invalid_utf8() {
        let mut msg = Message::new();
        msg.push(Bytes::from_static(&[0xff, 0xfe]));
        assert!(msg.next_str().is_err());
    }
}
