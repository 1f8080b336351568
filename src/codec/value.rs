//! Text-encoded protocol values

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::transport::Message;

/// Append a boolean as `1` or `0`
pub fn push_bool(msg: &mut Message, value: bool) {
    msg.push_text(u8::from(value));
}

/// Read a boolean written by [`push_bool`]
pub fn read_bool(msg: &mut Message) -> Result<bool> {
    match msg.next_value::<u8>()? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(Error::parse(format!("invalid boolean {}", other))),
    }
}

/// Append a count followed by one text part per item
pub fn push_sequence<'a, T, I>(msg: &mut Message, items: I)
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: ExactSizeIterator,
{
    let items = items.into_iter();
    msg.push_text(items.len());
    for item in items {
        msg.push_text(item);
    }
}

/// Read a sequence written by [`push_sequence`]
pub fn read_sequence<T>(msg: &mut Message) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let count: usize = msg.next_value()?;
    // Do not trust the count for preallocation
    let mut items = Vec::with_capacity(count.min(msg.len()));
    for _ in 0..count {
        items.push(msg.next_value()?);
    }
    Ok(items)
}
