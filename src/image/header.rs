//! Image format descriptor
//!
//! A header travels as one whitespace-delimited text line:
//!
//! ```text
//! width height channels bytes_per_channel name
//! ```
//!
//! Only the first token after the numeric fields is read back as the name,
//! so names must not contain whitespace.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Describes the layout of one image buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ImageHeader {
    /// Image name (no whitespace)
    pub name: String,
    /// Resolution in x
    pub width: u32,
    /// Resolution in y
    pub height: u32,
    /// Number of channels per pixel
    pub channels: u32,
    /// Bytes per channel value
    pub bytes_per_channel: u32,
}

impl ImageHeader {
    /// Create a header from its fields
    pub fn new(
        width: u32,
        height: u32,
        channels: u32,
        bytes_per_channel: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            channels,
            bytes_per_channel,
        }
    }

    /// Number of bytes an image in this format occupies
    pub fn total_bytes(&self) -> u64 {
        u64::from(self.width)
            .saturating_mul(u64::from(self.height))
            .saturating_mul(u64::from(self.channels))
            .saturating_mul(u64::from(self.bytes_per_channel))
    }
}

impl fmt::Display for ImageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.width, self.height, self.channels, self.bytes_per_channel, self.name
        )
    }
}

impl FromStr for ImageHeader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut field = |what: &str| -> Result<u32, Error> {
            let token = tokens
                .next()
                .ok_or_else(|| Error::parse(format!("image header: missing {}", what)))?;
            token
                .parse()
                .map_err(|_| Error::parse(format!("image header: bad {} {:?}", what, token)))
        };

        let width = field("width")?;
        let height = field("height")?;
        let channels = field("channels")?;
        let bytes_per_channel = field("bytes_per_channel")?;
        let name = tokens.next().unwrap_or_default().to_string();

        Ok(Self {
            name,
            width,
            height,
            channels,
            bytes_per_channel,
        })
    }
}
