//! Envelope codec
//!
//! Frames and protocol values travel as the parts of one
//! [`Message`](crate::transport::Message). Everything except raw image buffers is
//! sent in its text form.
//!
//! ```text
//!   [user_data | <empty>]
//!   num_headers
//!   header_1 .. header_n        "w h c bpc name"
//!   num_buffers
//!   buffer_1 .. buffer_m        raw bytes
//!   <empty>                     delimiter
//! ```

pub mod frame;
pub mod value;

pub use frame::{decode_frame, encode_frame};
pub use value::{push_bool, push_sequence, read_bool, read_sequence};
