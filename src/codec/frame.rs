//! Frame envelopes

use crate::error::{Error, Result};
use crate::image::{Frame, FrameOptions, ImageBuffer, ImageHeader};
use crate::transport::Message;

/// Build the envelope for a frame
///
/// Skipped sections go out empty: an empty user-data part and zero counts.
/// Shared buffers are added by reference count, borrowed ones are copied.
pub fn encode_frame(frame: &Frame<'_>, options: &FrameOptions) -> Message {
    let mut msg = Message::new();

    if options.skip_user_data {
        msg.push_empty();
    } else {
        msg.push_text(&frame.user_data);
    }

    if options.skip_headers {
        msg.push_text(0);
    } else {
        msg.push_text(frame.headers.len());
        for header in &frame.headers {
            msg.push_text(header);
        }
    }

    if options.skip_buffers {
        msg.push_text(0);
    } else {
        msg.push_text(frame.buffers.len());
        for buffer in &frame.buffers {
            msg.push(buffer.to_bytes());
        }
    }

    msg.push_empty();
    msg
}

/// Read an envelope into a frame
///
/// Skipped sections are drained from the message and reset in the frame.
/// The buffer list is resized to the incoming count: existing slots are
/// filled in place (borrowed slots keep pointing at caller memory) and new
/// slots are owned. If a borrowed slot is too small the remaining parts are
/// still read, and the first [`Error::CapacityExceeded`] is returned.
///
/// On any other error the frame contents are unspecified.
pub fn decode_frame(
    msg: &mut Message,
    frame: &mut Frame<'_>,
    options: &FrameOptions,
) -> Result<()> {
    if options.skip_user_data {
        msg.skip_part()?;
        frame.user_data.clear();
    } else {
        frame.user_data = msg.next_str()?;
    }

    let header_count: usize = msg.next_value()?;
    frame.headers.clear();
    if options.skip_headers {
        skip_parts(msg, header_count)?;
    } else {
        frame.headers.reserve(header_count.min(msg.len()));
        for _ in 0..header_count {
            frame.headers.push(msg.next_value::<ImageHeader>()?);
        }
    }

    let buffer_count: usize = msg.next_value()?;
    let mut overflow: Option<Error> = None;
    if options.skip_buffers {
        skip_parts(msg, buffer_count)?;
        frame.buffers.clear();
    } else {
        frame.buffers.truncate(buffer_count);
        for index in 0..buffer_count {
            let part = msg.next_part()?;
            match frame.buffers.get_mut(index) {
                Some(buffer) => {
                    if let Err(e) = buffer.fill(index, part) {
                        overflow.get_or_insert(e);
                    }
                }
                None => frame.buffers.push(ImageBuffer::Shared(part)),
            }
        }
    }

    // Older peers may omit the delimiter
    if !msg.is_empty() {
        msg.skip_part()?;
    }

    match overflow {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn skip_parts(msg: &mut Message, count: usize) -> Result<()> {
    for _ in 0..count {
        msg.skip_part()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use proptest::prelude::*;

    fn sample() -> Frame<'static> {
        let mut frame = Frame::new();
        frame.push_image(
            ImageHeader::new(2, 2, 1, 1, "gray"),
            ImageBuffer::from(vec![1u8, 2, 3, 4]),
        );
        frame.push_image(
            ImageHeader::new(1, 1, 3, 2, "rgb16"),
            ImageBuffer::from(vec![5u8; 6]),
        );
        frame.user_data = "seq=7".to_string();
        frame
    }

    #[test]
    fn test_envelope_layout() {
        let msg = encode_frame(&sample(), &FrameOptions::new());
        let parts: Vec<Bytes> = msg.into_iter().collect();

        assert_eq!(parts.len(), 8);
        assert_eq!(&parts[0][..], b"seq=7");
        assert_eq!(&parts[1][..], b"2");
        assert_eq!(&parts[2][..], b"2 2 1 1 gray");
        assert_eq!(&parts[3][..], b"1 1 3 2 rgb16");
        assert_eq!(&parts[4][..], b"2");
        assert_eq!(&parts[5][..], &[1, 2, 3, 4]);
        assert_eq!(parts[6].len(), 6);
        assert!(parts[7].is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let frame = sample();
        let mut msg = encode_frame(&frame, &FrameOptions::new());

        let mut received = Frame::new();
        decode_frame(&mut msg, &mut received, &FrameOptions::new()).unwrap();
        assert_eq!(received, frame);
        assert!(msg.is_empty());
    }

    #[test]
    fn test_skip_on_send_sends_empty_sections() {
        let options = FrameOptions::new().skip_buffers(true).skip_user_data(true);
        let mut msg = encode_frame(&sample(), &options);
        assert_eq!(msg.len(), 6);

        let mut received = Frame::new();
        decode_frame(&mut msg, &mut received, &FrameOptions::new()).unwrap();
        assert_eq!(received.headers, sample().headers);
        assert!(received.buffers.is_empty());
        assert!(received.user_data.is_empty());
    }

    #[test]
    fn test_skip_on_receive_keeps_alignment() {
        let mut msg = encode_frame(&sample(), &FrameOptions::new());

        let mut received = Frame::new();
        received.headers.push(ImageHeader::new(9, 9, 9, 9, "stale"));
        received.user_data = "stale".to_string();

        let options = FrameOptions::new().skip_headers(true).skip_user_data(true);
        decode_frame(&mut msg, &mut received, &options).unwrap();

        assert!(received.headers.is_empty());
        assert!(received.user_data.is_empty());
        assert_eq!(received.buffers, sample().buffers);
        assert!(msg.is_empty());
    }

    #[test]
    fn test_borrowed_slots_filled_in_place() {
        let mut msg = encode_frame(&sample(), &FrameOptions::new());

        let mut first = [0u8; 16];
        {
            let mut received = Frame::new();
            received.buffers.push(ImageBuffer::borrowed(&mut first));
            decode_frame(&mut msg, &mut received, &FrameOptions::new()).unwrap();

            assert!(received.buffers[0].is_borrowed());
            assert_eq!(received.buffers[0].len(), 4);
            assert!(!received.buffers[1].is_borrowed());
            assert_eq!(received.buffers[1].as_slice(), &[5u8; 6]);
        }
        assert_eq!(&first[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_borrowed_overflow_truncates() {
        let mut msg = encode_frame(&sample(), &FrameOptions::new());

        let mut small = [0u8; 3];
        let mut tail = [0u8; 2];
        {
            let mut received = Frame::new();
            received.buffers.push(ImageBuffer::borrowed(&mut small));
            received.buffers.push(ImageBuffer::borrowed(&mut tail));

            let err = decode_frame(&mut msg, &mut received, &FrameOptions::new()).unwrap_err();
            assert!(matches!(
                err,
                Error::CapacityExceeded {
                    index: 0,
                    capacity: 3,
                    received: 4
                }
            ));
            // Decoding went on past the first overflow
            assert_eq!(received.user_data, "seq=7");
            assert_eq!(received.buffers[1].len(), 2);
        }
        assert_eq!(small, [1, 2, 3]);
        assert_eq!(tail, [5, 5]);
    }

    #[test]
    fn test_surplus_slots_dropped() {
        let mut msg = encode_frame(&Frame::new(), &FrameOptions::new());

        let mut received = sample();
        decode_frame(&mut msg, &mut received, &FrameOptions::new()).unwrap();
        assert_eq!(received, Frame::new());
    }

    #[test]
    fn test_missing_delimiter_tolerated() {
        let mut msg = Message::new();
        msg.push_text("meta");
        msg.push_text(0);
        msg.push_text(0);

        let mut received = Frame::new();
        decode_frame(&mut msg, &mut received, &FrameOptions::new()).unwrap();
        assert_eq!(received.user_data, "meta");
    }

    #[test]
    fn test_truncated_envelope_fails() {
        let mut msg = Message::new();
        msg.push_empty();
        msg.push_text(2);
        msg.push_text(ImageHeader::new(1, 1, 1, 1, "a"));

        let mut received = Frame::new();
        assert!(matches!(
            decode_frame(&mut msg, &mut received, &FrameOptions::new()),
            Err(Error::MissingPart)
        ));
    }

    fn options_from_mask(mask: u8) -> FrameOptions {
        FrameOptions::new()
            .skip_headers(mask & 1 != 0)
            .skip_buffers(mask & 2 != 0)
            .skip_user_data(mask & 4 != 0)
    }

    fn stale_frame() -> Frame<'static> {
        Frame::with_parts(
            vec![ImageHeader::new(9, 9, 9, 9, "stale")],
            vec![ImageBuffer::from(vec![9u8; 3])],
            "stale",
        )
    }

    /// Decode into a frame holding leftovers from an earlier receive
    fn check_roundtrip(frame: &Frame<'_>, options: &FrameOptions) -> Frame<'static> {
        let mut msg = encode_frame(frame, options);
        let mut received = stale_frame();
        decode_frame(&mut msg, &mut received, options).unwrap();
        assert!(msg.is_empty());
        received
    }

    #[test]
    fn test_every_skip_combination() {
        let frame = sample();

        for mask in 0..8 {
            let options = options_from_mask(mask);
            let received = check_roundtrip(&frame, &options);

            let headers = if options.skip_headers { vec![] } else { frame.headers.clone() };
            let user_data = if options.skip_user_data { "" } else { "seq=7" };
            assert_eq!(received.headers, headers, "mask {}", mask);
            assert_eq!(received.user_data, user_data, "mask {}", mask);
            if options.skip_buffers {
                assert!(received.buffers.is_empty(), "mask {}", mask);
            } else {
                assert_eq!(received.buffers, frame.buffers, "mask {}", mask);
            }
        }
    }

    fn arb_header() -> impl Strategy<Value = ImageHeader> {
        (0u32..4096, 0u32..4096, 0u32..8, 0u32..8, "[A-Za-z0-9_.-]{0,16}")
            .prop_map(|(w, h, c, bpc, name)| ImageHeader::new(w, h, c, bpc, name))
    }

    fn arb_frame() -> impl Strategy<Value = Frame<'static>> {
        (
            prop::collection::vec(arb_header(), 0..5),
            prop::collection::vec(prop::collection::vec(any::<u8>(), 0..256), 0..5),
            any::<String>(),
        )
            .prop_map(|(headers, buffers, user_data)| {
                let buffers = buffers.into_iter().map(ImageBuffer::from).collect();
                Frame::with_parts(headers, buffers, user_data)
            })
    }

    proptest! {
        #[test]
        fn prop_decode_restores_sent_sections(frame in arb_frame(), mask in 0u8..8) {
            let options = options_from_mask(mask);
            let mut msg = encode_frame(&frame, &options);
            let mut received = stale_frame();

            prop_assert!(decode_frame(&mut msg, &mut received, &options).is_ok());
            prop_assert!(msg.is_empty());

            if options.skip_headers {
                prop_assert!(received.headers.is_empty());
            } else {
                prop_assert_eq!(&received.headers, &frame.headers);
            }
            if options.skip_buffers {
                prop_assert!(received.buffers.is_empty());
            } else {
                prop_assert_eq!(&received.buffers, &frame.buffers);
            }
            if options.skip_user_data {
                prop_assert_eq!(received.user_data.as_str(), "");
            } else {
                prop_assert_eq!(&received.user_data, &frame.user_data);
            }
        }
    }
}
