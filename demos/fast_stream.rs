//! Fast stream demo - publishes synthetic gray frames and reads them back
//!
//! Run with: cargo run --example fast_stream [ENDPOINT] [FRAMES]
//!
//! Examples:
//!   cargo run --example fast_stream                            # tcp://127.0.0.1:5562, 20 frames
//!   cargo run --example fast_stream tcp://127.0.0.1:5600 100
//!
//! ```text
//!   FastImageServer ──── frame ────► FastImageClient
//!     (bind)            (lossy)        (connect)
//! ```
//!
//! The client connects after the server is up, so the first frames may be
//! missed. That is expected with the fast transport.

use std::time::Duration;

use imagebabble::{
    FastImageClient, FastImageServer, Frame, FrameOptions, ImageBuffer, ImageClient, ImageHeader,
    ImageServer, Timeout, DEFAULT_IMAGE_ENDPOINT,
};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn gray_frame(seq: u32) -> Frame<'static> {
    let header = ImageHeader::new(WIDTH, HEIGHT, 1, 1, "gray");
    let pixels = vec![(seq % 256) as u8; header.total_bytes() as usize];

    let mut frame = Frame::new();
    frame.push_image(header, ImageBuffer::from(pixels));
    frame.user_data = format!("seq={}", seq);
    frame
}

fn print_usage() {
    eprintln!("Usage: fast_stream [ENDPOINT] [FRAMES]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  ENDPOINT    Endpoint to bind (default: {})", DEFAULT_IMAGE_ENDPOINT);
    eprintln!("  FRAMES      Number of frames to publish (default: 20)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let endpoint = args.get(1).map(String::as_str).unwrap_or(DEFAULT_IMAGE_ENDPOINT);
    let frames: u32 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 20,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("imagebabble=info".parse()?),
        )
        .init();

    let mut server = FastImageServer::new();
    server.startup(endpoint).await?;

    let mut client = FastImageClient::new();
    client
        .startup(&server.address().map(ToString::to_string).unwrap_or_default())
        .await?;

    let options = FrameOptions::new();
    let mut received = Frame::new();
    let mut seen = 0;

    for seq in 0..frames {
        server
            .publish(&gray_frame(seq), Timeout::Immediate, 0, &options)
            .await?;

        match client
            .receive(&mut received, Timeout::from_millis(50), &options)
            .await
        {
            Ok(()) => {
                seen += 1;
                println!(
                    "{}: {} image(s), {} bytes",
                    received.user_data,
                    received.headers.len(),
                    received.payload_len()
                );
            }
            Err(e) if e.is_timeout() => println!("seq={}: nothing received", seq),
            Err(e) => return Err(e.into()),
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    println!("Received {} of {} frames", seen, frames);
    Ok(())
}
