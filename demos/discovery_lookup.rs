//! Discovery demo - advertise a reliable image server and look it up by name
//!
//! Run with: cargo run --example discovery_lookup [NAME]
//!
//! ```text
//!   ReliableImageServer ── register ──► DiscoveryServer ◄── find ── DiscoveryClient
//!          ▲                                                             │
//!          └────────────── ready / frame ◄── ReliableImageClient ◄───────┘
//! ```

use imagebabble::{
    DiscoveryClient, DiscoveryInfo, DiscoveryServer, Frame, FrameOptions, ImageBuffer,
    ImageClient, ImageHeader, ImageServer, ReliableImageClient, ReliableImageServer, Timeout,
    DEFAULT_DISCOVERY_ENDPOINT,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "front-cam".to_string());

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("imagebabble=info".parse()?),
        )
        .init();

    let mut directory = DiscoveryServer::new();
    directory.startup(DEFAULT_DISCOVERY_ENDPOINT).await?;
    let directory_endpoint = directory
        .address()
        .map(ToString::to_string)
        .unwrap_or_default();

    // Answer discovery requests in the background
    let directory_task = tokio::spawn(async move {
        loop {
            if let Err(e) = directory.process_events(Timeout::from_millis(100)).await {
                eprintln!("Discovery server failed: {}", e);
                break;
            }
        }
    });

    let mut image_server = ReliableImageServer::new();
    image_server.startup("tcp://127.0.0.1:0").await?;

    let mut lookup = DiscoveryClient::new();
    lookup.startup(&directory_endpoint).await?;

    let advertised = DiscoveryInfo::for_server(name.clone(), &image_server)?;
    lookup
        .register_server(&advertised, Timeout::from_millis(1000))
        .await?;
    println!("Registered {}", advertised);

    let mut client = ReliableImageClient::new();
    let query = DiscoveryInfo::for_client(name.clone(), &client);
    let found = lookup.find_servers(&query, Timeout::from_millis(1000)).await?;
    let Some(target) = found.first() else {
        println!("No server named {}", name);
        return Ok(());
    };
    println!("Found {} at {}", target.name, target.address);

    client.startup(&target.address).await?;
    let receiver = tokio::spawn(async move {
        let mut frame = Frame::new();
        client
            .receive(&mut frame, Timeout::from_millis(2000), &FrameOptions::new())
            .await
            .map(|()| frame.user_data)
    });

    let mut frame = Frame::new();
    frame.push_image(
        ImageHeader::new(64, 48, 3, 1, "rgb"),
        ImageBuffer::from(vec![128u8; 64 * 48 * 3]),
    );
    frame.user_data = "hello".to_string();
    image_server
        .publish(&frame, Timeout::from_millis(2000), 1, &FrameOptions::new())
        .await?;

    println!("Client received: {}", receiver.await??);

    lookup
        .unregister_server(&advertised, Timeout::from_millis(1000))
        .await?;
    println!("Unregistered {}", advertised.address);

    directory_task.abort();
    Ok(())
}
