use std::time::Duration;

use dmr_alias::dataset::{RefreshConfig, Refresher, build_flat, build_structured};
use dmr_alias::domain::{Field, Kind};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// radioid.net exports for the United States.
const DEFAULT_PEER_URL: &str = "https://radioid.net/api/dmr/repeater/?country=united%20states";
const DEFAULT_SUBSCRIBER_URL: &str = "https://radioid.net/api/dmr/user/?country=united%20states";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage_dir = std::env::var("ALIAS_STORAGE_DIR").unwrap_or_else(|_| "/tmp/".to_string());
    let peer_url =
        std::env::var("ALIAS_PEER_URL").unwrap_or_else(|_| DEFAULT_PEER_URL.to_string());
    let subscriber_url = std::env::var("ALIAS_SUBSCRIBER_URL")
        .unwrap_or_else(|_| DEFAULT_SUBSCRIBER_URL.to_string());

    // Refresh both datasets unconditionally, as a periodic caller would.
    for (file, url) in [
        ("peers.json", peer_url.as_str()),
        ("subscribers.json", subscriber_url.as_str()),
    ] {
        let config =
            RefreshConfig::new(&storage_dir, file, url).with_stale_after(Duration::ZERO);
        let refresher = Refresher::new(config).expect("failed to build HTTP client");
        info!(file, outcome = %refresher.refresh(), "refresh finished");
    }

    let peer_ids = build_flat(&storage_dir, "peers.json").expect("malformed peer dataset");
    let subscriber_ids =
        build_flat(&storage_dir, "subscribers.json").expect("malformed subscriber dataset");
    let full_subscriber_ids = build_structured(&storage_dir, "subscribers.json", Kind::Subscriber)
        .expect("malformed subscriber dataset");

    info!(
        peers = peer_ids.len(),
        subscribers = subscriber_ids.len(),
        "alias indexes built"
    );

    // A raw 3-byte wire id, and a numeric id with field projection.
    let by_bytes = subscriber_ids
        .resolve(b"\x2f\x9b\xe5", &[])
        .expect("3-byte id is always in range");
    info!(?by_bytes, "lookup of raw id 2f9be5");

    let by_id = full_subscriber_ids
        .resolve(3_120_101u32, &[Field::Callsign, Field::Name])
        .expect("numeric id is always in range");
    info!(?by_id, "lookup of id 3120101");
}
