//! Seed a starter world: an "Outside" room, a player "Alice" and her home inside Outside.
//!
//! Run with the server up: `cargo run -p world-seed`
//! Point it elsewhere with `WORLDSTORE_URL`.

use worldstore::model::{PlayerChange, RoomChange, RoomFilter, NOBODY, NOWHERE};
use worldstore::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("world_seed=info")),
        )
        .init();

    let base_url = std::env::var("WORLDSTORE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".into());
    let client = Client::new(base_url.as_str())?;

    let outside = client
        .create_room(&RoomChange {
            name: "Outside".into(),
            description: "Open sky in every direction.".into(),
            owner_id: NOBODY,
            parent_id: NOWHERE,
        })
        .await?;
    tracing::info!(id = %outside.id, "created room Outside");

    let mut alice_change = PlayerChange {
        name: "Alice".into(),
        description: String::new(),
        home_id: NOWHERE,
        location_id: NOWHERE,
    };
    let alice = client.create_player(&alice_change).await?;
    tracing::info!(id = %alice.id, "created player Alice");

    let home = client
        .create_room(&RoomChange {
            name: "Alice's Home".into(),
            description: String::new(),
            owner_id: alice.id,
            parent_id: outside.id,
        })
        .await?;
    tracing::info!(id = %home.id, "created room Alice's Home");

    alice_change.home_id = home.id;
    alice_change.location_id = home.id;
    client.update_player(alice.id, &alice_change).await?;

    let children = client
        .list_rooms(&RoomFilter {
            parent_id: Some(outside.id),
            ..RoomFilter::default()
        })
        .await?;
    for room in &children {
        tracing::info!(id = %room.id, name = %room.name, "inside Outside");
    }
    tracing::info!(url = %base_url, rooms = children.len(), "world seeded");
    Ok(())
}
