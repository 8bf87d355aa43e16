//! Storage round trips against a live Postgres.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Every test names its rows with a fresh suffix so they can share one database.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;
use worldstore::error::ErrorKind;
use worldstore::model::{
    ItemChange, ItemFilter, LinkChange, LinkFilter, Location, Page, PlayerChange, PlayerFilter, RoomChange,
    RoomFilter, UserChange, NOBODY, NOTHING, NOWHERE,
};
use worldstore::store::{
    ItemStore, LinkStore, PgItemStore, PgLinkStore, PgPlayerStore, PgRoomStore, PgUserStore, PlayerStore,
    RoomStore, UserStore,
};
use worldstore::{ensure_database_exists, run_migrations, Dialect};

async fn test_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    ensure_database_exists(&url).await.expect("create test database");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect to test database");
    run_migrations(&pool, Dialect::Postgres).await.expect("migrate");
    pool
}

/// A pool on a brand-new database next to the one in `TEST_DATABASE_URL`,
/// for tests that count every row of a table.
async fn fresh_database() -> (PgPool, String) {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let (head, query) = match url.split_once('?') {
        Some((head, q)) => (head.to_string(), format!("?{}", q)),
        None => (url.clone(), String::new()),
    };
    let base = &head[..head.rfind('/').expect("database path in TEST_DATABASE_URL") + 1];
    let name = format!("worldstore_{}", Uuid::new_v4().simple());
    let fresh_url = format!("{}{}{}", base, name, query);
    ensure_database_exists(&fresh_url).await.expect("create fresh database");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&fresh_url)
        .await
        .expect("connect to fresh database");
    run_migrations(&pool, Dialect::Postgres).await.expect("migrate fresh database");
    (pool, name)
}

async fn drop_database(pool: PgPool, name: &str) {
    pool.close().await;
    let admin = test_pool().await;
    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{}\"", name))
        .execute(&admin)
        .await
        .expect("drop fresh database");
}

fn unique(name: &str) -> String {
    format!("{} {}", name, Uuid::new_v4())
}

fn room(name: &str, owner_id: Uuid, parent_id: Uuid) -> RoomChange {
    RoomChange {
        name: name.to_string(),
        description: String::new(),
        owner_id,
        parent_id,
    }
}

fn player(name: &str) -> PlayerChange {
    PlayerChange {
        name: name.to_string(),
        description: String::new(),
        home_id: NOWHERE,
        location_id: NOWHERE,
    }
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn room_create_get_update_remove() {
    let pool = test_pool().await;
    let rooms = PgRoomStore::new(pool, Dialect::Postgres);

    let created = rooms.create(room(&unique("Hall"), NOBODY, NOWHERE)).await.unwrap();
    assert!(!created.id.is_nil());
    assert_ne!(created.id, NOWHERE);
    assert_eq!(rooms.get(created.id).await.unwrap(), created);

    let mut change = room(&unique("Great Hall"), NOBODY, NOWHERE);
    change.description = "Banners hang from the rafters.".into();
    let updated = rooms.update(created.id, change.clone()).await.unwrap();
    assert_eq!(updated.name, change.name);
    assert_eq!(updated.description, change.description);
    assert_eq!(updated.created, created.created);
    assert!(updated.updated >= created.updated);

    rooms.remove(created.id).await.unwrap();
    let err = rooms.get(created.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = rooms.remove(created.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn duplicate_name_is_bad_request_naming_the_value() {
    let pool = test_pool().await;
    let players = PgPlayerStore::new(pool, Dialect::Postgres);
    let name = unique("Bob");
    players.create(player(&name)).await.unwrap();
    let err = players.create(player(&name)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(err.to_string().contains(&name));
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn unknown_reference_is_bad_request_naming_the_id() {
    let pool = test_pool().await;
    let rooms = PgRoomStore::new(pool, Dialect::Postgres);
    let ghost = Uuid::new_v4();
    let err = rooms.create(room(&unique("Attic"), NOBODY, ghost)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(err.to_string().contains(&ghost.to_string()));

    let existing = rooms.create(room(&unique("Cellar"), NOBODY, NOWHERE)).await.unwrap();
    let err = rooms
        .update(existing.id, room(&existing.name, ghost, NOWHERE))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(err.to_string().contains(&ghost.to_string()));
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn removing_referents_resets_to_sentinels() {
    let pool = test_pool().await;
    let players = PgPlayerStore::new(pool.clone(), Dialect::Postgres);
    let rooms = PgRoomStore::new(pool.clone(), Dialect::Postgres);
    let items = PgItemStore::new(pool, Dialect::Postgres);

    let owner = players.create(player(&unique("Owner"))).await.unwrap();
    let parent = rooms.create(room(&unique("Parent"), NOBODY, NOWHERE)).await.unwrap();
    let child = rooms.create(room(&unique("Child"), owner.id, parent.id)).await.unwrap();
    let carried = items
        .create(ItemChange {
            name: unique("Lantern"),
            description: String::new(),
            owner_id: owner.id,
            location: Location::Player(owner.id),
        })
        .await
        .unwrap();
    let on_floor = items
        .create(ItemChange {
            name: unique("Rug"),
            description: String::new(),
            owner_id: NOBODY,
            location: Location::Room(parent.id),
        })
        .await
        .unwrap();

    rooms.remove(parent.id).await.unwrap();
    assert_eq!(rooms.get(child.id).await.unwrap().parent_id, NOWHERE);
    assert_eq!(items.get(on_floor.id).await.unwrap().location, Location::Room(NOWHERE));

    players.remove(owner.id).await.unwrap();
    assert_eq!(rooms.get(child.id).await.unwrap().owner_id, NOBODY);
    let carried = items.get(carried.id).await.unwrap();
    assert_eq!(carried.owner_id, NOBODY);
    assert_eq!(carried.location, Location::Player(NOBODY));
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn item_inside_item_falls_back_to_nothing() {
    let pool = test_pool().await;
    let items = PgItemStore::new(pool, Dialect::Postgres);
    let chest = items
        .create(ItemChange {
            name: unique("Chest"),
            description: String::new(),
            owner_id: NOBODY,
            location: Location::Room(NOWHERE),
        })
        .await
        .unwrap();
    let coin = items
        .create(ItemChange {
            name: unique("Coin"),
            description: String::new(),
            owner_id: NOBODY,
            location: Location::Item(chest.id),
        })
        .await
        .unwrap();

    let inside = items
        .list(ItemFilter {
            location: Some(Location::Item(chest.id)),
            ..ItemFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].id, coin.id);

    items.remove(chest.id).await.unwrap();
    assert_eq!(items.get(coin.id).await.unwrap().location, Location::Item(NOTHING));
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn list_filters_and_pages() {
    let pool = test_pool().await;
    let players = PgPlayerStore::new(pool.clone(), Dialect::Postgres);
    let rooms = PgRoomStore::new(pool, Dialect::Postgres);
    let owner = players.create(player(&unique("Landlord"))).await.unwrap();
    let other = players.create(player(&unique("Tenant"))).await.unwrap();

    let mut owned = Vec::new();
    for n in 0..4 {
        owned.push(rooms.create(room(&unique(&format!("Flat {}", n)), owner.id, NOWHERE)).await.unwrap());
    }
    rooms.create(room(&unique("Shed"), other.id, NOWHERE)).await.unwrap();

    let by_owner = RoomFilter {
        owner_id: Some(owner.id),
        ..RoomFilter::default()
    };
    let all = rooms.list(by_owner.clone()).await.unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), owned.iter().map(|r| r.id).collect::<Vec<_>>());

    let page = rooms
        .list(RoomFilter {
            page: Page { offset: 1, limit: 2 },
            ..by_owner
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, owned[1].id);
    assert_eq!(page[1].id, owned[2].id);

    let named = rooms
        .list(RoomFilter {
            name: Some(owned[3].name.clone()),
            ..RoomFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(named.len(), 1);
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn user_accounts_are_unique_and_point_at_players() {
    let pool = test_pool().await;
    let players = PgPlayerStore::new(pool.clone(), Dialect::Postgres);
    let users = PgUserStore::new(pool, Dialect::Postgres);
    let alice = players.create(player(&unique("Alice"))).await.unwrap();
    let account = unique("alice@example.org");
    let user = users
        .create(UserChange {
            account: account.clone(),
            player_id: alice.id,
        })
        .await
        .unwrap();
    assert_eq!(user.player_id, alice.id);

    let err = users
        .create(UserChange {
            account: account.clone(),
            player_id: NOBODY,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(err.to_string().contains(&account));

    players.remove(alice.id).await.unwrap();
    assert_eq!(users.get(user.id).await.unwrap().player_id, NOBODY);
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn removing_a_referenced_sentinel_is_rejected() {
    let pool = test_pool().await;
    let rooms = PgRoomStore::new(pool, Dialect::Postgres);
    rooms.create(room(&unique("Anchor"), NOBODY, NOWHERE)).await.unwrap();
    let err = rooms.remove(NOWHERE).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(rooms.get(NOWHERE).await.is_ok());
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn alice_moves_into_her_home() {
    let pool = test_pool().await;
    let players = PgPlayerStore::new(pool.clone(), Dialect::Postgres);
    let rooms = PgRoomStore::new(pool, Dialect::Postgres);

    let outside = rooms.create(room(&unique("Outside"), NOBODY, NOWHERE)).await.unwrap();
    let alice = players.create(player(&unique("Alice"))).await.unwrap();
    let home = rooms.create(room(&unique("Alice's Home"), alice.id, outside.id)).await.unwrap();

    let mut change = player(&alice.name);
    change.home_id = home.id;
    change.location_id = home.id;
    let moved = players.update(alice.id, change).await.unwrap();
    assert_eq!(moved.home_id, home.id);
    assert_eq!(moved.location_id, home.id);

    let inside = rooms
        .list(RoomFilter {
            parent_id: Some(outside.id),
            ..RoomFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].id, home.id);
}

fn link(name: &str, location_id: Uuid, destination_id: Uuid) -> LinkChange {
    LinkChange {
        name: name.to_string(),
        description: String::new(),
        owner_id: NOBODY,
        location_id,
        destination_id,
    }
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn link_create_get_update_remove() {
    let pool = test_pool().await;
    let rooms = PgRoomStore::new(pool.clone(), Dialect::Postgres);
    let links = PgLinkStore::new(pool, Dialect::Postgres);
    let hall = rooms.create(room(&unique("Hall"), NOBODY, NOWHERE)).await.unwrap();

    let created = links.create(link(&unique("north"), NOWHERE, hall.id)).await.unwrap();
    assert_eq!(links.get(created.id).await.unwrap(), created);

    let mut change = link(&created.name, hall.id, NOWHERE);
    change.description = "Back the way you came.".into();
    let updated = links.update(created.id, change).await.unwrap();
    assert_eq!(updated.location_id, hall.id);
    assert_eq!(updated.destination_id, NOWHERE);
    assert_eq!(updated.created, created.created);
    assert!(updated.updated >= created.updated);

    links.remove(created.id).await.unwrap();
    assert_eq!(links.get(created.id).await.unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn link_to_missing_room_is_bad_request_naming_the_id() {
    let pool = test_pool().await;
    let links = PgLinkStore::new(pool, Dialect::Postgres);
    let ghost = Uuid::new_v4();
    let err = links.create(link(&unique("void"), NOWHERE, ghost)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(
        err.to_string(),
        format!("bad request: invalid reference: destinationID '{}' does not exist", ghost)
    );
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn removing_rooms_resets_link_ends_to_nowhere() {
    let pool = test_pool().await;
    let rooms = PgRoomStore::new(pool.clone(), Dialect::Postgres);
    let links = PgLinkStore::new(pool, Dialect::Postgres);
    let from = rooms.create(room(&unique("Landing"), NOBODY, NOWHERE)).await.unwrap();
    let to = rooms.create(room(&unique("Loft"), NOBODY, NOWHERE)).await.unwrap();
    let stair = links.create(link(&unique("stair"), from.id, to.id)).await.unwrap();

    rooms.remove(to.id).await.unwrap();
    let stair_now = links.get(stair.id).await.unwrap();
    assert_eq!(stair_now.location_id, from.id);
    assert_eq!(stair_now.destination_id, NOWHERE);

    rooms.remove(from.id).await.unwrap();
    let stair_now = links.get(stair.id).await.unwrap();
    assert_eq!(stair_now.location_id, NOWHERE);
    assert_eq!(stair_now.destination_id, NOWHERE);
}

#[tokio::test]
#[ignore = "requires postgres"]
async fn unfiltered_list_returns_every_row() {
    let (pool, name) = fresh_database().await;
    let players = PgPlayerStore::new(pool.clone(), Dialect::Postgres);
    let links = PgLinkStore::new(pool.clone(), Dialect::Postgres);

    for n in 0..3 {
        links.create(link(&format!("path {}", n), NOWHERE, NOWHERE)).await.unwrap();
    }
    let all = links.list(LinkFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    let filtered = links
        .list(LinkFilter {
            name: Some("path 1".into()),
            ..LinkFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);

    // The sentinel "nobody" is a row like any other.
    players.create(player("Alice")).await.unwrap();
    assert_eq!(players.list(PlayerFilter::default()).await.unwrap().len(), 2);

    drop_database(pool, &name).await;
}
