use uuid::Uuid;

use super::error::invalid;
use super::{Client, ClientError, ListQuery};
use crate::model::{Room, RoomChange, RoomFilter};
use crate::wire::{RoomEnvelope, RoomRequest, RoomsEnvelope};

const ENTITY: &str = "room";

impl Client {
    pub async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, ClientError> {
        const OP: &str = "list rooms";
        let query = ListQuery::default()
            .text("name", &filter.name)
            .id("ownerID", filter.owner_id)
            .id("parentID", filter.parent_id)
            .page(filter.page);
        let env: RoomsEnvelope = self
            .send(OP, self.http.get(self.collection(ENTITY)).query(query.pairs()))
            .await?;
        env.rooms
            .into_iter()
            .map(Room::try_from)
            .collect::<Result<_, _>>()
            .map_err(invalid(OP))
    }

    pub async fn get_room(&self, id: Uuid) -> Result<Room, ClientError> {
        const OP: &str = "get room";
        let env: RoomEnvelope = self.send(OP, self.http.get(self.member(ENTITY, id))).await?;
        Room::try_from(env.room).map_err(invalid(OP))
    }

    pub async fn create_room(&self, change: &RoomChange) -> Result<Room, ClientError> {
        const OP: &str = "create room";
        let req = self.http.post(self.collection(ENTITY)).json(&RoomRequest::from(change));
        let env: RoomEnvelope = self.send(OP, req).await?;
        Room::try_from(env.room).map_err(invalid(OP))
    }

    pub async fn update_room(&self, id: Uuid, change: &RoomChange) -> Result<Room, ClientError> {
        const OP: &str = "update room";
        let req = self.http.put(self.member(ENTITY, id)).json(&RoomRequest::from(change));
        let env: RoomEnvelope = self.send(OP, req).await?;
        Room::try_from(env.room).map_err(invalid(OP))
    }

    pub async fn remove_room(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty("remove room", self.http.delete(self.member(ENTITY, id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::serve_mocks;
    use crate::handlers::test_support::MockStores;
    use crate::model::{Page, Room, RoomFilter, NOBODY, NOWHERE};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn list_rooms_by_parent_with_paging() {
        let outside = Uuid::new_v4();
        let home = Room {
            id: Uuid::new_v4(),
            name: "Alice's Home".into(),
            description: String::new(),
            owner_id: NOBODY,
            parent_id: outside,
            created: Utc::now(),
            updated: Utc::now(),
        };
        let mut stores = MockStores::default();
        let listed = home.clone();
        stores
            .rooms
            .expect_list()
            .withf(move |f| f.parent_id == Some(outside) && f.page == Page { offset: 0, limit: 5 })
            .returning(move |_| Ok(vec![listed.clone()]));
        let client = serve_mocks(stores).await;
        let filter = RoomFilter {
            parent_id: Some(outside),
            page: Page { offset: 0, limit: 5 },
            ..RoomFilter::default()
        };
        let rooms = client.list_rooms(&filter).await.unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, home.id);
        assert_eq!(rooms[0].parent_id, outside);
        assert_ne!(rooms[0].parent_id, NOWHERE);
    }
}
