use uuid::Uuid;

use super::error::invalid;
use super::{Client, ClientError, ListQuery};
use crate::model::{Item, ItemChange, ItemFilter};
use crate::wire::{ItemEnvelope, ItemRequest, ItemsEnvelope};

const ENTITY: &str = "item";

impl Client {
    /// A location filter is sent as the `locationID` + `locationType` pair.
    pub async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, ClientError> {
        const OP: &str = "list items";
        let mut query = ListQuery::default()
            .text("name", &filter.name)
            .id("ownerID", filter.owner_id)
            .id("locationID", filter.location.map(|l| l.id()))
            .page(filter.page);
        if let Some(location) = filter.location {
            query.0.push(("locationType", location.kind().as_str().to_string()));
        }
        let env: ItemsEnvelope = self
            .send(OP, self.http.get(self.collection(ENTITY)).query(query.pairs()))
            .await?;
        env.items
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<_, _>>()
            .map_err(invalid(OP))
    }

    pub async fn get_item(&self, id: Uuid) -> Result<Item, ClientError> {
        const OP: &str = "get item";
        let env: ItemEnvelope = self.send(OP, self.http.get(self.member(ENTITY, id))).await?;
        Item::try_from(env.item).map_err(invalid(OP))
    }

    pub async fn create_item(&self, change: &ItemChange) -> Result<Item, ClientError> {
        const OP: &str = "create item";
        let req = self.http.post(self.collection(ENTITY)).json(&ItemRequest::from(change));
        let env: ItemEnvelope = self.send(OP, req).await?;
        Item::try_from(env.item).map_err(invalid(OP))
    }

    pub async fn update_item(&self, id: Uuid, change: &ItemChange) -> Result<Item, ClientError> {
        const OP: &str = "update item";
        let req = self.http.put(self.member(ENTITY, id)).json(&ItemRequest::from(change));
        let env: ItemEnvelope = self.send(OP, req).await?;
        Item::try_from(env.item).map_err(invalid(OP))
    }

    pub async fn remove_item(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty("remove item", self.http.delete(self.member(ENTITY, id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::serve_mocks;
    use crate::handlers::test_support::MockStores;
    use crate::model::{Item, ItemChange, ItemFilter, Location, NOBODY, NOTHING};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn item_location_survives_the_round_trip() {
        let mut stores = MockStores::default();
        stores
            .items
            .expect_create()
            .withf(|c| c.location == Location::Item(NOTHING))
            .returning(|c| {
                Ok(Item {
                    id: Uuid::new_v4(),
                    name: c.name,
                    description: c.description,
                    owner_id: c.owner_id,
                    location: c.location,
                    created: Utc::now(),
                    updated: Utc::now(),
                })
            });
        let client = serve_mocks(stores).await;
        let change = ItemChange {
            name: "key".into(),
            description: "small and brass".into(),
            owner_id: NOBODY,
            location: Location::Item(NOTHING),
        };
        let item = client.create_item(&change).await.unwrap();
        assert_eq!(item.location, Location::Item(NOTHING));
        assert_eq!(item.description, "small and brass");
    }

    #[tokio::test]
    async fn location_filter_sends_id_and_type() {
        let carrier = Uuid::new_v4();
        let mut stores = MockStores::default();
        stores
            .items
            .expect_list()
            .withf(move |f| f.location == Some(Location::Player(carrier)) && f.owner_id.is_none())
            .returning(|_| Ok(Vec::new()));
        let client = serve_mocks(stores).await;
        let filter = ItemFilter {
            location: Some(Location::Player(carrier)),
            ..ItemFilter::default()
        };
        assert!(client.list_items(&filter).await.unwrap().is_empty());
    }
}
