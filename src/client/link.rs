use uuid::Uuid;

use super::error::invalid;
use super::{Client, ClientError, ListQuery};
use crate::model::{Link, LinkChange, LinkFilter};
use crate::wire::{LinkEnvelope, LinkRequest, LinksEnvelope};

const ENTITY: &str = "link";

impl Client {
    pub async fn list_links(&self, filter: &LinkFilter) -> Result<Vec<Link>, ClientError> {
        const OP: &str = "list links";
        let query = ListQuery::default()
            .text("name", &filter.name)
            .id("ownerID", filter.owner_id)
            .id("locationID", filter.location_id)
            .id("destinationID", filter.destination_id)
            .page(filter.page);
        let env: LinksEnvelope = self
            .send(OP, self.http.get(self.collection(ENTITY)).query(query.pairs()))
            .await?;
        env.links
            .into_iter()
            .map(Link::try_from)
            .collect::<Result<_, _>>()
            .map_err(invalid(OP))
    }

    pub async fn get_link(&self, id: Uuid) -> Result<Link, ClientError> {
        const OP: &str = "get link";
        let env: LinkEnvelope = self.send(OP, self.http.get(self.member(ENTITY, id))).await?;
        Link::try_from(env.link).map_err(invalid(OP))
    }

    pub async fn create_link(&self, change: &LinkChange) -> Result<Link, ClientError> {
        const OP: &str = "create link";
        let req = self.http.post(self.collection(ENTITY)).json(&LinkRequest::from(change));
        let env: LinkEnvelope = self.send(OP, req).await?;
        Link::try_from(env.link).map_err(invalid(OP))
    }

    pub async fn update_link(&self, id: Uuid, change: &LinkChange) -> Result<Link, ClientError> {
        const OP: &str = "update link";
        let req = self.http.put(self.member(ENTITY, id)).json(&LinkRequest::from(change));
        let env: LinkEnvelope = self.send(OP, req).await?;
        Link::try_from(env.link).map_err(invalid(OP))
    }

    pub async fn remove_link(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty("remove link", self.http.delete(self.member(ENTITY, id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::serve_mocks;
    use crate::error::AppError;
    use crate::handlers::test_support::MockStores;
    use crate::model::{Link, LinkChange, LinkFilter, NOBODY, NOWHERE};
    use chrono::Utc;
    use uuid::Uuid;

    fn change(destination_id: Uuid) -> LinkChange {
        LinkChange {
            name: "north".into(),
            description: "A narrow stair.".into(),
            owner_id: NOBODY,
            location_id: NOWHERE,
            destination_id,
        }
    }

    #[tokio::test]
    async fn create_update_and_list_links() {
        let hall = Uuid::new_v4();
        let id = Uuid::new_v4();
        let stored = move |c: LinkChange| Link {
            id,
            name: c.name,
            description: c.description,
            owner_id: c.owner_id,
            location_id: c.location_id,
            destination_id: c.destination_id,
            created: Utc::now(),
            updated: Utc::now(),
        };
        let mut stores = MockStores::default();
        stores.links.expect_create().returning(move |c| Ok(stored(c)));
        stores
            .links
            .expect_update()
            .withf(move |got, c| *got == id && c.destination_id == NOWHERE)
            .returning(move |_, c| Ok(stored(c)));
        stores
            .links
            .expect_list()
            .withf(move |f| f.destination_id == Some(hall) && f.location_id.is_none())
            .returning(move |_| Ok(vec![stored(change(hall))]));
        let client = serve_mocks(stores).await;

        let created = client.create_link(&change(hall)).await.unwrap();
        assert_eq!(created.id, id);
        assert_eq!(created.destination_id, hall);
        assert_eq!(created.description, "A narrow stair.");

        let updated = client.update_link(id, &change(NOWHERE)).await.unwrap();
        assert_eq!(updated.destination_id, NOWHERE);

        let filter = LinkFilter {
            destination_id: Some(hall),
            ..LinkFilter::default()
        };
        let links = client.list_links(&filter).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].destination_id, hall);
    }

    #[tokio::test]
    async fn missing_destination_error_reaches_the_caller() {
        let ghost = Uuid::new_v4();
        let mut stores = MockStores::default();
        stores.links.expect_create().returning(|c| {
            Err(AppError::BadRequest(format!(
                "invalid reference: destinationID '{}' does not exist",
                c.destination_id
            )))
        });
        let client = serve_mocks(stores).await;
        let err = client.create_link(&change(ghost)).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            format!(
                "failed to create link: bad request: invalid reference: destinationID '{}' does not exist",
                ghost
            )
        );
    }

    #[tokio::test]
    async fn get_and_remove_link() {
        let id = Uuid::new_v4();
        let mut stores = MockStores::default();
        stores.links.expect_get().returning(move |id| {
            Ok(Link {
                id,
                name: "north".into(),
                description: String::new(),
                owner_id: NOBODY,
                location_id: NOWHERE,
                destination_id: NOWHERE,
                created: Utc::now(),
                updated: Utc::now(),
            })
        });
        stores.links.expect_remove().withf(move |got| *got == id).returning(|_| Ok(()));
        let client = serve_mocks(stores).await;
        assert_eq!(client.get_link(id).await.unwrap().id, id);
        client.remove_link(id).await.unwrap();
    }
}
