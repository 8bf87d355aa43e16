use uuid::Uuid;

use super::error::invalid;
use super::{Client, ClientError, ListQuery};
use crate::model::{User, UserChange, UserFilter};
use crate::wire::{UserEnvelope, UserRequest, UsersEnvelope};

const ENTITY: &str = "user";

impl Client {
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, ClientError> {
        const OP: &str = "list users";
        let query = ListQuery::default()
            .text("account", &filter.account)
            .id("playerID", filter.player_id)
            .page(filter.page);
        let env: UsersEnvelope = self
            .send(OP, self.http.get(self.collection(ENTITY)).query(query.pairs()))
            .await?;
        env.users
            .into_iter()
            .map(User::try_from)
            .collect::<Result<_, _>>()
            .map_err(invalid(OP))
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, ClientError> {
        const OP: &str = "get user";
        let env: UserEnvelope = self.send(OP, self.http.get(self.member(ENTITY, id))).await?;
        User::try_from(env.user).map_err(invalid(OP))
    }

    pub async fn create_user(&self, change: &UserChange) -> Result<User, ClientError> {
        const OP: &str = "create user";
        let req = self.http.post(self.collection(ENTITY)).json(&UserRequest::from(change));
        let env: UserEnvelope = self.send(OP, req).await?;
        User::try_from(env.user).map_err(invalid(OP))
    }

    pub async fn update_user(&self, id: Uuid, change: &UserChange) -> Result<User, ClientError> {
        const OP: &str = "update user";
        let req = self.http.put(self.member(ENTITY, id)).json(&UserRequest::from(change));
        let env: UserEnvelope = self.send(OP, req).await?;
        User::try_from(env.user).map_err(invalid(OP))
    }

    pub async fn remove_user(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty("remove user", self.http.delete(self.member(ENTITY, id))).await
    }
}
