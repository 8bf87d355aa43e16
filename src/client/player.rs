use uuid::Uuid;

use super::error::invalid;
use super::{Client, ClientError, ListQuery};
use crate::model::{Player, PlayerChange, PlayerFilter};
use crate::wire::{PlayerEnvelope, PlayerRequest, PlayersEnvelope};

const ENTITY: &str = "player";

impl Client {
    pub async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, ClientError> {
        const OP: &str = "list players";
        let query = ListQuery::default()
            .text("name", &filter.name)
            .id("homeID", filter.home_id)
            .id("locationID", filter.location_id)
            .page(filter.page);
        let env: PlayersEnvelope = self
            .send(OP, self.http.get(self.collection(ENTITY)).query(query.pairs()))
            .await?;
        env.players
            .into_iter()
            .map(Player::try_from)
            .collect::<Result<_, _>>()
            .map_err(invalid(OP))
    }

    pub async fn get_player(&self, id: Uuid) -> Result<Player, ClientError> {
        const OP: &str = "get player";
        let env: PlayerEnvelope = self.send(OP, self.http.get(self.member(ENTITY, id))).await?;
        Player::try_from(env.player).map_err(invalid(OP))
    }

    pub async fn create_player(&self, change: &PlayerChange) -> Result<Player, ClientError> {
        const OP: &str = "create player";
        let req = self.http.post(self.collection(ENTITY)).json(&PlayerRequest::from(change));
        let env: PlayerEnvelope = self.send(OP, req).await?;
        Player::try_from(env.player).map_err(invalid(OP))
    }

    pub async fn update_player(&self, id: Uuid, change: &PlayerChange) -> Result<Player, ClientError> {
        const OP: &str = "update player";
        let req = self.http.put(self.member(ENTITY, id)).json(&PlayerRequest::from(change));
        let env: PlayerEnvelope = self.send(OP, req).await?;
        Player::try_from(env.player).map_err(invalid(OP))
    }

    pub async fn remove_player(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty("remove player", self.http.delete(self.member(ENTITY, id))).await
    }
}
