//! Client for the supported game catalog.

use fleetdeck_api_models::{GameType, GameTypeList};

use crate::error::ApiResult;
use crate::facade::Facade;

/// Game type catalog client.
#[derive(Debug, Clone)]
pub struct GameTypesApi {
    facade: Facade,
}

impl GameTypesApi {
    /// Client over `facade`.
    #[must_use]
    pub const fn new(facade: Facade) -> Self {
        Self { facade }
    }

    /// Game types the backend supports, accepting wrapped or bare listings.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn list(&self) -> ApiResult<Vec<GameType>> {
        let list: GameTypeList = self.facade.get_json("/api/v1/game-types").await?;
        Ok(list.into_game_types())
    }
}
