//! Application state shared with the host engine

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::config::{Config, GamesFile};
use crate::events::HungerPinDispatcher;
use crate::game::{HostGateway, MatchRegistry, Position};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<MatchRegistry>,
    pub hunger: Arc<HungerPinDispatcher>,
}

impl AppState {
    pub fn new(config: Config, games: &GamesFile, gateway: Arc<dyn HostGateway>) -> Self {
        let config = Arc::new(config);

        // Initialize the match registry from the games file
        let registry = Arc::new(MatchRegistry::from_games_file(games, gateway));

        // Event dispatchers take the registry by explicit reference
        let hunger = Arc::new(HungerPinDispatcher::new(registry.clone()));

        Self {
            config,
            registry,
            hunger,
        }
    }
}

/// Gateway that logs host calls instead of performing them.
///
/// Stands in for the host engine when the server runs outside one, and in
/// local development.
#[derive(Debug, Default)]
pub struct LogGateway;

impl HostGateway for LogGateway {
    fn create_world(&self, world_name: &str) {
        debug!(world = %world_name, "create_world");
    }

    fn teleport(&self, player_id: Uuid, world_name: &str, position: Position) {
        debug!(
            player_id = %player_id,
            world = %world_name,
            x = position.x,
            y = position.y,
            z = position.z,
            "teleport"
        );
    }

    fn send_chat(&self, player_id: Uuid, message: &str) {
        debug!(player_id = %player_id, %message, "chat");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testutil::game_config;

    #[test]
    fn state_wires_registry_and_dispatcher() {
        let file = GamesFile {
            games: [("classic".to_string(), game_config(2, 4, 2, false))]
                .into_iter()
                .collect(),
        };

        let state = AppState::new(Config::from_env(), &file, Arc::new(LogGateway));
        assert_eq!(state.registry.active_matches(), 1);
        assert!(state.registry.get_by_name("classic").is_some());
    }
}
