//! Match lifecycle modules

pub mod chat;
pub mod countdown;
pub mod items;
pub mod r#match;
pub mod participant;
pub mod roster;
pub mod spawn;

pub use participant::{Membership, Participant, Team};
pub use r#match::{
    JoinError, JoinOutcome, MatchCore, MatchHandle, MatchPhase, MatchRegistry, TransitionError,
};

use std::str::FromStr;

use uuid::Uuid;

/// World-space coordinates inside an arena world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A position string that could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("malformed position string: {0:?}")]
pub struct PositionParseError(pub String);

impl FromStr for Position {
    type Err = PositionParseError;

    /// Decode "X:<x>,Y:<y>,Z:<z>"
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut axes = [0.0_f64; 3];
        let mut parts = raw.split(',');

        for axis in &mut axes {
            let part = parts.next().ok_or_else(|| PositionParseError(raw.to_string()))?;
            let (_, value) = part
                .split_once(':')
                .ok_or_else(|| PositionParseError(raw.to_string()))?;
            *axis = value
                .trim()
                .parse()
                .map_err(|_| PositionParseError(raw.to_string()))?;
        }

        if parts.next().is_some() {
            return Err(PositionParseError(raw.to_string()));
        }

        Ok(Self {
            x: axes[0],
            y: axes[1],
            z: axes[2],
        })
    }
}

/// Block coordinates, used to key looted chests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Player-count bounds for one match
#[derive(Debug, Clone, Copy)]
pub struct Capacity {
    pub min: usize,
    pub max: usize,
}

/// Capacity bounds that violate `1 <= min <= max`
#[derive(Debug, thiserror::Error)]
#[error("invalid capacity: min {min}, max {max}")]
pub struct InvalidCapacity {
    pub min: usize,
    pub max: usize,
}

impl Capacity {
    pub fn new(min: usize, max: usize) -> Result<Self, InvalidCapacity> {
        if min == 0 || max == 0 || min > max {
            return Err(InvalidCapacity { min, max });
        }
        Ok(Self { min, max })
    }
}

/// Host engine services the match core calls out to.
///
/// All calls are fire-and-forget: delivery problems are the host's concern,
/// never surfaced back into the lifecycle.
pub trait HostGateway: Send + Sync {
    /// Load or create the arena world ahead of play
    fn create_world(&self, world_name: &str);
    /// Move a player to a position in a world
    fn teleport(&self, player_id: Uuid, world_name: &str, position: Position);
    /// Deliver a chat line (with `&` color markup) to one player
    fn send_chat(&self, player_id: Uuid, message: &str);
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use uuid::Uuid;

    use crate::config::GameConfig;

    use super::{HostGateway, Position};

    /// Gateway double that records every outbound call
    #[derive(Default)]
    pub struct RecordingGateway {
        pub worlds: Mutex<Vec<String>>,
        pub teleports: Mutex<Vec<(Uuid, String, Position)>>,
        pub chats: Mutex<Vec<(Uuid, String)>>,
    }

    impl RecordingGateway {
        pub fn chats_for(&self, player_id: Uuid) -> Vec<String> {
            self.chats
                .lock()
                .iter()
                .filter(|(id, _)| *id == player_id)
                .map(|(_, msg)| msg.clone())
                .collect()
        }

        pub fn teleports_for(&self, player_id: Uuid) -> Vec<Position> {
            self.teleports
                .lock()
                .iter()
                .filter(|(id, _, _)| *id == player_id)
                .map(|(_, _, pos)| *pos)
                .collect()
        }
    }

    impl HostGateway for RecordingGateway {
        fn create_world(&self, world_name: &str) {
            self.worlds.lock().push(world_name.to_string());
        }

        fn teleport(&self, player_id: Uuid, world_name: &str, position: Position) {
            self.teleports
                .lock()
                .push((player_id, world_name.to_string(), position));
        }

        fn send_chat(&self, player_id: Uuid, message: &str) {
            self.chats.lock().push((player_id, message.to_string()));
        }
    }

    pub fn gateway() -> Arc<RecordingGateway> {
        Arc::new(RecordingGateway::default())
    }

    pub fn game_config(min: usize, max: usize, spawn_count: usize, team: bool) -> GameConfig {
        GameConfig {
            display_name: "Test Arena".to_string(),
            max_players: max,
            min_players: min,
            world_name: "sky_test".to_string(),
            lobby_point: "X:0,Y:80,Z:0".to_string(),
            spawn_points: (0..spawn_count)
                .map(|i| format!("X:{i},Y:64,Z:{i}"))
                .collect(),
            is_team_game: team,
            normal_items: Vec::new(),
            rare_items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_decodes_axis_labels() {
        let pos: Position = "X:12.5,Y:64,Z:-3".parse().expect("valid position");
        assert_eq!(pos, Position { x: 12.5, y: 64.0, z: -3.0 });
    }

    #[test]
    fn position_tolerates_spaces_after_commas() {
        let pos: Position = "X:1, Y:2, Z:3".parse().expect("valid position");
        assert_eq!(pos, Position { x: 1.0, y: 2.0, z: 3.0 });
    }

    #[test]
    fn malformed_positions_are_rejected() {
        assert!("X:1,Y:2".parse::<Position>().is_err());
        assert!("X:1,Y:2,Z:3,W:4".parse::<Position>().is_err());
        assert!("X:one,Y:2,Z:3".parse::<Position>().is_err());
        assert!("1,2,3".parse::<Position>().is_err());
    }

    #[test]
    fn capacity_requires_min_le_max_and_nonzero() {
        assert!(Capacity::new(2, 8).is_ok());
        assert!(Capacity::new(1, 1).is_ok());
        assert!(Capacity::new(0, 4).is_err());
        assert!(Capacity::new(3, 0).is_err());
        assert!(Capacity::new(5, 4).is_err());
    }
}
