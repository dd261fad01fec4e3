//! Hunger suppression outside live combat phases

use std::sync::Arc;

use uuid::Uuid;

use crate::game::MatchRegistry;

/// Hunger level players are pinned to while sheltered
pub const FULL_FOOD_LEVEL: i32 = 25;

/// A mutable hunger-level change handed over by the host engine.
///
/// The dispatcher may rewrite the level and cancel the change before the
/// host applies it.
#[derive(Debug, Clone)]
pub struct HungerChange {
    player_id: Uuid,
    level: i32,
    cancelled: bool,
}

impl HungerChange {
    pub fn new(player_id: Uuid, level: i32) -> Self {
        Self {
            player_id,
            level,
            cancelled: false,
        }
    }

    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Pins hunger for players sheltered by a match that is not in a live
/// combat phase.
///
/// Holds an explicit registry reference; checked per match containing the
/// player, so the rule stays correct even if a player ever appears in more
/// than one roster.
pub struct HungerPinDispatcher {
    registry: Arc<MatchRegistry>,
}

impl HungerPinDispatcher {
    pub fn new(registry: Arc<MatchRegistry>) -> Self {
        Self { registry }
    }

    pub fn on_hunger_change(&self, event: &mut HungerChange) {
        for handle in self.registry.handles() {
            let core = handle.core();
            if core.shelters_from_hunger(event.player_id()) {
                event.set_level(FULL_FOOD_LEVEL);
                event.cancel();
            }
        }
    }
}
