//! Active and spectator membership for one match

use std::collections::HashSet;

use uuid::Uuid;

use super::participant::Participant;

/// The two disjoint participant sets of a match.
///
/// Active entries keep their join order; spawn allocation consumes that
/// order. Membership tests go through the id index.
#[derive(Debug, Default)]
pub struct MatchRoster {
    active: Vec<Participant>,
    active_ids: HashSet<Uuid>,
    spectators: Vec<Participant>,
    spectator_ids: HashSet<Uuid>,
}

impl MatchRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn spectator_len(&self) -> usize {
        self.spectators.len()
    }

    /// Present in either set
    pub fn contains(&self, player_id: Uuid) -> bool {
        self.active_ids.contains(&player_id) || self.spectator_ids.contains(&player_id)
    }

    pub fn contains_active(&self, player_id: Uuid) -> bool {
        self.active_ids.contains(&player_id)
    }

    pub fn contains_spectator(&self, player_id: Uuid) -> bool {
        self.spectator_ids.contains(&player_id)
    }

    /// Add to the active set; rejects identities already present anywhere
    pub fn add_active(&mut self, participant: Participant) -> bool {
        if self.contains(participant.player_id()) {
            return false;
        }
        self.active_ids.insert(participant.player_id());
        self.active.push(participant);
        true
    }

    /// Add to the spectator set; rejects identities already present anywhere
    pub fn add_spectator(&mut self, participant: Participant) -> bool {
        if self.contains(participant.player_id()) {
            return false;
        }
        self.spectator_ids.insert(participant.player_id());
        self.spectators.push(participant);
        true
    }

    pub fn remove_active(&mut self, player_id: Uuid) -> Option<Participant> {
        if !self.active_ids.remove(&player_id) {
            return None;
        }
        let idx = self
            .active
            .iter()
            .position(|p| p.identity_matches(player_id))?;
        Some(self.active.remove(idx))
    }

    /// Move a participant from active to spectator; no-op when not active
    pub fn move_to_spectator(&mut self, player_id: Uuid) -> bool {
        match self.remove_active(player_id) {
            Some(participant) => {
                self.spectator_ids.insert(participant.player_id());
                self.spectators.push(participant);
                true
            }
            None => false,
        }
    }

    /// Active participants in join order
    pub fn active(&self) -> impl Iterator<Item = &Participant> {
        self.active.iter()
    }

    pub fn spectators(&self) -> impl Iterator<Item = &Participant> {
        self.spectators.iter()
    }

    /// Teammate-aware lookup over the active set: true when any entry
    /// covers the player, including team entries covering a teammate
    pub fn recognizes(&self, player_id: Uuid) -> bool {
        self.active.iter().any(|p| p.represents(player_id))
    }
}
