//! Participants and team membership

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

/// A named group of players entering team matches together.
///
/// Shared via `Arc` across its members' roster entries so that a membership
/// check from any entry sees the same team.
#[derive(Debug)]
pub struct Team {
    team_id: Uuid,
    name: String,
    members: HashSet<Uuid>,
}

impl Team {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            team_id: Uuid::new_v4(),
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    pub fn team_id(&self) -> Uuid {
        self.team_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, player_id: Uuid) -> bool {
        self.members.contains(&player_id)
    }
}

/// How a participant entered the match: alone or with a team
#[derive(Debug, Clone)]
pub enum Membership {
    Solo,
    Team(Arc<Team>),
}

/// An entry in a match roster.
///
/// Lookup code goes through [`identity_matches`](Participant::identity_matches)
/// and [`represents`](Participant::represents) rather than inspecting the
/// membership variant; the variant distinction lives here and nowhere else.
#[derive(Debug, Clone)]
pub struct Participant {
    player_id: Uuid,
    display_name: String,
    membership: Membership,
}

impl Participant {
    pub fn solo(player_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            player_id,
            display_name: display_name.into(),
            membership: Membership::Solo,
        }
    }

    pub fn in_team(player_id: Uuid, display_name: impl Into<String>, team: Arc<Team>) -> Self {
        Self {
            player_id,
            display_name: display_name.into(),
            membership: Membership::Team(team),
        }
    }

    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Exact identity comparison: this entry belongs to that player
    pub fn identity_matches(&self, player_id: Uuid) -> bool {
        self.player_id == player_id
    }

    /// Teammate-aware membership: does this entry cover that player
    pub fn represents(&self, player_id: Uuid) -> bool {
        match &self.membership {
            Membership::Solo => self.player_id == player_id,
            Membership::Team(team) => team.contains(player_id),
        }
    }

    pub fn is_team_affiliated(&self) -> bool {
        matches!(self.membership, Membership::Team(_))
    }

    pub fn team(&self) -> Option<&Arc<Team>> {
        match &self.membership {
            Membership::Solo => None,
            Membership::Team(team) => Some(team),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_participant_represents_only_itself() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p = Participant::solo(id, "Ada");

        assert!(p.identity_matches(id));
        assert!(p.represents(id));
        assert!(!p.identity_matches(other));
        assert!(!p.represents(other));
        assert!(!p.is_team_affiliated());
        assert!(p.team().is_none());
    }

    #[test]
    fn team_participant_represents_every_teammate() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let team = Arc::new(Team::new("Reds", [a, b]));
        let p = Participant::in_team(a, "Ada", team.clone());

        assert!(p.represents(a));
        assert!(p.represents(b));
        assert!(!p.represents(stranger));
        assert!(p.is_team_affiliated());
    }

    #[test]
    fn identity_never_widens_to_teammates() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let team = Arc::new(Team::new("Blues", [a, b]));
        let p = Participant::in_team(a, "Ada", team);

        assert!(p.identity_matches(a));
        assert!(!p.identity_matches(b));
    }
}
