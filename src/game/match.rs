//! Match state machine, handles, and the process-wide registry

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::{GameConfig, GamesFile};
use crate::util::time::COUNTDOWN_SECONDS;

use super::countdown::{self, CountdownHandle};
use super::items::{self, ItemStack, LootTier};
use super::participant::Participant;
use super::roster::MatchRoster;
use super::spawn;
use super::{chat, BlockPos, Capacity, HostGateway, InvalidCapacity, Position};

/// Lifecycle stage of a match.
///
/// The declaration order is the phase order; transitions only move forward,
/// with the single exception of an uncommitted `Starting` dropping back to
/// `Lobby` once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchPhase {
    /// Waiting for players
    Lobby,
    /// Countdown before the cages open
    Starting,
    /// Players placed, gameplay rules not yet live
    Preparation,
    /// Full gameplay rules
    Active,
    /// Endgame forcing a resolution
    Deathmatch,
    /// Winner decided, match winding down
    Ending,
}

/// A phase change the state machine refuses
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid phase transition {from:?} -> {to:?}")]
    Invalid { from: MatchPhase, to: MatchPhase },
}

/// Why an admission request was rejected
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("team participants cannot join a solo match")]
    TeamModeMismatch,

    #[error("match is full")]
    MatchFull,

    #[error("player is already in this match")]
    AlreadyJoined,
}

/// What a successful admission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Added to the active roster
    Joined {
        /// The join tripped the lobby into `Starting`; the caller owns
        /// spawning the timer task
        countdown_started: bool,
    },
    /// Match already underway; tracked as a spectator only
    Spectating,
}

/// What a countdown step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Continue { seconds_remaining: u32 },
    Finished,
}

/// One match instance: phase, roster, spawn bookkeeping, loot tables.
///
/// Synchronous and single-owner; the async shell around it serializes every
/// entry point through the match mutex.
pub struct MatchCore {
    id: Uuid,
    display_name: String,
    world_name: String,
    capacity: Capacity,
    is_team_match: bool,
    lobby_point: Option<Position>,
    spawn_points: Vec<Position>,
    normal_items: Vec<ItemStack>,
    rare_items: Vec<ItemStack>,

    phase: MatchPhase,
    lobby_reverted: bool,
    roster: MatchRoster,
    spawn_assignment: HashMap<Uuid, Position>,
    opened_chests: HashSet<BlockPos>,
    countdown_remaining: Option<u32>,

    gateway: Arc<dyn HostGateway>,
}

impl MatchCore {
    /// Build a match from one validated games-file entry.
    ///
    /// Malformed positions and unknown items degrade the match entry by
    /// entry; only a broken capacity rejects the whole definition.
    pub fn from_config(
        id: Uuid,
        config: &GameConfig,
        gateway: Arc<dyn HostGateway>,
    ) -> Result<Self, InvalidCapacity> {
        let capacity = Capacity::new(config.min_players, config.max_players)?;

        gateway.create_world(&config.world_name);

        let lobby_point = match config.lobby_point.parse::<Position>() {
            Ok(point) => Some(point),
            Err(err) => {
                error!(
                    game = %config.display_name,
                    raw = %config.lobby_point,
                    %err,
                    "Failed to load lobby point"
                );
                None
            }
        };

        let mut spawn_points = Vec::with_capacity(config.spawn_points.len());
        for raw in &config.spawn_points {
            match raw.parse::<Position>() {
                Ok(point) => spawn_points.push(point),
                Err(err) => {
                    error!(
                        game = %config.display_name,
                        raw = %raw,
                        %err,
                        "Failed to load spawn point"
                    );
                }
            }
        }

        let normal_items =
            items::resolve_table(&config.display_name, &config.normal_items, LootTier::Normal);
        let rare_items =
            items::resolve_table(&config.display_name, &config.rare_items, LootTier::Rare);

        Ok(Self {
            id,
            display_name: config.display_name.clone(),
            world_name: config.world_name.clone(),
            capacity,
            is_team_match: config.is_team_game,
            lobby_point,
            spawn_points,
            normal_items,
            rare_items,
            phase: MatchPhase::Lobby,
            lobby_reverted: false,
            roster: MatchRoster::new(),
            spawn_assignment: HashMap::new(),
            opened_chests: HashSet::new(),
            countdown_remaining: None,
            gateway,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn is_team_match(&self) -> bool {
        self.is_team_match
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_phase(&self, phase: MatchPhase) -> bool {
        self.phase == phase
    }

    pub fn roster(&self) -> &MatchRoster {
        &self.roster
    }

    pub fn normal_items(&self) -> &[ItemStack] {
        &self.normal_items
    }

    pub fn rare_items(&self) -> &[ItemStack] {
        &self.rare_items
    }

    pub fn spawn_assignment(&self, player_id: Uuid) -> Option<Position> {
        self.spawn_assignment.get(&player_id).copied()
    }

    pub fn assigned_count(&self) -> usize {
        self.spawn_assignment.len()
    }

    /// Record a chest as looted; false when it already was
    pub fn mark_chest_opened(&mut self, pos: BlockPos) -> bool {
        self.opened_chests.insert(pos)
    }

    pub fn is_chest_opened(&self, pos: BlockPos) -> bool {
        self.opened_chests.contains(&pos)
    }

    /// Move the match forward.
    ///
    /// Rejects the current phase and anything already passed; the one
    /// permitted reversal is `Starting -> Lobby`, once.
    pub fn advance_phase(&mut self, to: MatchPhase) -> Result<(), TransitionError> {
        let from = self.phase;
        let revert = from == MatchPhase::Starting && to == MatchPhase::Lobby;

        if !(to > from || (revert && !self.lobby_reverted)) {
            return Err(TransitionError::Invalid { from, to });
        }

        if revert {
            self.lobby_reverted = true;
        }
        self.phase = to;
        info!(match_id = %self.id, ?from, ?to, "Match phase advanced");
        Ok(())
    }

    /// Admit a player, or record a spectator once the match is underway.
    ///
    /// Reaching `min` active players while in the lobby commits the match to
    /// `Starting` and arms the countdown; the caller spawns the timer task
    /// when the outcome says so.
    pub fn try_join(&mut self, participant: Participant) -> Result<JoinOutcome, JoinError> {
        if participant.is_team_affiliated() && !self.is_team_match {
            return Err(JoinError::TeamModeMismatch);
        }

        if self.roster.contains(participant.player_id()) {
            warn!(
                match_id = %self.id,
                player_id = %participant.player_id(),
                "Player already in match"
            );
            return Err(JoinError::AlreadyJoined);
        }

        if !(self.is_phase(MatchPhase::Lobby) || self.is_phase(MatchPhase::Starting)) {
            self.roster.add_spectator(participant);
            // Spectators are tracked for membership only; what a spectator
            // can see or do is the host's concern.
            return Ok(JoinOutcome::Spectating);
        }

        if self.roster.active_len() == self.capacity.max {
            self.gateway
                .send_chat(participant.player_id(), chat::MATCH_FULL);
            return Err(JoinError::MatchFull);
        }

        let player_id = participant.player_id();
        let name = participant.display_name().to_string();
        let was_lobby = self.is_phase(MatchPhase::Lobby);

        self.roster.add_active(participant);
        if was_lobby {
            // Mid-countdown joiners keep their position
            if let Some(lobby) = self.lobby_point {
                self.gateway.teleport(player_id, &self.world_name, lobby);
            }
        }

        self.broadcast(&chat::join_banner(
            &name,
            self.roster.active_len(),
            self.capacity.max,
        ));
        info!(
            match_id = %self.id,
            player_id = %player_id,
            player_count = self.roster.active_len(),
            "Player joined match"
        );

        let mut countdown_started = false;
        if self.roster.active_len() == self.capacity.min && !self.is_phase(MatchPhase::Starting) {
            match self.advance_phase(MatchPhase::Starting) {
                Ok(()) => {
                    self.broadcast(&chat::countdown_begin(COUNTDOWN_SECONDS));
                    self.start_countdown();
                    countdown_started = true;
                }
                Err(err) => warn!(match_id = %self.id, %err, "Could not enter starting phase"),
            }
        }

        Ok(JoinOutcome::Joined { countdown_started })
    }

    /// Assign spawn points over the roster in join order and arm the
    /// countdown counter.
    ///
    /// Only the first allocation sticks: while a countdown is armed a second
    /// call is a recorded no-op, so players joining mid-countdown stay
    /// unassigned until some later trigger.
    pub fn start_countdown(&mut self) {
        if self.countdown_remaining.is_some() {
            warn!(match_id = %self.id, "Countdown already running");
            return;
        }

        let plan = spawn::allocate(&self.spawn_points, self.roster.active());
        if plan.shortage > 0 {
            error!(
                game = %self.display_name,
                unassigned = plan.shortage,
                "Not enough spawn points to satisfy match needs"
            );
        }
        for (player_id, point) in plan.assignments {
            self.spawn_assignment.insert(player_id, point);
            self.gateway.teleport(player_id, &self.world_name, point);
        }

        self.countdown_remaining = Some(COUNTDOWN_SECONDS);
    }

    /// Apply one countdown step.
    ///
    /// No-op after cancellation or completion, so a late timer fire can
    /// never advance the phase twice.
    pub fn countdown_tick(&mut self) -> CountdownStep {
        let Some(remaining) = self.countdown_remaining else {
            return CountdownStep::Finished;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.countdown_remaining = None;
            match self.advance_phase(MatchPhase::Preparation) {
                Ok(()) => {}
                Err(err) => warn!(match_id = %self.id, %err, "Countdown finished out of phase"),
            }
            return CountdownStep::Finished;
        }

        self.countdown_remaining = Some(remaining);
        if remaining <= 5 || remaining % 5 == 0 {
            self.broadcast(&chat::countdown_mark(remaining));
        }
        CountdownStep::Continue {
            seconds_remaining: remaining,
        }
    }

    /// Disarm the countdown; idempotent, safe after the final tick
    pub fn cancel_countdown(&mut self) {
        self.countdown_remaining = None;
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown_remaining.is_some()
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown_remaining
    }

    /// Move an active participant to the spectator set; no-op when absent
    pub fn switch_to_spectator(&mut self, player_id: Uuid) -> bool {
        self.roster.move_to_spectator(player_id)
    }

    /// Find a participant by exact identity, active entries first.
    ///
    /// Team entries match on the underlying player only, never on
    /// teammates.
    pub fn resolve_participant(&self, player_id: Uuid) -> Option<&Participant> {
        self.roster
            .active()
            .find(|p| p.identity_matches(player_id))
            .or_else(|| {
                self.roster
                    .spectators()
                    .find(|p| p.identity_matches(player_id))
            })
    }

    /// Hunger-pinning policy: outside the live combat phases, every player
    /// an active entry covers has hunger suppressed
    pub fn shelters_from_hunger(&self, player_id: Uuid) -> bool {
        if self.is_phase(MatchPhase::Active) || self.is_phase(MatchPhase::Deathmatch) {
            return false;
        }
        self.roster.recognizes(player_id)
    }

    /// Send a chat line to every active participant
    pub fn broadcast(&self, message: &str) {
        for participant in self.roster.active() {
            self.gateway.send_chat(participant.player_id(), message);
        }
    }
}

/// Clonable reference to a running match: the core behind its ownership
/// boundary plus the countdown slot
#[derive(Clone)]
pub struct MatchHandle {
    pub id: Uuid,
    name: String,
    core: Arc<Mutex<MatchCore>>,
    countdown: Arc<Mutex<Option<CountdownHandle>>>,
}

impl MatchHandle {
    pub fn new(name: impl Into<String>, core: MatchCore) -> Self {
        Self {
            id: core.id(),
            name: name.into(),
            core: Arc::new(Mutex::new(core)),
            countdown: Arc::new(Mutex::new(None)),
        }
    }

    /// Configuration name this match was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lock the match for a read-only view
    pub fn core(&self) -> MutexGuard<'_, MatchCore> {
        self.core.lock()
    }

    /// Run a closure under the match's exclusive owner
    pub fn with_core<R>(&self, f: impl FnOnce(&mut MatchCore) -> R) -> R {
        f(&mut self.core.lock())
    }

    /// Admit a player; spawns the countdown timer task when the join
    /// committed the lobby. Requires a Tokio runtime.
    pub fn try_join(&self, participant: Participant) -> Result<JoinOutcome, JoinError> {
        let outcome = self.core.lock().try_join(participant)?;

        if let JoinOutcome::Joined {
            countdown_started: true,
        } = outcome
        {
            let mut slot = self.countdown.lock();
            // one live countdown per match
            if slot.as_ref().map_or(true, CountdownHandle::is_finished) {
                *slot = Some(countdown::spawn_countdown(self.core.clone()));
            }
        }

        Ok(outcome)
    }

    pub fn player_count(&self) -> usize {
        self.core.lock().roster().active_len()
    }

    /// Cancel any live countdown; idempotent
    pub fn cancel_countdown(&self) {
        if let Some(handle) = self.countdown.lock().as_ref() {
            handle.cancel();
        }
        self.core.lock().cancel_countdown();
    }
}

/// Registry of all match instances for the process lifetime.
///
/// Matches are long-lived; there is no removal. Constructed once at startup
/// and passed by reference to anything needing cross-match dispatch.
pub struct MatchRegistry {
    matches: DashMap<Uuid, MatchHandle>,
    names: DashMap<String, Uuid>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
            names: DashMap::new(),
        }
    }

    /// Build one match per valid games-file definition.
    ///
    /// Definitions with broken capacity are reported and skipped; the rest
    /// of the file still loads.
    pub fn from_games_file(file: &GamesFile, gateway: Arc<dyn HostGateway>) -> Self {
        let registry = Self::new();

        for (name, config) in &file.games {
            match MatchCore::from_config(Uuid::new_v4(), config, gateway.clone()) {
                Ok(core) => {
                    info!(
                        game = %name,
                        display_name = %config.display_name,
                        min_players = config.min_players,
                        max_players = config.max_players,
                        "Registered match"
                    );
                    registry.insert(MatchHandle::new(name.clone(), core));
                }
                Err(err) => {
                    error!(game = %name, %err, "Skipping match definition");
                }
            }
        }

        registry
    }

    pub fn insert(&self, handle: MatchHandle) {
        self.names.insert(handle.name().to_string(), handle.id);
        self.matches.insert(handle.id, handle);
    }

    pub fn get(&self, id: &Uuid) -> Option<MatchHandle> {
        self.matches.get(id).map(|m| m.value().clone())
    }

    pub fn get_by_name(&self, name: &str) -> Option<MatchHandle> {
        let id = *self.names.get(name)?;
        self.get(&id)
    }

    /// Snapshot of every handle, for global event dispatch
    pub fn handles(&self) -> Vec<MatchHandle> {
        self.matches.iter().map(|m| m.value().clone()).collect()
    }

    pub fn active_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn total_players(&self) -> usize {
        self.matches.iter().map(|m| m.value().player_count()).sum()
    }
}

impl Default for MatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}
