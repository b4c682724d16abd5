//! The turn engine.
//!
//! `Game` sequences the whole match on top of the action processors:
//!
//! 1. The player on turn may discard the oldest face-up card of one pile,
//!    then takes a face-up card and places it on their grid. Every card
//!    sharing the new card's row or column becomes activatable.
//! 2. The player activates flagged cards, alone or with another player's
//!    assistance. An assisted activation pauses the turn until the
//!    assisting player picks their reward.
//! 3. Once no flagged card remains (or the player declines the rest) the
//!    turn can be finished and play passes to the next seat.
//!
//! After `player_count × turns_per_player` turns each player, in seat
//! order, picks an activation pattern and runs one last activation step.
//! Then each player picks a scoring card and the game ends.
//!
//! Every operation answers `false` when the rules forbid it and leaves the
//! game untouched. Accepted operations are appended to the action history
//! and broadcast to registered observers.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::board::{GameSetup, PlayerBoard};
use super::phase::GamePhase;
use super::snapshot::GameSnapshot;
use crate::actions::{AssistedActionProcessor, DirectActionProcessor, Placement, Transaction};
use crate::cards::{CardSource, Deck, Pile};
use crate::core::{
    ActionKind, ActionRecord, GameConfig, GameRng, PlayerId, PlayerMap, Position, Resource,
    ResourceBag,
};
use crate::error::{ConfigError, EngineError};
use crate::grid::Grid;
use crate::observer::{GameObserver, ObserverRegistry};
use crate::reward::{PendingReward, RewardSelector, SelectReward};
use crate::scoring::Points;

/// A running game.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    players: PlayerMap<PlayerBoard>,
    deck_i: Pile,
    deck_ii: Pile,
    on_turn: PlayerId,
    turn: u32,
    activation_complete: bool,
    final_round: bool,
    final_done: FxHashSet<PlayerId>,
    assisted: AssistedActionProcessor<SelectReward>,
    history: im::Vector<ActionRecord>,
    sequence: u32,
    observers: ObserverRegistry,
}

impl Game {
    /// Seat the players, place their starting cards and shuffle the decks.
    pub fn new(config: GameConfig, setup: GameSetup) -> Result<Self, ConfigError> {
        config.validate()?;
        if setup.players.len() != config.player_count {
            return Err(ConfigError::SetupMismatch {
                expected: config.player_count,
                given: setup.players.len(),
            });
        }

        let mut boards = Vec::with_capacity(setup.players.len());
        for (owner, player) in PlayerId::all(config.player_count).zip(setup.players) {
            let starting_card = player.starting_card.clone();
            let mut board = PlayerBoard::new(owner, player);
            board.grid.put_card(Position::ORIGIN, starting_card)?;
            boards.push(board);
        }

        let rng = GameRng::new(config.seed);
        let deck_i = Pile::new(
            setup.deck_i,
            config.visible_cards,
            &mut rng.for_context(Deck::I.rng_context()),
        );
        let deck_ii = Pile::new(
            setup.deck_ii,
            config.visible_cards,
            &mut rng.for_context(Deck::II.rng_context()),
        );

        info!(players = config.player_count, seed = config.seed, "Game created");
        Ok(Self {
            config,
            phase: GamePhase::TakeCardNoCardDiscarded,
            players: PlayerMap::from_vec(boards),
            deck_i,
            deck_ii,
            on_turn: PlayerId::new(0),
            turn: 1,
            activation_complete: false,
            final_round: false,
            final_done: FxHashSet::default(),
            assisted: AssistedActionProcessor::new(SelectReward::new()),
            history: im::Vector::new(),
            sequence: 0,
            observers: ObserverRegistry::new(),
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.on_turn
    }

    /// Regular turn number, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.final_round
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> Option<&PlayerBoard> {
        self.players.get(player)
    }

    #[must_use]
    pub fn grid(&self, player: PlayerId) -> Option<&Grid> {
        self.players.get(player).map(PlayerBoard::grid)
    }

    #[must_use]
    pub fn pile(&self, deck: Deck) -> &Pile {
        match deck {
            Deck::I => &self.deck_i,
            Deck::II => &self.deck_ii,
        }
    }

    #[must_use]
    pub fn pending_reward(&self) -> Option<&PendingReward> {
        self.assisted.selector().pending()
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<ActionRecord> {
        &self.history
    }

    /// Register an observer for `player`.
    pub fn register_observer(&mut self, player: PlayerId, observer: Box<dyn GameObserver + Send>) {
        self.observers.register(player, observer);
    }

    /// Score of each player who has chosen a scoring card.
    #[must_use]
    pub fn scores(&self) -> Vec<(PlayerId, Points)> {
        self.players
            .iter()
            .filter_map(|(player, board)| {
                board
                    .selected_scoring()
                    .and_then(|m| m.total())
                    .map(|points| (player, points))
            })
            .collect()
    }

    /// Highest scorer once the game is over; ties go to the earlier seat.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if self.phase != GamePhase::Finish {
            return None;
        }
        let mut best: Option<(PlayerId, Points)> = None;
        for (player, points) in self.scores() {
            if best.map_or(true, |(_, top)| points > top) {
                best = Some((player, points));
            }
        }
        best.map(|(player, _)| player)
    }

    // === Turn operations ===

    /// Take a face-up card and place it on the player's grid.
    pub fn take_card(
        &mut self,
        player: PlayerId,
        source: CardSource,
        destination: Position,
    ) -> Result<bool, EngineError> {
        if !self.is_on_turn(player) || !self.phase.is_take_card() || self.final_round {
            return Ok(false);
        }
        let board = self.board_of(player)?;
        let Some(card) = self.pile(source.deck).card(source.index) else {
            debug!(%player, ?source, "No card at source");
            return Ok(false);
        };
        if !board.grid.can_put_card(destination) || board.grid.position_of(card.id()).is_some() {
            debug!(%player, %destination, "Placement refused");
            return Ok(false);
        }

        let Some(card) = self.pile_mut(source.deck).take_card(source.index) else {
            return Ok(false);
        };
        let grid = &mut self.players[player].grid;
        grid.put_card(destination, card)?;
        let line = grid.row_and_column(destination);
        grid.set_activation_pattern(&line);

        self.activation_complete = false;
        self.set_phase(GamePhase::ActivateCard);
        self.record(player, ActionKind::TakeCard { source, destination });
        Ok(true)
    }

    /// Discard the oldest face-up card of `deck` before taking a card.
    pub fn discard_last_card_from_deck(&mut self, player: PlayerId, deck: Deck) -> bool {
        if !self.is_on_turn(player)
            || self.phase != GamePhase::TakeCardNoCardDiscarded
            || self.final_round
        {
            return false;
        }
        if !self.pile_mut(deck).remove_last_card() {
            return false;
        }

        self.set_phase(GamePhase::TakeCardCardDiscarded);
        self.record(player, ActionKind::Discard { deck });
        true
    }

    /// Activate the card at `position`, optionally assisted by the card at
    /// `assist.1` on player `assist.0`'s grid.
    pub fn activate_card(
        &mut self,
        player: PlayerId,
        position: Position,
        inputs: &[Placement],
        outputs: &[Placement],
        pollution: &[Position],
        assist: Option<(PlayerId, Position)>,
    ) -> Result<bool, EngineError> {
        if !self.is_on_turn(player) || self.phase != GamePhase::ActivateCard {
            return Ok(false);
        }
        let grid = &self.board_of(player)?.grid;
        let Some(card) = grid.card_at(position) else {
            return Ok(false);
        };
        if !grid.is_activatable(position) {
            return Ok(false);
        }
        let tx = Transaction::from_parts(card.id(), inputs, outputs, pollution);

        let accepted = match assist {
            Some((helper, helper_position)) => {
                let Some(helper_card) = self
                    .players
                    .get(helper)
                    .and_then(|b| b.grid.card_at(helper_position))
                    .cloned()
                else {
                    return Ok(false);
                };
                self.assisted.activate(
                    &mut self.players[player].grid,
                    Some(helper),
                    Some(&helper_card),
                    &tx,
                )?
            }
            None => DirectActionProcessor::activate(&mut self.players[player].grid, &tx)?,
        };
        if !accepted {
            return Ok(false);
        }

        let grid = &mut self.players[player].grid;
        grid.mark_activated(position);
        if assist.is_some() {
            self.set_phase(GamePhase::SelectReward);
        } else if grid.activatable_positions().is_empty() {
            self.activation_complete = true;
        }
        self.record(
            player,
            ActionKind::Activate {
                position,
                assisted_by: assist.map(|(helper, _)| helper),
            },
        );
        Ok(true)
    }

    /// The assisting player picks their reward.
    pub fn select_reward(&mut self, player: PlayerId, resource: Resource) -> Result<bool, EngineError> {
        if self.phase != GamePhase::SelectReward {
            return Ok(false);
        }
        let selector = self.assisted.selector();
        if selector.pending_player() != Some(player) || !selector.can_select(resource) {
            return Ok(false);
        }
        let Some(reward_card) = selector.pending().map(|p| p.card) else {
            return Ok(false);
        };

        let grid = &self.board_of(player)?.grid;
        let Some(position) = grid.position_of(reward_card) else {
            return Ok(false);
        };
        let reward = ResourceBag::from([resource]);
        if !grid.card_at(position).is_some_and(|c| c.can_receive(&reward)) {
            debug!(%player, %resource, "Reward card cannot hold the resource");
            return Ok(false);
        }

        let chosen = self.assisted.selector_mut().select(resource)?;
        if let Some(card) = self.players[player].grid.card_at_mut(position) {
            card.receive(&reward)?;
        }
        info!(%player, card = %chosen.card, %resource, "Reward collected");

        self.set_phase(GamePhase::ActivateCard);
        let on_turn = self.on_turn;
        if self.players[on_turn].grid.activatable_positions().is_empty() {
            self.activation_complete = true;
        }
        self.record(player, ActionKind::SelectReward { resource });
        Ok(true)
    }

    /// Decline the remaining flagged activations of this step.
    pub fn finish_activation(&mut self, player: PlayerId) -> bool {
        if !self.is_on_turn(player) || self.phase != GamePhase::ActivateCard {
            return false;
        }
        self.activation_complete = true;
        self.record(player, ActionKind::FinishActivation);
        true
    }

    /// End the player's turn once their activation step is complete.
    pub fn turn_finished(&mut self, player: PlayerId) -> bool {
        if !self.is_on_turn(player)
            || self.phase != GamePhase::ActivateCard
            || !self.activation_complete
        {
            return false;
        }

        self.players[player].grid.clear_activation_flags();
        self.activation_complete = false;
        self.history.push_back(ActionRecord::new(
            player,
            self.turn,
            self.sequence,
            ActionKind::FinishTurn,
        ));
        self.sequence = 0;

        let next = player.next(self.config.player_count);
        if !self.final_round {
            self.turn += 1;
            if self.turn > self.config.total_turns() {
                info!(turn = self.turn, "Entering final round");
                self.final_round = true;
                self.final_done.clear();
                self.on_turn = PlayerId::new(0);
                self.set_phase(GamePhase::SelectActivationPattern);
            } else {
                self.on_turn = next;
                self.set_phase(GamePhase::TakeCardNoCardDiscarded);
            }
        } else {
            self.final_done.insert(player);
            if self.final_done.len() == self.config.player_count {
                self.on_turn = PlayerId::new(0);
                self.set_phase(GamePhase::SelectScoringMethod);
            } else {
                self.on_turn = next;
                self.set_phase(GamePhase::SelectActivationPattern);
            }
        }
        self.broadcast();
        true
    }

    /// Pick the activation pattern for the final round.
    pub fn select_activation_pattern(&mut self, player: PlayerId, index: usize) -> bool {
        if self.phase != GamePhase::SelectActivationPattern
            || !self.is_on_turn(player)
            || !self.final_round
        {
            return false;
        }
        let board = &mut self.players[player];
        if board.selected_pattern.is_some() {
            return false;
        }
        let Some(pattern) = board.patterns.get_mut(index) else {
            return false;
        };
        let Some(flagged) = pattern.select(&mut board.grid) else {
            return false;
        };
        board.selected_pattern = Some(index);

        self.activation_complete = flagged.is_empty();
        self.set_phase(GamePhase::ActivateCard);
        self.record(player, ActionKind::SelectPattern { index });
        true
    }

    /// Pick a scoring card and score the player's grid with it.
    pub fn select_scoring(&mut self, player: PlayerId, index: usize) -> bool {
        if self.phase != GamePhase::SelectScoringMethod || !self.is_on_turn(player) {
            return false;
        }
        let board = &mut self.players[player];
        if board.selected_scoring.is_some() {
            return false;
        }
        let available = board.grid.resources();
        let Some(method) = board.scoring.get_mut(index) else {
            return false;
        };
        let points = method.select_and_calculate(&available);
        board.selected_scoring = Some(index);
        info!(%player, %points, "Scoring chosen");

        let all_scored = self
            .players
            .iter()
            .all(|(_, b)| b.selected_scoring.is_some());
        if all_scored {
            self.set_phase(GamePhase::Finish);
        } else {
            self.on_turn = player.next(self.config.player_count);
        }
        self.record(player, ActionKind::SelectScoring { index });
        true
    }

    // === Snapshots ===

    /// The game as seen by `viewer`.
    #[must_use]
    pub fn snapshot(&self, viewer: PlayerId) -> GameSnapshot {
        GameSnapshot {
            viewer,
            phase: self.phase,
            current_player: self.on_turn,
            turn: self.turn,
            grids: self.players.iter().map(|(_, b)| b.grid.snapshot()).collect(),
            piles: Deck::ALL
                .into_iter()
                .map(|deck| (deck, self.pile(deck).snapshot()))
                .collect(),
            reward: self.assisted.selector().snapshot(),
            scoring: self
                .players
                .get(viewer)
                .map(|b| b.scoring.iter().map(|m| m.snapshot()).collect())
                .unwrap_or_default(),
        }
    }

    // === Internals ===

    fn is_on_turn(&self, player: PlayerId) -> bool {
        if self.on_turn != player {
            debug!(%player, on_turn = %self.on_turn, "Not on turn");
            return false;
        }
        true
    }

    fn board_of(&self, player: PlayerId) -> Result<&PlayerBoard, EngineError> {
        self.players
            .get(player)
            .ok_or(EngineError::UnknownPlayer(player))
    }

    fn pile_mut(&mut self, deck: Deck) -> &mut Pile {
        match deck {
            Deck::I => &mut self.deck_i,
            Deck::II => &mut self.deck_ii,
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!(from = %self.phase, to = %phase, player = %self.on_turn, "Phase change");
            self.phase = phase;
        }
    }

    /// Append to the history and notify observers.
    fn record(&mut self, player: PlayerId, kind: ActionKind) {
        self.history
            .push_back(ActionRecord::new(player, self.turn, self.sequence, kind));
        self.sequence += 1;
        self.broadcast();
    }

    fn broadcast(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let mut states = Vec::with_capacity(self.config.player_count);
        for viewer in PlayerId::all(self.config.player_count) {
            match serde_json::to_string(&self.snapshot(viewer)) {
                Ok(json) => states.push((viewer, json)),
                Err(error) => warn!(%viewer, %error, "Snapshot serialization failed"),
            }
        }
        self.observers
            .notify_all(states.iter().map(|(p, s)| (*p, s.as_str())));
    }
}
