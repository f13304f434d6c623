use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use warfront_protocol::{
    Action, AgentId, EndReason, Event, Observation, RejectReason, ReplayAction, ReplayTick,
    Snapshot, TerrainKind,
};

use crate::fog::{refresh_visibility, view, FogPolicy};
use crate::gridgen::{generate_grid, GridGenConfig, GridGenError};
use crate::state::{GameState, SetupError};

/// Engine parameters that affect turn resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tick limit; reaching it ends the match as a truncation, not a win.
    pub max_ticks: u32,
    /// Ordinary owned cells gain 1 army every this many ticks. Generals and
    /// cities gain 1 every tick while owned.
    pub growth_interval: u32,
    /// Fraction of the source army a split move sends.
    pub split_ratio: f32,
    pub fog: FogPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_ticks: 500,
            growth_interval: 2,
            split_ratio: 0.5,
            fog: FogPolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    GridGen(#[from] GridGenError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("growth interval must be at least 1")]
    InvalidGrowthInterval,
    #[error("split ratio must be in (0, 1], got {0}")]
    InvalidSplitRatio(f32),
    #[error("max ticks must be at least 1")]
    InvalidMaxTicks,
}

/// Result of one tick.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub events: Vec<Event>,
    /// Per-agent terminated flag: eliminated, or the match is over.
    pub terminated: BTreeMap<AgentId, bool>,
    pub done: bool,
    /// Set when the match ended without a decisive winner.
    pub truncated: bool,
}

/// Generation inputs remembered for replay export.
#[derive(Clone, Debug)]
pub(crate) struct GameInit {
    pub seed: u64,
    pub grid_config: GridGenConfig,
    pub names: Vec<String>,
}

/// The turn engine: owns the game state, validates and resolves one action
/// per agent per tick, and keeps the ordered action log for replays.
///
/// Single-threaded by design; a tick is atomic and the output is a pure
/// function of (seed, config, ordered action log).
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub(crate) init: GameInit,
    config: EngineConfig,
    state: GameState,
    pub(crate) action_log: Vec<ReplayTick>,
    done: bool,
    winner: Option<AgentId>,
    end_reason: Option<EndReason>,
}

impl GameEngine {
    pub fn new(
        grid_config: GridGenConfig,
        config: EngineConfig,
        names: &[String],
        seed: u64,
    ) -> Result<Self, EngineError> {
        if config.growth_interval == 0 {
            return Err(EngineError::InvalidGrowthInterval);
        }
        if !(config.split_ratio > 0.0 && config.split_ratio <= 1.0) {
            return Err(EngineError::InvalidSplitRatio(config.split_ratio));
        }
        if config.max_ticks == 0 {
            return Err(EngineError::InvalidMaxTicks);
        }

        let generated = generate_grid(&grid_config, seed)?;
        let mut state = GameState::from_generated(generated, names)?;
        refresh_visibility(&mut state);

        Ok(Self {
            init: GameInit {
                seed,
                grid_config,
                names: names.to_vec(),
            },
            config,
            state,
            action_log: Vec::new(),
            done: false,
            winner: None,
            end_reason: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.init.seed
    }

    pub fn grid_config(&self) -> &GridGenConfig {
        &self.init.grid_config
    }

    pub fn agent_names(&self) -> &[String] {
        &self.init.names
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn winner(&self) -> Option<AgentId> {
        self.winner
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// This agent's fog-of-war view of the current state.
    pub fn observe(&self, agent: AgentId) -> Observation {
        let mut obs = view(&self.state, agent, self.config.fog);
        if self.done {
            obs.done = true;
        }
        obs
    }

    /// Advance one tick: growth, then validated moves in ascending agent-id
    /// order, then elimination/termination checks. Invalid actions are
    /// demoted to idle and reported; they never abort the tick.
    ///
    /// Calling `step` on a finished match is a no-op that restates the
    /// terminal outcome.
    pub fn step(&mut self, actions: &BTreeMap<AgentId, Action>) -> StepOutcome {
        if self.done {
            return self.outcome(Vec::new());
        }

        self.state.tick += 1;
        let tick = self.state.tick;
        let mut events = Vec::new();

        self.apply_growth(tick);

        // Ascending agent-id order; never submission order.
        for raw in 0..self.state.agents.len() {
            let id = AgentId(raw as u8);
            let action = actions.get(&id).copied().unwrap_or(Action::Idle);
            match self.validate(id, action) {
                Ok(Some(mv)) => self.apply_move(id, mv, &mut events),
                Ok(None) => {}
                Err(reason) => {
                    warn!(agent = %id, tick, ?reason, "action rejected, treating as idle");
                    events.push(Event::ActionRejected {
                        agent: id,
                        tick,
                        reason,
                    });
                }
            }
        }

        self.state.recompute_totals();
        refresh_visibility(&mut self.state);

        self.action_log.push(ReplayTick {
            tick,
            actions: (0..self.state.agents.len())
                .map(|raw| {
                    let id = AgentId(raw as u8);
                    ReplayAction {
                        agent: id,
                        action: actions.get(&id).copied().unwrap_or(Action::Idle),
                    }
                })
                .collect(),
        });

        let alive = self.state.alive_ids();
        if alive.len() == 1 {
            self.done = true;
            self.winner = Some(alive[0]);
            self.end_reason = Some(EndReason::Conquest);
        } else if alive.is_empty() || tick >= self.config.max_ticks {
            self.done = true;
            self.end_reason = Some(EndReason::Truncation);
        }

        events.push(Event::TickCompleted { tick });
        if self.done {
            events.push(Event::GameEnded {
                winner: self.winner,
                reason: self.end_reason.expect("reason set with done"),
            });
        }

        self.outcome(events)
    }

    fn outcome(&self, events: Vec<Event>) -> StepOutcome {
        StepOutcome {
            events,
            terminated: self
                .state
                .agents
                .iter()
                .map(|a| (a.id, !a.alive || self.done))
                .collect(),
            done: self.done,
            truncated: self.done && self.end_reason == Some(EndReason::Truncation),
        }
    }

    fn apply_growth(&mut self, tick: u32) {
        let interval_tick = tick % self.config.growth_interval == 0;
        for index in 0..self.state.grid.len() {
            let cell = self.state.grid.cell_mut(index);
            let Some(owner) = cell.owner else { continue };
            if !self.state.agents[owner.0 as usize].alive {
                continue;
            }
            if cell.terrain.fast_growth() || interval_tick {
                cell.army = cell.army.saturating_add(1);
            }
        }
    }

    fn validate(&self, agent: AgentId, action: Action) -> Result<Option<ValidatedMove>, RejectReason> {
        let record = &self.state.agents[agent.0 as usize];
        let Action::Move { from, dir, split } = action else {
            return Ok(None);
        };
        if !record.alive {
            return Err(RejectReason::Eliminated);
        }

        let source = self.state.grid.index_of(from).ok_or(RejectReason::OutOfBounds)?;
        let source_cell = self.state.grid.cell(source);
        if source_cell.owner != Some(agent) {
            return Err(RejectReason::NotOwned);
        }
        if source_cell.army <= 1 {
            return Err(RejectReason::InsufficientArmy);
        }

        let target = self
            .state
            .grid
            .index_of(from + dir.offset())
            .ok_or(RejectReason::TargetOutOfBounds)?;
        if self.state.grid.cell(target).terrain == TerrainKind::Mountain {
            return Err(RejectReason::MountainTarget);
        }

        Ok(Some(ValidatedMove {
            source,
            target,
            split,
        }))
    }

    fn apply_move(&mut self, agent: AgentId, mv: ValidatedMove, events: &mut Vec<Event>) {
        let source_army = self.state.grid.cell(mv.source).army;
        // The whole army minus one departs; a split sends the configured
        // fraction instead, never leaving the source empty.
        let moving = if mv.split {
            ((source_army as f32 * self.config.split_ratio) as u32)
                .max(1)
                .min(source_army - 1)
        } else {
            source_army - 1
        };

        self.state.grid.cell_mut(mv.source).army = source_army - moving;

        let target_cell = self.state.grid.cell(mv.target);
        let defender = target_cell.owner;

        if defender == Some(agent) {
            let cell = self.state.grid.cell_mut(mv.target);
            cell.army = cell.army.saturating_add(moving);
            return;
        }

        let defending = target_cell.army;
        if moving > defending {
            let at = self
                .state
                .grid
                .coord_at_index(mv.target)
                .expect("target in-bounds");
            let captured_general = target_cell.terrain == TerrainKind::General;

            let cell = self.state.grid.cell_mut(mv.target);
            cell.owner = Some(agent);
            cell.army = moving - defending;

            events.push(Event::CellCaptured {
                at,
                by: agent,
                from: defender,
            });

            if captured_general {
                let victim = defender.expect("generals stay owned until capture");
                events.push(Event::GeneralCaptured {
                    at,
                    by: agent,
                    victim,
                });
                self.eliminate(victim, agent, mv.target, events);
            }
        } else {
            self.state.grid.cell_mut(mv.target).army = defending - moving;
        }
    }

    /// General capture: the victim dies immediately, every tile it owned
    /// transfers to the captor, and the fallen general becomes a city.
    fn eliminate(&mut self, victim: AgentId, by: AgentId, general_index: usize, events: &mut Vec<Event>) {
        self.state.agents[victim.0 as usize].alive = false;
        for index in 0..self.state.grid.len() {
            let cell = self.state.grid.cell_mut(index);
            if cell.owner == Some(victim) {
                cell.owner = Some(by);
            }
        }
        self.state.grid.cell_mut(general_index).terrain = TerrainKind::City;
        events.push(Event::AgentEliminated { agent: victim, by });
    }
}

struct ValidatedMove {
    source: usize,
    target: usize,
    split: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::state::{AgentRecord, AgentVisibility};
    use warfront_protocol::{snapshot_hash, Coord, Direction};

    fn engine_from_state(mut state: GameState, config: EngineConfig) -> GameEngine {
        state.recompute_totals();
        refresh_visibility(&mut state);
        GameEngine {
            init: GameInit {
                seed: 0,
                grid_config: GridGenConfig::default(),
                names: state.agents.iter().map(|a| a.name.clone()).collect(),
            },
            config,
            state,
            action_log: Vec::new(),
            done: false,
            winner: None,
            end_reason: None,
        }
    }

    /// 6x6 open field, generals in opposite corners with the given armies.
    fn duel_state(army0: u32, army1: u32) -> GameState {
        let mut grid = Grid::new(6, 6, TerrainKind::Plain);
        let spots = [
            (Coord { x: 0, y: 0 }, AgentId(0), army0),
            (Coord { x: 5, y: 5 }, AgentId(1), army1),
        ];
        for (at, id, army) in spots {
            let cell = grid.get_mut(at).unwrap();
            cell.terrain = TerrainKind::General;
            cell.owner = Some(id);
            cell.army = army;
        }
        let grid_len = grid.len();
        GameState {
            grid,
            agents: spots
                .iter()
                .map(|(at, id, army)| AgentRecord {
                    id: *id,
                    name: format!("{id}"),
                    alive: true,
                    general: *at,
                    land: 1,
                    army: u64::from(*army),
                })
                .collect(),
            tick: 0,
            visibility: vec![AgentVisibility::new(grid_len), AgentVisibility::new(grid_len)],
        }
    }

    fn mv(x: i32, y: i32, dir: Direction) -> Action {
        Action::Move {
            from: Coord { x, y },
            dir,
            split: false,
        }
    }

    fn acts(pairs: &[(u8, Action)]) -> BTreeMap<AgentId, Action> {
        pairs.iter().map(|(id, a)| (AgentId(*id), *a)).collect()
    }

    #[test]
    fn expanding_onto_neutral_cell_takes_it() {
        let mut engine = engine_from_state(duel_state(5, 5), EngineConfig::default());
        let outcome = engine.step(&acts(&[(0, mv(0, 0, Direction::Right))]));

        assert!(!outcome.done);
        assert_eq!(engine.state().tick, 1);
        // Growth ran first: general went 5 -> 6, then 5 moved out.
        let source = engine.state().grid.get(Coord { x: 0, y: 0 }).unwrap();
        assert_eq!(source.army, 1);
        let target = engine.state().grid.get(Coord { x: 1, y: 0 }).unwrap();
        assert_eq!(target.owner, Some(AgentId(0)));
        assert_eq!(target.army, 5);
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, Event::CellCaptured { by: AgentId(0), .. })));
    }

    #[test]
    fn moving_into_own_cell_sums_armies() {
        let mut state = duel_state(5, 5);
        let side = state.grid.get_mut(Coord { x: 1, y: 0 }).unwrap();
        side.owner = Some(AgentId(0));
        side.army = 3;
        let mut engine = engine_from_state(state, EngineConfig::default());

        engine.step(&acts(&[(0, mv(0, 0, Direction::Right))]));
        let target = engine.state().grid.get(Coord { x: 1, y: 0 }).unwrap();
        // General grew to 6 and sent 5; the plain cell kept its 3 (tick 1 is
        // not a growth tick for ordinary cells).
        assert_eq!(target.army, 8);
        assert_eq!(target.owner, Some(AgentId(0)));
    }

    #[test]
    fn insufficient_attack_only_whittles_defender() {
        let mut state = duel_state(4, 5);
        let wall = state.grid.get_mut(Coord { x: 1, y: 0 }).unwrap();
        wall.owner = Some(AgentId(1));
        wall.army = 10;
        let mut engine = engine_from_state(state, EngineConfig::default());

        engine.step(&acts(&[(0, mv(0, 0, Direction::Right))]));
        let wall = engine.state().grid.get(Coord { x: 1, y: 0 }).unwrap();
        assert_eq!(wall.owner, Some(AgentId(1)));
        // Attacker sent 4 (4+1 growth-1); defender 10 -> 6.
        assert_eq!(wall.army, 6);
    }

    #[test]
    fn army_is_conserved_by_moves_without_capture_loss() {
        let mut engine = engine_from_state(duel_state(9, 9), EngineConfig::default());
        let before: u64 = engine
            .state()
            .grid
            .cells()
            .iter()
            .map(|c| u64::from(c.army))
            .sum();

        engine.step(&acts(&[(0, mv(0, 0, Direction::Right))]));

        let after: u64 = engine
            .state()
            .grid
            .cells()
            .iter()
            .map(|c| u64::from(c.army))
            .sum();
        // Tick 1: only the two generals grow (+2). Movement moves armies,
        // never creates or destroys them.
        assert_eq!(after, before + 2);
    }

    #[test]
    fn capturing_a_general_sweeps_territory_and_ends_the_duel() {
        let mut state = duel_state(5, 3);
        // Put agent 0 next to agent 1's general with a sweepable extra tile.
        let staging = state.grid.get_mut(Coord { x: 5, y: 4 }).unwrap();
        staging.owner = Some(AgentId(0));
        staging.army = 5;
        let outpost = state.grid.get_mut(Coord { x: 2, y: 2 }).unwrap();
        outpost.owner = Some(AgentId(1));
        outpost.army = 7;
        let mut engine = engine_from_state(state, EngineConfig::default());

        // At resolution the general has grown to 4, so the attacker needs to
        // send 5: set the staging stack to 6 before the tick.
        engine.state.grid.get_mut(Coord { x: 5, y: 4 }).unwrap().army = 6;
        let outcome = engine.step(&acts(&[(0, mv(5, 4, Direction::Down))]));

        assert!(outcome.done);
        assert!(!outcome.truncated);
        assert_eq!(engine.winner(), Some(AgentId(0)));
        assert!(!engine.state().agents[1].alive);

        // Every tile agent 1 owned now belongs to agent 0.
        assert!(engine
            .state()
            .grid
            .cells()
            .iter()
            .all(|c| c.owner != Some(AgentId(1))));
        // The fallen general is a city now.
        assert_eq!(
            engine.state().grid.get(Coord { x: 5, y: 5 }).unwrap().terrain,
            TerrainKind::City
        );
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, Event::AgentEliminated { agent: AgentId(1), .. })));
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            Event::GameEnded {
                winner: Some(AgentId(0)),
                reason: EndReason::Conquest
            }
        )));
    }

    #[test]
    fn eliminated_agents_actions_are_ignored() {
        let mut state = duel_state(5, 3);
        state.agents[1].alive = false;
        state.grid.get_mut(Coord { x: 5, y: 5 }).unwrap().owner = Some(AgentId(0));
        let mut engine = engine_from_state(state, EngineConfig::default());

        let outcome = engine.step(&acts(&[(1, mv(5, 5, Direction::Up))]));
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            Event::ActionRejected {
                agent: AgentId(1),
                reason: RejectReason::Eliminated,
                ..
            }
        )));
    }

    #[test]
    fn invalid_actions_leave_state_untouched_except_growth() {
        let mut engine = engine_from_state(duel_state(5, 5), EngineConfig::default());
        let bad_actions = [
            // Not owned by agent 0.
            mv(5, 5, Direction::Up),
            // Off the board.
            mv(0, 0, Direction::Left),
            // Source out of bounds.
            mv(-1, 0, Direction::Right),
        ];

        for (i, bad) in bad_actions.into_iter().enumerate() {
            let outcome = engine.step(&acts(&[(0, bad)]));
            assert!(outcome
                .events
                .iter()
                .any(|e| matches!(e, Event::ActionRejected { agent: AgentId(0), .. })));

            // Re-run a pristine copy with pure idles; states must match,
            // which means the rejected action changed nothing else.
            let mut idle_twin = engine_from_state(duel_state(5, 5), EngineConfig::default());
            for _ in 0..=i {
                idle_twin.step(&BTreeMap::new());
            }
            assert_eq!(
                snapshot_hash(&engine.snapshot()).unwrap(),
                snapshot_hash(&idle_twin.snapshot()).unwrap()
            );
        }
    }

    #[test]
    fn one_army_cells_cannot_move() {
        // Generals grow every tick, so use a plain cell stuck at 1 army.
        let mut state = duel_state(5, 5);
        let stuck = state.grid.get_mut(Coord { x: 2, y: 0 }).unwrap();
        stuck.owner = Some(AgentId(0));
        stuck.army = 1;
        let mut engine = engine_from_state(state, EngineConfig::default());

        let outcome = engine.step(&acts(&[(0, mv(2, 0, Direction::Right))]));
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            Event::ActionRejected {
                reason: RejectReason::InsufficientArmy,
                ..
            }
        )));
    }

    #[test]
    fn mountain_targets_are_rejected() {
        let mut state = duel_state(5, 5);
        state.grid.get_mut(Coord { x: 1, y: 0 }).unwrap().terrain = TerrainKind::Mountain;
        let mut engine = engine_from_state(state, EngineConfig::default());

        let outcome = engine.step(&acts(&[(0, mv(0, 0, Direction::Right))]));
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            Event::ActionRejected {
                reason: RejectReason::MountainTarget,
                ..
            }
        )));
    }

    #[test]
    fn split_moves_send_the_configured_fraction() {
        let mut state = duel_state(5, 5);
        state.grid.get_mut(Coord { x: 0, y: 0 }).unwrap().army = 10;
        let mut engine = engine_from_state(state, EngineConfig::default());

        engine.step(&acts(&[(0, Action::Move {
            from: Coord { x: 0, y: 0 },
            dir: Direction::Right,
            split: true,
        })]));

        // Growth: 10 -> 11; split ratio 0.5 sends floor(11 * 0.5) = 5.
        assert_eq!(engine.state().grid.get(Coord { x: 0, y: 0 }).unwrap().army, 6);
        assert_eq!(engine.state().grid.get(Coord { x: 1, y: 0 }).unwrap().army, 5);
    }

    #[test]
    fn growth_respects_interval_and_fast_cells() {
        let mut state = duel_state(2, 2);
        let plain = state.grid.get_mut(Coord { x: 1, y: 1 }).unwrap();
        plain.owner = Some(AgentId(0));
        plain.army = 1;
        let mut engine = engine_from_state(state, EngineConfig::default());

        engine.step(&BTreeMap::new()); // tick 1: generals only
        assert_eq!(engine.state().grid.get(Coord { x: 0, y: 0 }).unwrap().army, 3);
        assert_eq!(engine.state().grid.get(Coord { x: 1, y: 1 }).unwrap().army, 1);

        engine.step(&BTreeMap::new()); // tick 2: everyone
        assert_eq!(engine.state().grid.get(Coord { x: 0, y: 0 }).unwrap().army, 4);
        assert_eq!(engine.state().grid.get(Coord { x: 1, y: 1 }).unwrap().army, 2);
    }

    #[test]
    fn max_ticks_truncates_without_winner() {
        let config = EngineConfig {
            max_ticks: 3,
            ..Default::default()
        };
        let mut engine = engine_from_state(duel_state(5, 5), config);
        let mut last = None;
        for _ in 0..3 {
            last = Some(engine.step(&BTreeMap::new()));
        }
        let outcome = last.unwrap();
        assert!(outcome.done);
        assert!(outcome.truncated);
        assert_eq!(engine.winner(), None);
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            Event::GameEnded {
                winner: None,
                reason: EndReason::Truncation
            }
        )));

        // Further steps are no-ops.
        let after = engine.step(&BTreeMap::new());
        assert!(after.done);
        assert_eq!(engine.state().tick, 3);
    }

    #[test]
    fn opening_move_claims_adjacent_neutral_cell() {
        let grid_config = GridGenConfig {
            width: 10,
            height: 10,
            min_general_distance: 4,
            ..Default::default()
        };
        let names = vec!["a".to_string(), "b".to_string()];

        // Seed-driven: find the first seed from 7 where agent 0's general has
        // an empty plain neighbor, then play the classic opening move.
        for seed in 7.. {
            let mut engine =
                GameEngine::new(grid_config.clone(), EngineConfig::default(), &names, seed)
                    .expect("engine");
            let general = engine.state().agents[0].general;
            let Some(dir) = Direction::ALL.into_iter().find(|dir| {
                engine
                    .state()
                    .grid
                    .get(general + dir.offset())
                    .is_some_and(|c| c.terrain == TerrainKind::Plain && c.army == 0)
            }) else {
                continue;
            };

            engine.step(&acts(&[(0, Action::Move {
                from: general,
                dir,
                split: false,
            })]));

            assert_eq!(engine.state().tick, 1);
            // General grew to 2 at tick 1, then sent everything but one.
            let claimed = engine.state().grid.get(general + dir.offset()).unwrap();
            assert_eq!(claimed.owner, Some(AgentId(0)));
            assert_eq!(claimed.army, 1);
            assert_eq!(engine.state().grid.get(general).unwrap().army, 1);
            return;
        }
    }

    #[test]
    fn full_matches_are_deterministic_from_seed_and_log() {
        let grid_config = GridGenConfig {
            width: 10,
            height: 10,
            min_general_distance: 4,
            ..Default::default()
        };
        let names = vec!["a".to_string(), "b".to_string()];
        let script: Vec<BTreeMap<AgentId, Action>> = (0..30)
            .map(|i| {
                acts(&[(0, if i % 3 == 0 { Action::Idle } else { mv(0, 0, Direction::Right) })])
            })
            .collect();

        let run = |seed| {
            let mut engine =
                GameEngine::new(grid_config.clone(), EngineConfig::default(), &names, seed)
                    .expect("engine");
            let mut hashes = Vec::new();
            for actions in &script {
                engine.step(actions);
                hashes.push(snapshot_hash(&engine.snapshot()).unwrap());
            }
            hashes
        };

        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }
}
