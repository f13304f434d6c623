//! Scripted agents for self-play and testing.
//!
//! Agents see only their own [`Observation`]; nothing here touches the
//! authoritative state.

use warfront_protocol::{Action, Coord, Direction, Observation, TerrainKind};

use crate::rng::GameRng;

pub trait Agent {
    fn name(&self) -> &str;

    /// Pick this tick's action from the fogged view.
    fn act(&mut self, obs: &Observation) -> Action;

    /// Restore the agent to a fresh state for a new match.
    fn reset(&mut self, seed: u64);
}

fn owned_movable_cells(obs: &Observation) -> Vec<(Coord, u32)> {
    let me = obs.me.id;
    let mut out = Vec::new();
    for y in 0..obs.height as i32 {
        for x in 0..obs.width as i32 {
            let at = Coord { x, y };
            let Some(cell) = obs.cell(at) else { continue };
            if cell.owner == Some(me) {
                if let Some(army) = cell.army {
                    if army > 1 {
                        out.push((at, army));
                    }
                }
            }
        }
    }
    out
}

fn passable_target(obs: &Observation, from: Coord, dir: Direction) -> bool {
    let target = from + dir.offset();
    match obs.cell(target) {
        // Unseen in-bounds cells are fair game; only known mountains are not.
        Some(view) => view.terrain != Some(TerrainKind::Mountain),
        None => false,
    }
}

/// Uniform-random mover. Useful as a determinism workload and a baseline
/// opponent.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    name: String,
    rng: GameRng,
    /// Probability of idling even when a move exists.
    pub idle_chance: f32,
    /// Probability that a chosen move is a split.
    pub split_chance: f32,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            name: "random".to_string(),
            rng: GameRng::seed_from_u64(seed),
            idle_chance: 0.1,
            split_chance: 0.2,
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&mut self, obs: &Observation) -> Action {
        if self.rng.chance(self.idle_chance) {
            return Action::Idle;
        }
        let sources = owned_movable_cells(obs);
        if sources.is_empty() {
            return Action::Idle;
        }
        let (from, _) = sources[self.rng.gen_range_u32(sources.len() as u32) as usize];

        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| passable_target(obs, from, *dir))
            .collect();
        if options.is_empty() {
            return Action::Idle;
        }
        let dir = options[self.rng.gen_range_u32(options.len() as u32) as usize];

        Action::Move {
            from,
            dir,
            split: self.rng.chance(self.split_chance),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.rng = GameRng::seed_from_u64(seed);
    }
}

/// Greedy expander: capture a beatable enemy cell if one is adjacent,
/// otherwise claim neutral or unseen ground, otherwise shuffle armies
/// randomly to keep the front moving.
#[derive(Clone, Debug)]
pub struct ExpanderAgent {
    name: String,
    rng: GameRng,
}

impl ExpanderAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            name: "expander".to_string(),
            rng: GameRng::seed_from_u64(seed),
        }
    }

    fn score(&self, obs: &Observation, from: Coord, army: u32, dir: Direction) -> Option<u32> {
        let target = from + dir.offset();
        let view = obs.cell(target)?;
        if view.terrain == Some(TerrainKind::Mountain) {
            return None;
        }
        let me = obs.me.id;
        match view.owner {
            Some(owner) if owner == me => Some(0),
            Some(_) => {
                // Enemy cell: only worth it when the whole moving army wins.
                let defending = view.army.unwrap_or(0);
                (army - 1 > defending).then_some(3)
            }
            None if !view.visible => Some(2),
            None => {
                let defending = view.army.unwrap_or(0);
                if defending == 0 {
                    Some(2)
                } else {
                    // Garrisoned neutral city.
                    (army - 1 > defending).then_some(1)
                }
            }
        }
    }
}

impl Agent for ExpanderAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&mut self, obs: &Observation) -> Action {
        let sources = owned_movable_cells(obs);
        if sources.is_empty() {
            return Action::Idle;
        }

        let mut best: Option<(u32, Coord, Direction)> = None;
        for &(from, army) in &sources {
            for dir in Direction::ALL {
                let Some(score) = self.score(obs, from, army, dir) else {
                    continue;
                };
                let candidate = (score, from, dir);
                if best.map_or(true, |b| candidate.0 > b.0) {
                    best = Some(candidate);
                }
            }
        }

        match best {
            Some((score, from, dir)) if score > 0 => Action::Move {
                from,
                dir,
                split: false,
            },
            _ => {
                // Nothing to take; push the largest stack in a random legal
                // direction instead of sitting still.
                let (from, _) = *sources
                    .iter()
                    .max_by_key(|(_, army)| *army)
                    .expect("nonempty");
                let options: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|dir| passable_target(obs, from, *dir))
                    .collect();
                if options.is_empty() {
                    return Action::Idle;
                }
                let dir = options[self.rng.gen_range_u32(options.len() as u32) as usize];
                Action::Move {
                    from,
                    dir,
                    split: false,
                }
            }
        }
    }

    fn reset(&mut self, seed: u64) {
        self.rng = GameRng::seed_from_u64(seed);
    }
}
