//! Headless self-play harness.
//!
//! Runs scripted-agent matches to completion and collects balance metrics:
//! match length, capture counts, win rates across a seed sweep.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use warfront_protocol::{Action, AgentId, Event};

use crate::agents::{Agent, ExpanderAgent, RandomAgent};
use crate::engine::{EngineConfig, EngineError, GameEngine};
use crate::gridgen::GridGenConfig;

/// Which scripted agent fills a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Expander,
}

impl AgentKind {
    fn build(self, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::new(seed)),
            AgentKind::Expander => Box::new(ExpanderAgent::new(seed)),
        }
    }
}

/// Configuration for a self-play run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub grid: GridGenConfig,
    pub engine: EngineConfig,
    /// Base seed; batch runs offset it per match.
    pub seed: u64,
    /// One seat per agent; length must match `grid.num_agents`.
    pub matchup: Vec<AgentKind>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            grid: GridGenConfig::default(),
            engine: EngineConfig::default(),
            seed: 42,
            matchup: vec![AgentKind::Random, AgentKind::Expander],
        }
    }
}

/// How a match ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// One agent holds the only surviving general.
    Conquest { winner: AgentId },
    /// Tick limit reached, or everyone died on the same tick.
    Truncated,
}

/// Per-agent statistics for one match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentStats {
    pub id: AgentId,
    pub name: String,
    pub cells_captured: u32,
    pub generals_captured: u32,
    pub actions_rejected: u32,
    pub eliminated: bool,
    pub final_land: u32,
    pub final_army: u64,
}

/// Metrics collected during one match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchMetrics {
    pub ticks_played: u32,
    pub total_captures: u32,
    pub total_eliminations: u32,
    pub agent_stats: Vec<AgentStats>,
}

/// Result of a single self-play match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelfPlayResult {
    pub seed: u64,
    pub outcome: MatchOutcome,
    pub metrics: MatchMetrics,
    pub duration_ms: u64,
}

/// Results of a seed-sweep batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchSelfPlayResult {
    pub matches_played: u32,
    pub results: Vec<SelfPlayResult>,
    pub aggregate: AggregateMetrics,
}

/// Aggregates across a batch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub avg_match_length: f64,
    pub match_length_std: f64,
    /// Per-seat win fraction; near-equal rates mean a balanced matchup.
    pub win_rates: Vec<f64>,
    /// Fraction of matches decided by conquest rather than the tick limit.
    pub conquest_rate: f64,
    pub avg_captures: f64,
}

/// Run one match to completion.
pub fn run_selfplay(config: &SelfPlayConfig) -> Result<SelfPlayResult, EngineError> {
    let start = std::time::Instant::now();

    let names: Vec<String> = config
        .matchup
        .iter()
        .enumerate()
        .map(|(i, kind)| format!("{kind:?}-{i}").to_lowercase())
        .collect();
    let mut engine = GameEngine::new(
        config.grid.clone(),
        config.engine.clone(),
        &names,
        config.seed,
    )?;

    let mut bots: Vec<Box<dyn Agent>> = config
        .matchup
        .iter()
        .enumerate()
        .map(|(i, kind)| kind.build(config.seed.wrapping_add(i as u64)))
        .collect();

    let mut metrics = MatchMetrics {
        agent_stats: names
            .iter()
            .enumerate()
            .map(|(raw, name)| AgentStats {
                id: AgentId(raw as u8),
                name: name.clone(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    while !engine.done() {
        let actions: BTreeMap<AgentId, Action> = bots
            .iter_mut()
            .enumerate()
            .map(|(raw, bot)| {
                let id = AgentId(raw as u8);
                (id, bot.act(&engine.observe(id)))
            })
            .collect();
        let outcome = engine.step(&actions);
        for event in &outcome.events {
            tally_event(event, &mut metrics);
        }
    }

    metrics.ticks_played = engine.state().tick;
    for stats in &mut metrics.agent_stats {
        let record = &engine.state().agents[stats.id.0 as usize];
        stats.eliminated = !record.alive;
        stats.final_land = record.land;
        stats.final_army = record.army;
    }

    let outcome = match engine.winner() {
        Some(winner) => MatchOutcome::Conquest { winner },
        None => MatchOutcome::Truncated,
    };
    info!(
        seed = config.seed,
        ticks = metrics.ticks_played,
        ?outcome,
        "match finished"
    );

    Ok(SelfPlayResult {
        seed: config.seed,
        outcome,
        metrics,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Run `num_matches` matches over consecutive seeds and aggregate.
pub fn run_batch_selfplay(
    config: &SelfPlayConfig,
    num_matches: u32,
) -> Result<BatchSelfPlayResult, EngineError> {
    let mut results = Vec::with_capacity(num_matches as usize);
    for i in 0..num_matches {
        let mut match_config = config.clone();
        match_config.seed = config.seed.wrapping_add(u64::from(i));
        results.push(run_selfplay(&match_config)?);
    }

    let aggregate = compute_aggregate(&results, config.matchup.len());
    Ok(BatchSelfPlayResult {
        matches_played: num_matches,
        results,
        aggregate,
    })
}

fn tally_event(event: &Event, metrics: &mut MatchMetrics) {
    match event {
        Event::CellCaptured { by, .. } => {
            metrics.total_captures += 1;
            if let Some(stats) = metrics.agent_stats.get_mut(by.0 as usize) {
                stats.cells_captured += 1;
            }
        }
        Event::GeneralCaptured { by, .. } => {
            if let Some(stats) = metrics.agent_stats.get_mut(by.0 as usize) {
                stats.generals_captured += 1;
            }
        }
        Event::AgentEliminated { .. } => {
            metrics.total_eliminations += 1;
        }
        Event::ActionRejected { agent, .. } => {
            if let Some(stats) = metrics.agent_stats.get_mut(agent.0 as usize) {
                stats.actions_rejected += 1;
            }
        }
        _ => {}
    }
}

fn compute_aggregate(results: &[SelfPlayResult], num_agents: usize) -> AggregateMetrics {
    if results.is_empty() {
        return AggregateMetrics::default();
    }
    let n = results.len() as f64;

    let lengths: Vec<f64> = results
        .iter()
        .map(|r| f64::from(r.metrics.ticks_played))
        .collect();
    let avg = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|&l| (l - avg).powi(2)).sum::<f64>() / n;

    let mut wins = vec![0u32; num_agents];
    let mut conquests = 0u32;
    for result in results {
        if let MatchOutcome::Conquest { winner } = result.outcome {
            conquests += 1;
            if let Some(w) = wins.get_mut(winner.0 as usize) {
                *w += 1;
            }
        }
    }

    let avg_captures = results
        .iter()
        .map(|r| f64::from(r.metrics.total_captures))
        .sum::<f64>()
        / n;

    AggregateMetrics {
        avg_match_length: avg,
        match_length_std: variance.sqrt(),
        win_rates: wins.iter().map(|&w| f64::from(w) / n).collect(),
        conquest_rate: f64::from(conquests) / n,
        avg_captures,
    }
}
