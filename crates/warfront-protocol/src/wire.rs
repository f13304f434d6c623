use rmp_serde::{decode, encode};
use thiserror::Error;

use crate::{Action, Event, Observation, ReplayFile, Snapshot};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("encode error: {0}")]
    Encode(#[from] encode::Error),
    #[error("decode error: {0}")]
    Decode(#[from] decode::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize_action(action: &Action) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(action)?)
}

pub fn deserialize_action(bytes: &[u8]) -> Result<Action, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_events(events: &[Event]) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(events)?)
}

pub fn deserialize_events(bytes: &[u8]) -> Result<Vec<Event>, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(snapshot)?)
}

pub fn deserialize_snapshot(bytes: &[u8]) -> Result<Snapshot, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_observation(observation: &Observation) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(observation)?)
}

pub fn deserialize_observation(bytes: &[u8]) -> Result<Observation, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_replay(replay: &ReplayFile) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(replay)?)
}

pub fn deserialize_replay(bytes: &[u8]) -> Result<ReplayFile, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_action_json(action: &Action) -> Result<String, WireError> {
    Ok(serde_json::to_string(action)?)
}

pub fn deserialize_action_json(json: &str) -> Result<Action, WireError> {
    Ok(serde_json::from_str(json)?)
}

pub fn serialize_events_json(events: &[Event]) -> Result<String, WireError> {
    Ok(serde_json::to_string(events)?)
}

pub fn deserialize_events_json(json: &str) -> Result<Vec<Event>, WireError> {
    Ok(serde_json::from_str(json)?)
}

pub fn serialize_snapshot_json(snapshot: &Snapshot) -> Result<String, WireError> {
    Ok(serde_json::to_string(snapshot)?)
}

pub fn deserialize_snapshot_json(json: &str) -> Result<Snapshot, WireError> {
    Ok(serde_json::from_str(json)?)
}

pub fn serialize_replay_json(replay: &ReplayFile) -> Result<String, WireError> {
    Ok(serde_json::to_string(replay)?)
}

pub fn deserialize_replay_json(json: &str) -> Result<ReplayFile, WireError> {
    Ok(serde_json::from_str(json)?)
}

/// Deterministic snapshot hash for divergence detection and replay
/// verification.
///
/// Hashes the MessagePack-serialized snapshot using FNV-1a 64-bit.
pub fn snapshot_hash(snapshot: &Snapshot) -> Result<u64, WireError> {
    let bytes = serialize_snapshot(snapshot)?;
    Ok(hash_bytes_fnv1a64(&bytes))
}

/// Deterministic, stable 64-bit hash for raw bytes (FNV-1a).
pub fn hash_bytes_fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
