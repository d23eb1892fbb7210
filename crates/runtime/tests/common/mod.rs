//! Shared fixtures for the runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use arena_core::{CharacterProfile, GameData, RealmDefinition};
use arena_runtime::{ArenaRuntime, Guild, GuildId, ManualClock, Player, RuntimeConfig};
use chrono::{DateTime, Utc};

pub const STRONG: GuildId = GuildId(1);
pub const WEAK: GuildId = GuildId(2);

/// Realm 0 is a novice; realm 1 one-shots any novice.
pub fn game_data() -> GameData {
    let realm = |name: &str, hp: f64, atk: f64| RealmDefinition {
        name: name.into(),
        base_hp: hp,
        base_atk: atk,
        base_def: 10.0,
        base_speed: 10.0,
        ..RealmDefinition::default()
    };
    GameData {
        realms: vec![realm("Qi Refining", 300.0, 20.0), realm("Core", 3_000.0, 400.0)],
        ..GameData::default()
    }
}

pub fn epoch() -> DateTime<Utc> {
    "2026-03-01T12:00:00Z".parse().expect("valid timestamp")
}

pub fn runtime(clock: &Arc<ManualClock>) -> ArenaRuntime {
    ArenaRuntime::builder(game_data())
        .config(RuntimeConfig::default())
        .clock(clock.clone())
        .seed(2026)
        .build()
}

/// Adds a guild whose members are named `{prefix}0..{prefix}{size-1}`,
/// led by `{prefix}0`.
pub fn add_guild(
    runtime: &ArenaRuntime,
    id: GuildId,
    prefix: &str,
    size: usize,
    realm_index: usize,
) -> Vec<String> {
    runtime
        .upsert_guild(
            Guild::new(id, format!("{prefix} guild"), 1).with_leader(format!("{prefix}0")),
        )
        .expect("guild");
    (0..size)
        .map(|i| {
            let name = format!("{prefix}{i}");
            let profile = CharacterProfile {
                realm_index,
                ..CharacterProfile::default()
            };
            runtime
                .upsert_player(Player::new(name.clone(), profile).with_guild(id))
                .expect("player");
            name
        })
        .collect()
}

pub fn currency(runtime: &ArenaRuntime, name: &str) -> u64 {
    runtime
        .player(name)
        .expect("read")
        .map(|p| p.wallet.currency)
        .expect("player exists")
}

pub fn honor(runtime: &ArenaRuntime, name: &str) -> u64 {
    runtime
        .player(name)
        .expect("read")
        .map(|p| p.wallet.honor)
        .expect("player exists")
}
