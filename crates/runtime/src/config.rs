//! Runtime configuration and environment overrides.

use std::env;
use std::time::Duration;

use arena_core::CombatConfig;
use chrono::TimeDelta;

/// Runtime configuration shared by the request surface and the scheduler.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// How often the scheduler worker runs a tick.
    pub tick_interval: Duration,
    /// Time after a war's start during which guilds may register.
    pub registration_window: TimeDelta,
    /// Minimum spacing between two challenges by the same attacker.
    pub pvp_cooldown: TimeDelta,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    pub combat: CombatConfig,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_SECS: u64 = 60;
    pub const DEFAULT_REGISTRATION_MINUTES: i64 = 60;
    pub const DEFAULT_PVP_COOLDOWN_SECS: i64 = 300;
    pub const DEFAULT_EVENT_BUFFER: usize = 256;

    /// Defaults overridden by `ARENA_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default value:
    /// - `ARENA_TICK_SECS`
    /// - `ARENA_REGISTRATION_MINUTES`
    /// - `ARENA_PVP_COOLDOWN_SECS`
    /// - `ARENA_EVENT_BUFFER`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = read_env::<u64>("ARENA_TICK_SECS").filter(|s| *s > 0) {
            config.tick_interval = Duration::from_secs(secs);
        }
        if let Some(window) =
            read_env::<i64>("ARENA_REGISTRATION_MINUTES").and_then(TimeDelta::try_minutes)
        {
            config.registration_window = window;
        }
        if let Some(cooldown) =
            read_env::<i64>("ARENA_PVP_COOLDOWN_SECS").and_then(TimeDelta::try_seconds)
        {
            config.pvp_cooldown = cooldown;
        }
        if let Some(size) = read_env::<usize>("ARENA_EVENT_BUFFER").filter(|s| *s > 0) {
            config.event_buffer_size = size;
        }

        config
    }

    #[must_use]
    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    #[must_use]
    pub fn with_registration_window(mut self, window: TimeDelta) -> Self {
        self.registration_window = window;
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(Self::DEFAULT_TICK_SECS),
            registration_window: TimeDelta::minutes(Self::DEFAULT_REGISTRATION_MINUTES),
            pvp_cooldown: TimeDelta::seconds(Self::DEFAULT_PVP_COOLDOWN_SECS),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            combat: CombatConfig::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_war_rhythm() {
        let config = RuntimeConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(60));
        assert_eq!(config.registration_window, TimeDelta::hours(1));
        assert_eq!(config.pvp_cooldown, TimeDelta::minutes(5));
        assert_eq!(config.combat.max_turns, 50);
    }

    #[test]
    fn read_env_ignores_garbage() {
        assert_eq!(read_env::<u64>("ARENA_TEST_UNSET_VARIABLE"), None);
    }
}
