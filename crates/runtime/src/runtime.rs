//! High-level runtime façade.
//!
//! [`ArenaRuntime`] owns the store, the game data oracle, the clock and the
//! event bus. Every mutating operation runs as one store transaction with one
//! game data snapshot and one `now`; events raised inside are published only
//! after the transaction commits.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arena_core::{GameData, GlobalModifier, Reward, compute_seed};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::info;

use crate::adapters::{self, PvpReport, TrialReport};
use crate::api::Result;
use crate::clock::{Clock, SystemClock};
use crate::config::RuntimeConfig;
use crate::context::{ArenaContext, Outbox};
use crate::events::{Event, EventBus, Topic};
use crate::matches::{self, AdvanceMode, RoundReport};
use crate::oracle::GameDataOracle;
use crate::repository::{
    FightResult, Guild, GuildId, InMemoryWarStore, MatchId, Player, PvpRecord, WarId, WarStore,
    WarTables,
};
use crate::scheduler::{self, TickReport};
use crate::views::{self, MemberEligibility, WarOverview};
use crate::workers::{SchedulerHandle, SchedulerWorker};

/// Separates runtime-drawn seeds from duel seeds derived with the same mixer.
const RUNTIME_SEED_CONTEXT: u32 = 0x7275_6e74;

/// Guild arena runtime.
///
/// Cheap to clone; clones share the same store and event bus.
pub struct ArenaRuntime<S = InMemoryWarStore> {
    inner: Arc<Shared<S>>,
}

struct Shared<S> {
    store: S,
    oracle: GameDataOracle,
    clock: Arc<dyn Clock>,
    events: EventBus,
    config: RuntimeConfig,
    base_seed: u64,
    nonce: AtomicU64,
}

impl<S> Clone for ArenaRuntime<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ArenaRuntime<InMemoryWarStore> {
    /// Create a runtime builder over an in-memory store.
    pub fn builder(data: GameData) -> RuntimeBuilder<InMemoryWarStore> {
        RuntimeBuilder::new(data)
    }
}

impl<S: WarStore> ArenaRuntime<S> {
    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.inner.events.subscribe(topic)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    /// Current game data snapshot.
    pub fn game_data(&self) -> Arc<GameData> {
        self.inner.oracle.snapshot()
    }

    // ------------------------------------------------------------------
    // Wars and matches
    // ------------------------------------------------------------------

    pub fn schedule_war(
        &self,
        name: &str,
        start_time: DateTime<Utc>,
        rewards: Vec<Reward>,
    ) -> Result<WarId> {
        self.run(|tables, _, outbox| {
            Ok(scheduler::schedule_war(tables, outbox, name, start_time, rewards))
        })
    }

    /// Registers `guild` for `war` on behalf of its leader `by`.
    pub fn register_guild(&self, war: WarId, guild: GuildId, by: &str) -> Result<bool> {
        self.run(|tables, _, outbox| scheduler::register_guild(tables, outbox, war, guild, by))
    }

    /// Submits the lineup of `guild` on behalf of its leader `by`.
    pub fn submit_lineup<N: AsRef<str>>(
        &self,
        match_id: MatchId,
        guild: GuildId,
        by: &str,
        round: u8,
        fighters: &[N],
    ) -> Result<()> {
        self.run(|tables, ctx, outbox| {
            matches::submit_lineup(tables, ctx, outbox, match_id, guild, by, round, fighters)
        })
    }

    /// Resolves the current round if both lineups are in.
    pub fn try_advance_round(&self, match_id: MatchId) -> Result<RoundReport> {
        self.advance(match_id, AdvanceMode::WhenReady)
    }

    /// Resolves the current round regardless of missing lineups.
    ///
    /// Administrative recovery for a stalled match; a missing lineup forfeits
    /// its duels.
    pub fn force_advance(&self, match_id: MatchId) -> Result<RoundReport> {
        self.advance(match_id, AdvanceMode::Forced)
    }

    fn advance(&self, match_id: MatchId, mode: AdvanceMode) -> Result<RoundReport> {
        self.run(|tables, ctx, outbox| matches::advance_round(tables, ctx, outbox, match_id, mode))
    }

    /// One scheduler pass at the clock's current time.
    pub fn tick(&self) -> Result<TickReport> {
        let pairing_seed = self.next_seed();
        self.run(|tables, ctx, outbox| scheduler::tick(tables, ctx, outbox, pairing_seed))
    }

    /// Starts the periodic scheduler on the current tokio runtime.
    pub fn spawn_scheduler(&self) -> SchedulerHandle
    where
        S: 'static,
    {
        SchedulerWorker::spawn(self.clone(), self.inner.config.tick_interval)
    }

    // ------------------------------------------------------------------
    // PvE and PvP
    // ------------------------------------------------------------------

    pub fn run_trial(&self, player: &str, zone_id: &str) -> Result<TrialReport> {
        let seed = self.next_seed();
        self.run(|tables, ctx, outbox| {
            adapters::run_trial(tables, ctx, outbox, player, zone_id, seed)
        })
    }

    pub fn pvp_challenge(&self, attacker: &str, defender: &str) -> Result<PvpReport> {
        let seed = self.next_seed();
        self.run(|tables, ctx, outbox| {
            adapters::challenge(tables, ctx, outbox, attacker, defender, seed)
        })
    }

    // ------------------------------------------------------------------
    // Roster and catalog
    // ------------------------------------------------------------------

    pub fn upsert_guild(&self, guild: Guild) -> Result<()> {
        self.run(|tables, _, _| {
            tables.upsert_guild(guild);
            Ok(())
        })
    }

    pub fn upsert_player(&self, player: Player) -> Result<()> {
        self.run(|tables, _, _| {
            tables.upsert_player(player);
            Ok(())
        })
    }

    pub fn add_modifier(&self, modifier: GlobalModifier) -> Result<()> {
        self.run(|tables, _, _| {
            tables.add_modifier(modifier);
            Ok(())
        })
    }

    /// Swaps the game data snapshot used by every later operation.
    ///
    /// Operations already running keep the snapshot they started with.
    pub fn reload_game_data(&self, data: GameData) -> Arc<GameData> {
        let previous = self.inner.oracle.replace(data);
        info!("game data reloaded");
        self.inner.events.publish(Event::CatalogReloaded);
        previous
    }

    // ------------------------------------------------------------------
    // Read views
    // ------------------------------------------------------------------

    pub fn war_overview(&self, guild: GuildId) -> Result<WarOverview> {
        self.view(|tables| views::war_overview(tables, guild))
    }

    pub fn eligible_members(
        &self,
        match_id: MatchId,
        guild: GuildId,
    ) -> Result<Vec<MemberEligibility>> {
        self.view(|tables| views::eligible_members(tables, match_id, guild))?
    }

    pub fn match_fights(&self, match_id: MatchId) -> Result<Vec<FightResult>> {
        self.view(|tables| views::match_fights(tables, match_id))
    }

    pub fn pvp_history(&self, player: &str) -> Result<Vec<PvpRecord>> {
        self.view(|tables| views::pvp_history(tables, player))
    }

    pub fn player(&self, name: &str) -> Result<Option<Player>> {
        self.view(|tables| tables.player(name).cloned())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut WarTables, &ArenaContext<'_>, &mut Outbox) -> Result<T>,
    {
        let data = self.inner.oracle.snapshot();
        let ctx = ArenaContext {
            data: &data,
            config: &self.inner.config,
            now: self.inner.clock.now(),
        };

        let mut outbox = Outbox::default();
        let value = self
            .inner
            .store
            .transaction(|tables| f(tables, &ctx, &mut outbox))?;
        outbox.publish(&self.inner.events);
        Ok(value)
    }

    fn view<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WarTables) -> T,
    {
        Ok(self.inner.store.read(f)?)
    }

    fn next_seed(&self) -> u64 {
        let nonce = self.inner.nonce.fetch_add(1, Ordering::Relaxed);
        compute_seed(self.inner.base_seed, nonce, 0, RUNTIME_SEED_CONTEXT)
    }
}

/// Builder for [`ArenaRuntime`].
pub struct RuntimeBuilder<S = InMemoryWarStore> {
    data: GameData,
    config: RuntimeConfig,
    store: S,
    clock: Arc<dyn Clock>,
    seed: Option<u64>,
}

impl RuntimeBuilder<InMemoryWarStore> {
    fn new(data: GameData) -> Self {
        Self {
            data,
            config: RuntimeConfig::default(),
            store: InMemoryWarStore::new(),
            clock: Arc::new(SystemClock),
            seed: None,
        }
    }
}

impl<S: WarStore> RuntimeBuilder<S> {
    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use another store, e.g. one loaded from a snapshot.
    pub fn store<T: WarStore>(self, store: T) -> RuntimeBuilder<T> {
        RuntimeBuilder {
            data: self.data,
            config: self.config,
            store,
            clock: self.clock,
            seed: self.seed,
        }
    }

    /// Inject a clock; tests pass a [`crate::ManualClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fix the base seed so pairings and PvE/PvP rolls are reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> ArenaRuntime<S> {
        let base_seed = self.seed.unwrap_or_else(rand::random);
        info!(
            tick_interval = ?self.config.tick_interval,
            registration_window = %self.config.registration_window,
            seeded = self.seed.is_some(),
            "arena runtime ready"
        );

        ArenaRuntime {
            inner: Arc::new(Shared {
                store: self.store,
                oracle: GameDataOracle::new(self.data),
                clock: self.clock,
                events: EventBus::with_capacity(self.config.event_buffer_size),
                config: self.config,
                base_seed,
                nonce: AtomicU64::new(0),
            }),
        }
    }
}
