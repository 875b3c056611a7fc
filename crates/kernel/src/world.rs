use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tileworld_common::{Block, ChunkCoord, EntityId, ItemKind, TilePos};
use tileworld_input::{Intent, TickInput};
use tileworld_stream::WorldStore;
use tileworld_terrain::TerrainGenerator;

use crate::config::SimConfig;
use crate::daycycle::DayCycle;
use crate::entities::{EntityRegistry, PickupKind};
use crate::player::{Inventory, Player};
use crate::snapshot::Snapshot;

/// An event record produced by every mutation to the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WorldEvent {
    ChunkLoaded { coord: ChunkCoord },
    ChunkUnloaded { coord: ChunkCoord },
    BlockPlaced { tile: TilePos, block: Block },
    BlockBroken { tile: TilePos, block: Block },
    AgentSpawned { id: EntityId, position: Vec2 },
    AgentKilled { id: EntityId },
    PickupSpawned { id: EntityId, kind: PickupKind },
    PickupCollected { id: EntityId, kind: PickupKind },
    ProjectileFired { id: EntityId, velocity: Vec2 },
    ProjectileHit { projectile: EntityId, agent: EntityId },
    ProjectileExpired { id: EntityId },
    /// Simulation completed the given tick.
    Stepped { tick: u64 },
    QuitRequested { tick: u64 },
}

/// Whether the loop should keep running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Quit,
}

/// The simulation context: every piece of mutable world state.
///
/// Constructed once and passed explicitly to whatever drives the loop. All
/// mutations go through its methods; presentation reads a [`Snapshot`].
/// Given the same config and input sequence, two worlds evolve identically.
#[derive(Debug, Clone)]
pub struct World {
    config: SimConfig,
    store: WorldStore,
    player: Player,
    entities: EntityRegistry,
    day: DayCycle,
    rng: ChaCha8Rng,
    tick: u64,
    event_log: Vec<WorldEvent>,
}

impl World {
    /// A world with no agents or pickups yet. See [`World::populate`].
    ///
    /// `config` is assumed validated; a zero day length panics.
    pub fn new(config: SimConfig) -> Self {
        let inventory: Inventory = config
            .player
            .starting_inventory
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect();
        Self {
            store: WorldStore::new(TerrainGenerator::new(config.seed)),
            player: Player::new(config.player.spawn, config.player.size, inventory),
            entities: EntityRegistry::new(),
            day: DayCycle::new(config.day.length_ticks),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tick: 0,
            event_log: Vec::new(),
            config,
        }
    }

    /// Default config with the given seed, unpopulated.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimConfig::with_seed(seed))
    }

    /// Seed the starting agents and pickups around the spawn tile.
    pub fn populate(&mut self) {
        let origin = TilePos::containing(self.config.player.spawn);

        let spread = self.config.agents.initial_spread;
        for _ in 0..self.config.agents.initial_count {
            let tile = self.random_tile_near(origin, spread);
            self.spawn_agent(tile);
        }

        let spread = self.config.pickups.initial_spread;
        for _ in 0..self.config.pickups.initial_count {
            let tile = self.random_tile_near(origin, spread);
            let kind = if self.rng.gen_bool(0.5) {
                PickupKind::Sword
            } else {
                PickupKind::Gun
            };
            let id = self
                .entities
                .spawn_pickup(tile.to_world(), self.config.pickups.size, kind);
            self.event_log.push(WorldEvent::PickupSpawned { id, kind });
        }

        tracing::info!(
            agents = self.entities.agents().len(),
            pickups = self.entities.pickups().len(),
            "world populated"
        );
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityRegistry {
        &mut self.entities
    }

    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WorldStore {
        &mut self.store
    }

    pub fn day(&self) -> &DayCycle {
        &self.day
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance the simulation by one tick.
    ///
    /// Order: intents, movement, chunk streaming, agent and projectile
    /// motion, projectile hits, pickups, clock and night spawner. A quit
    /// intent still completes the tick.
    pub fn step(&mut self, input: &TickInput) -> TickStatus {
        self.tick += 1;
        let _span = tracing::info_span!("world_step", tick = self.tick).entered();

        let mut status = TickStatus::Running;
        for intent in &input.intents {
            if self.apply_intent(intent) == TickStatus::Quit {
                status = TickStatus::Quit;
            }
        }
        self.player
            .apply_movement(input.held, self.config.player.speed);

        let center = self.player.tile().chunk();
        let report = self.store.stream(center, &self.config.stream);
        self.event_log.extend(
            report
                .loaded
                .into_iter()
                .map(|coord| WorldEvent::ChunkLoaded { coord }),
        );
        self.event_log.extend(
            report
                .unloaded
                .into_iter()
                .map(|coord| WorldEvent::ChunkUnloaded { coord }),
        );

        self.entities
            .advance_agents(self.player.position, self.config.agents.speed);
        for id in self.entities.advance_projectiles() {
            self.event_log.push(WorldEvent::ProjectileExpired { id });
        }

        for hit in self
            .entities
            .resolve_projectile_hits(self.config.combat.projectile_damage)
        {
            self.event_log.push(WorldEvent::ProjectileHit {
                projectile: hit.projectile,
                agent: hit.agent,
            });
        }
        let dead = self.entities.remove_dead_agents();
        self.record_kills(dead);

        self.collect_pickups();

        self.day.advance();
        self.run_night_spawner();

        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
        status
    }

    /// Read-only view of the current state for presentation.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.tick,
            chunks: self.store.chunks(),
            player: &self.player,
            agents: self.entities.agents(),
            projectiles: self.entities.projectiles(),
            pickups: self.entities.pickups(),
            daylight: self.day.daylight(),
            ambient: self.day.ambient_color(),
        }
    }

    fn apply_intent(&mut self, intent: &Intent) -> TickStatus {
        match intent {
            Intent::Select(slot) => self.player.select(*slot),
            Intent::Attack => {
                self.attack();
            }
            Intent::Fire { aim } => {
                self.fire(*aim);
            }
            Intent::Place { target } => {
                self.place_block(*target);
            }
            Intent::Break { target } => {
                self.break_block(*target);
            }
            Intent::Quit => {
                tracing::info!(tick = self.tick, "quit requested");
                self.event_log
                    .push(WorldEvent::QuitRequested { tick: self.tick });
                return TickStatus::Quit;
            }
        }
        TickStatus::Running
    }

    /// Place the selected material at `target` (default: the player's
    /// tile). Returns whether a block was written.
    pub fn place_block(&mut self, target: Option<TilePos>) -> bool {
        let tile = target.unwrap_or_else(|| self.player.tile());
        match self.player.place_block(&mut self.store, tile) {
            Some(block) => {
                tracing::debug!(?tile, %block, "placed block");
                self.event_log.push(WorldEvent::BlockPlaced { tile, block });
                true
            }
            None => false,
        }
    }

    /// Break the block at `target` (default: the player's tile). Returns the
    /// removed block.
    pub fn break_block(&mut self, target: Option<TilePos>) -> Option<Block> {
        let tile = target.unwrap_or_else(|| self.player.tile());
        let block = self.player.break_block(&mut self.store, tile)?;
        tracing::debug!(?tile, %block, "broke block");
        self.event_log.push(WorldEvent::BlockBroken { tile, block });
        Some(block)
    }

    /// One melee swing. Returns the agents killed.
    pub fn attack(&mut self) -> Vec<EntityId> {
        let combat = &self.config.combat;
        let damage = if self.player.inventory.has(ItemKind::Sword) {
            combat.sword_damage
        } else {
            combat.melee_damage
        };
        let reach = self.player.bounds().inflate(combat.melee_margin);
        let killed = self.entities.melee(&reach, damage);
        self.record_kills(killed.clone());
        killed
    }

    /// Fire toward `aim`. Needs a gun and a round of ammunition; a zero or
    /// non-finite aim is refused without spending ammo. Returns the new
    /// projectile's id.
    pub fn fire(&mut self, aim: Vec2) -> Option<EntityId> {
        let direction = aim.try_normalize()?;
        let inv = &mut self.player.inventory;
        if !inv.has(ItemKind::Gun) || !inv.take_one(ItemKind::Ammo) {
            return None;
        }
        let combat = &self.config.combat;
        let velocity = direction * combat.projectile_speed;
        let position = self.player.center() - combat.projectile_size * 0.5;
        let id = self.entities.spawn_projectile(
            position,
            velocity,
            combat.projectile_size,
            combat.projectile_lifetime,
        );
        tracing::debug!(?id, ?velocity, "projectile fired");
        self.event_log
            .push(WorldEvent::ProjectileFired { id, velocity });
        Some(id)
    }

    fn collect_pickups(&mut self) {
        let bounds = self.player.bounds();
        for pickup in self.entities.collect_pickups(&bounds) {
            self.player.inventory.add(pickup.kind.item(), 1);
            if pickup.kind == PickupKind::Gun {
                self.player
                    .inventory
                    .add(ItemKind::Ammo, self.config.pickups.ammo_per_gun);
            }
            tracing::debug!(id = ?pickup.id, kind = ?pickup.kind, "pickup collected");
            self.event_log.push(WorldEvent::PickupCollected {
                id: pickup.id,
                kind: pickup.kind,
            });
        }
    }

    fn run_night_spawner(&mut self) {
        if self.day.daylight() >= self.config.day.night_threshold {
            return;
        }
        if !self.rng.gen_bool(self.config.day.spawn_chance) {
            return;
        }
        if self.entities.agents().len() >= self.config.agents.max_agents {
            tracing::trace!("agent population ceiling reached");
            return;
        }
        let tile = self.random_tile_near(self.player.tile(), self.config.day.spawn_offset);
        self.spawn_agent(tile);
    }

    fn spawn_agent(&mut self, tile: TilePos) -> EntityId {
        let agents = &self.config.agents;
        let position = tile.to_world();
        let id = self
            .entities
            .spawn_agent(position, agents.size, agents.health);
        tracing::debug!(?id, ?tile, "agent spawned");
        self.event_log
            .push(WorldEvent::AgentSpawned { id, position });
        id
    }

    fn random_tile_near(&mut self, center: TilePos, spread: i32) -> TilePos {
        let dx = self.rng.gen_range(-spread..=spread);
        let dy = self.rng.gen_range(-spread..=spread);
        center.offset(dx, dy)
    }

    fn record_kills(&mut self, killed: Vec<EntityId>) {
        for id in killed {
            tracing::debug!(?id, "agent killed");
            self.event_log.push(WorldEvent::AgentKilled { id });
        }
    }

    /// Compute a deterministic hash of the world state for comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_vec = |h: &mut u64, v: Vec2| {
            mix(h, &v.x.to_le_bytes());
            mix(h, &v.y.to_le_bytes());
        };

        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.day.phase().to_le_bytes());
        mix_vec(&mut h, self.player.position);
        for (_, count) in self.player.inventory.iter() {
            mix(&mut h, &count.to_le_bytes());
        }
        mix(&mut h, &[self.player.selected().index() as u8]);
        for agent in self.entities.agents() {
            mix(&mut h, &agent.id.0.to_le_bytes());
            mix_vec(&mut h, agent.position);
            mix(&mut h, &agent.health.to_le_bytes());
        }
        for p in self.entities.projectiles() {
            mix(&mut h, &p.id.0.to_le_bytes());
            mix_vec(&mut h, p.position);
            mix(&mut h, &p.lifetime.to_le_bytes());
        }
        for p in self.entities.pickups() {
            mix(&mut h, &p.id.0.to_le_bytes());
            mix_vec(&mut h, p.position);
        }
        for (coord, chunk) in self.store.chunks() {
            mix(&mut h, &coord.x.to_le_bytes());
            mix(&mut h, &coord.y.to_le_bytes());
            for row in chunk.rows() {
                for block in row {
                    mix(&mut h, &[*block as u8]);
                }
            }
        }
        h
    }
}
