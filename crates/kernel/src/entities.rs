//! Live agents, projectiles and pickups.
//!
//! Each collection is a `Vec` in spawn order. That order is the tie-break
//! whenever more than one entity could be affected by the same event.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tileworld_common::{Aabb, EntityId, ItemKind};

/// Hostile agent. Walks straight at the player; terrain does not block it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    pub health: i32,
}

impl Agent {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Step `speed` tiles along the unit vector toward `target`.
    pub fn chase(&mut self, target: Vec2, speed: f32) {
        self.position += (target - self.position).normalize_or_zero() * speed;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    /// Ticks left before the projectile expires.
    pub lifetime: u32,
}

impl Projectile {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Move one tick and burn one tick of lifetime. Returns `false` once
    /// expired.
    pub fn advance(&mut self) -> bool {
        self.position += self.velocity;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }
}

/// Equipment lying on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupKind {
    Sword,
    Gun,
}

impl PickupKind {
    pub fn item(self) -> ItemKind {
        match self {
            PickupKind::Sword => ItemKind::Sword,
            PickupKind::Gun => ItemKind::Gun,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }
}

/// A projectile that struck an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile: EntityId,
    pub agent: EntityId,
}

/// Owns every live entity except the player.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    agents: Vec<Agent>,
    projectiles: Vec<Projectile>,
    pickups: Vec<Pickup>,
    next_id: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_agent(&mut self, position: Vec2, size: Vec2, health: i32) -> EntityId {
        let id = self.allocate();
        self.agents.push(Agent {
            id,
            position,
            size,
            health,
        });
        id
    }

    pub fn spawn_projectile(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        size: Vec2,
        lifetime: u32,
    ) -> EntityId {
        let id = self.allocate();
        self.projectiles.push(Projectile {
            id,
            position,
            velocity,
            size,
            lifetime,
        });
        id
    }

    pub fn spawn_pickup(&mut self, position: Vec2, size: Vec2, kind: PickupKind) -> EntityId {
        let id = self.allocate();
        self.pickups.push(Pickup {
            id,
            position,
            size,
            kind,
        });
        id
    }

    /// Move every agent toward `target`.
    pub fn advance_agents(&mut self, target: Vec2, speed: f32) {
        for agent in &mut self.agents {
            agent.chase(target, speed);
        }
    }

    /// Move every projectile and drop the ones whose lifetime ran out.
    /// Returns the expired ids.
    pub fn advance_projectiles(&mut self) -> Vec<EntityId> {
        let mut expired = Vec::new();
        self.projectiles.retain_mut(|p| {
            let alive = p.advance();
            if !alive {
                expired.push(p.id);
            }
            alive
        });
        expired
    }

    /// Each projectile damages the first live agent it overlaps, in registry
    /// order, and is consumed. Dead agents stay in place until
    /// [`EntityRegistry::remove_dead_agents`].
    pub fn resolve_projectile_hits(&mut self, damage: i32) -> Vec<Hit> {
        let mut hits = Vec::new();
        let agents = &mut self.agents;
        self.projectiles.retain(|p| {
            let bounds = p.bounds();
            let Some(agent) = agents
                .iter_mut()
                .find(|a| a.is_alive() && a.bounds().intersects(&bounds))
            else {
                return true;
            };
            agent.health -= damage;
            hits.push(Hit {
                projectile: p.id,
                agent: agent.id,
            });
            false
        });
        hits
    }

    /// Damage every agent overlapping `area`, then remove the dead.
    /// Returns the ids of agents killed.
    pub fn melee(&mut self, area: &Aabb, damage: i32) -> Vec<EntityId> {
        for agent in &mut self.agents {
            if agent.bounds().intersects(area) {
                agent.health -= damage;
            }
        }
        self.remove_dead_agents()
    }

    /// Remove agents at health `<= 0`. Returns their ids.
    pub fn remove_dead_agents(&mut self) -> Vec<EntityId> {
        let mut dead = Vec::new();
        self.agents.retain(|a| {
            if a.is_alive() {
                true
            } else {
                dead.push(a.id);
                false
            }
        });
        dead
    }

    /// Remove and return every pickup overlapping `area`.
    pub fn collect_pickups(&mut self, area: &Aabb) -> Vec<Pickup> {
        let mut collected = Vec::new();
        self.pickups.retain(|p| {
            if p.bounds().intersects(area) {
                collected.push(p.clone());
                false
            } else {
                true
            }
        });
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::ONE)
    }

    #[test]
    fn ids_are_sequential_across_kinds() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn_agent(Vec2::ZERO, Vec2::ONE, 3);
        let p = reg.spawn_pickup(Vec2::ZERO, Vec2::ONE, PickupKind::Gun);
        let b = reg.spawn_projectile(Vec2::ZERO, Vec2::X, Vec2::ONE, 5);
        assert_eq!((a, p, b), (EntityId(0), EntityId(1), EntityId(2)));
    }

    #[test]
    fn agent_steps_one_unit_toward_target() {
        let mut reg = EntityRegistry::new();
        reg.spawn_agent(Vec2::new(10.0, 0.0), Vec2::ONE, 3);
        reg.advance_agents(Vec2::ZERO, 1.0);
        assert_eq!(reg.agents()[0].position, Vec2::new(9.0, 0.0));

        reg.advance_agents(Vec2::new(9.0, 4.0), 2.0);
        assert_eq!(reg.agents()[0].position, Vec2::new(9.0, 2.0));
    }

    #[test]
    fn agent_on_target_stays_put() {
        let mut reg = EntityRegistry::new();
        reg.spawn_agent(Vec2::new(2.0, 2.0), Vec2::ONE, 3);
        reg.advance_agents(Vec2::new(2.0, 2.0), 1.0);
        assert_eq!(reg.agents()[0].position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn projectile_expires_after_exactly_lifetime_ticks() {
        let mut reg = EntityRegistry::new();
        let id = reg.spawn_projectile(Vec2::ZERO, Vec2::X, Vec2::splat(0.1), 4);
        for _ in 0..3 {
            assert!(reg.advance_projectiles().is_empty());
            assert_eq!(reg.projectiles().len(), 1);
        }
        assert_eq!(reg.advance_projectiles(), vec![id]);
        assert!(reg.projectiles().is_empty());
    }

    #[test]
    fn hit_consumes_projectile_regardless_of_lifetime() {
        let mut reg = EntityRegistry::new();
        let agent = reg.spawn_agent(Vec2::new(1.0, 0.0), Vec2::ONE, 5);
        let shot = reg.spawn_projectile(Vec2::new(1.2, 0.2), Vec2::ZERO, Vec2::splat(0.1), 100);
        let hits = reg.resolve_projectile_hits(3);
        assert_eq!(
            hits,
            vec![Hit {
                projectile: shot,
                agent
            }]
        );
        assert!(reg.projectiles().is_empty());
        assert_eq!(reg.agents()[0].health, 2);
    }

    #[test]
    fn first_agent_in_registry_order_takes_the_hit() {
        let mut reg = EntityRegistry::new();
        let first = reg.spawn_agent(Vec2::ZERO, Vec2::ONE, 3);
        let second = reg.spawn_agent(Vec2::ZERO, Vec2::ONE, 3);
        reg.spawn_projectile(Vec2::splat(0.5), Vec2::ZERO, Vec2::splat(0.1), 10);
        let hits = reg.resolve_projectile_hits(3);
        assert_eq!(hits[0].agent, first);
        assert_eq!(reg.remove_dead_agents(), vec![first]);
        assert_eq!(reg.agents()[0].id, second);
        assert_eq!(reg.agents()[0].health, 3);
    }

    #[test]
    fn second_projectile_skips_agent_already_killed() {
        let mut reg = EntityRegistry::new();
        let first = reg.spawn_agent(Vec2::ZERO, Vec2::ONE, 3);
        let second = reg.spawn_agent(Vec2::ZERO, Vec2::ONE, 3);
        reg.spawn_projectile(Vec2::splat(0.5), Vec2::ZERO, Vec2::splat(0.1), 10);
        reg.spawn_projectile(Vec2::splat(0.5), Vec2::ZERO, Vec2::splat(0.1), 10);
        let hits = reg.resolve_projectile_hits(3);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].agent, first);
        assert_eq!(hits[1].agent, second);
        assert_eq!(reg.remove_dead_agents(), vec![first, second]);
    }

    #[test]
    fn missing_projectile_keeps_flying() {
        let mut reg = EntityRegistry::new();
        reg.spawn_agent(Vec2::new(5.0, 5.0), Vec2::ONE, 3);
        reg.spawn_projectile(Vec2::ZERO, Vec2::X, Vec2::splat(0.1), 10);
        assert!(reg.resolve_projectile_hits(3).is_empty());
        assert_eq!(reg.projectiles().len(), 1);
    }

    #[test]
    fn melee_hits_everything_in_reach_and_removes_the_dead() {
        let mut reg = EntityRegistry::new();
        let weak = reg.spawn_agent(Vec2::new(1.1, 0.0), Vec2::ONE, 1);
        let tough = reg.spawn_agent(Vec2::new(-1.1, 0.0), Vec2::ONE, 3);
        let far = reg.spawn_agent(Vec2::new(5.0, 0.0), Vec2::ONE, 1);

        let area = unit_box(0.0, 0.0).inflate(0.3125);
        assert_eq!(reg.melee(&area, 1), vec![weak]);
        let ids: Vec<_> = reg.agents().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![tough, far]);
        assert_eq!(reg.agents()[0].health, 2);
        assert_eq!(reg.agents()[1].health, 1);
    }

    #[test]
    fn sword_kills_three_health_agent_in_two_swings() {
        let mut reg = EntityRegistry::new();
        let id = reg.spawn_agent(Vec2::new(0.5, 0.0), Vec2::ONE, 3);
        let area = unit_box(0.0, 0.0).inflate(0.3125);

        assert!(reg.melee(&area, 2).is_empty());
        assert_eq!(reg.agents()[0].health, 1);
        assert_eq!(reg.melee(&area, 2), vec![id]);
        assert!(reg.agents().is_empty());
    }

    #[test]
    fn pickups_are_collected_on_overlap() {
        let mut reg = EntityRegistry::new();
        let near = reg.spawn_pickup(Vec2::new(0.75, 0.25), Vec2::splat(0.5), PickupKind::Sword);
        reg.spawn_pickup(Vec2::new(3.0, 3.0), Vec2::splat(0.5), PickupKind::Gun);
        let got = reg.collect_pickups(&unit_box(0.0, 0.0));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, near);
        assert_eq!(got[0].kind.item(), ItemKind::Sword);
        assert_eq!(reg.pickups().len(), 1);
    }
}
