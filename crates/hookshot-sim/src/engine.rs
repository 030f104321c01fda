//! Simulation engine — the core of the hookshot.
//!
//! `SimulationEngine` owns the hecs ECS world, processes commands at tick
//! boundaries, runs all systems, and produces per-tick replication batches
//! on the authority. Proxy instances apply those batches instead, reacting
//! to each replicated field through its paired change handler. Completely
//! headless, enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use hookshot_core::commands::AnchorCommand;
use hookshot_core::components::{
    Anchor, AnchorConfig, AnchorState, BoxCollider, Collider, NetIdentity, Obstacle, Pullable,
};
use hookshot_core::constants::ANCHOR_COLLIDER_RADIUS;
use hookshot_core::enums::{CollisionResponse, NetRole};
use hookshot_core::events::{AnchorEvent, HitInfo};
use hookshot_core::replication::{AnchorField, ReplicationBatch, ReplicationMessage};
use hookshot_core::types::{NetId, Position, SimTime, Transform, Velocity};

use crate::replication::{self, AnchorBaseline};
use crate::sweep;
use crate::systems;
use crate::systems::pull::PullOutcome;
use crate::timers::TimerQueue;

/// Configuration for starting a new engine instance.
pub struct SimConfig {
    /// RNG seed for scenario generation. Same seed = same world.
    pub seed: u64,
    /// Which side of the replication boundary this instance is.
    pub role: NetRole,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            role: NetRole::Authority,
        }
    }
}

/// What one tick produced: events for the game layer and the replication
/// batch for observers. Proxy ticks always carry an empty batch.
#[derive(Debug)]
pub struct TickReport {
    pub time: SimTime,
    pub events: Vec<AnchorEvent>,
    pub replication: ReplicationBatch,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    role: NetRole,
    rng: ChaCha8Rng,
    command_queue: VecDeque<AnchorCommand>,
    events: Vec<AnchorEvent>,
    despawn_buffer: Vec<Entity>,
    timers: TimerQueue,
    next_net_id: u32,
    registry: HashMap<NetId, Entity>,
    baseline: HashMap<NetId, AnchorBaseline>,
    outbox: Vec<ReplicationMessage>,
}

impl SimulationEngine {
    /// Create a new engine instance with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            role: config.role,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            timers: TimerQueue::new(),
            next_net_id: 0,
            registry: HashMap::new(),
            baseline: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    /// Which side of the replication boundary this instance is.
    pub fn role(&self) -> NetRole {
        self.role
    }

    /// Current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Resolve a net identity to its local entity.
    pub fn entity(&self, id: NetId) -> Option<Entity> {
        self.registry.get(&id).copied()
    }

    /// The anchor's current state, if it exists locally.
    pub fn anchor_state(&self, anchor: NetId) -> Option<AnchorState> {
        let entity = self.entity(anchor)?;
        self.world
            .get::<&AnchorState>(entity)
            .map(|s| (*s).clone())
            .ok()
    }

    /// The entity's current position, if it exists locally.
    pub fn position(&self, id: NetId) -> Option<Position> {
        let entity = self.entity(id)?;
        self.world.get::<&Position>(entity).map(|p| *p).ok()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn alloc_net_id(&mut self) -> NetId {
        let id = NetId(self.next_net_id);
        self.next_net_id += 1;
        id
    }

    // ── Spawning ────────────────────────────────────────────────────────

    /// Fire a new anchor from `position` with the given velocity.
    ///
    /// Authority only; proxies receive their copy through replication and
    /// get `None` here. Captures the spawn location, arms immediately if
    /// configured, otherwise schedules the one-shot arming timer.
    pub fn spawn_anchor(
        &mut self,
        config: AnchorConfig,
        position: Position,
        velocity: Velocity,
    ) -> Option<NetId> {
        if !self.role.is_authority() {
            warn!("anchor spawn ignored on proxy");
            return None;
        }
        let anchor = self.alloc_net_id();
        let state = AnchorState::at_spawn(position, velocity.speed());
        let entity = self.world.spawn((
            Anchor,
            NetIdentity { id: anchor },
            config,
            state,
            position,
            velocity,
            Collider {
                radius: ANCHOR_COLLIDER_RADIUS,
                response: CollisionResponse::Ignore,
            },
        ));
        self.registry.insert(anchor, entity);

        if config.spawn_armed {
            self.activate_collision(anchor);
        } else {
            self.timers.schedule(
                entity,
                anchor,
                self.time.elapsed_secs + config.time_until_live,
            );
        }

        // Snapshot after the optional immediate arming so the spawn message
        // carries the state observers should start from.
        let snapshot = match self.world.get::<&AnchorState>(entity) {
            Ok(s) => (*s).clone(),
            Err(_) => return None,
        };
        self.outbox.push(ReplicationMessage::AnchorSpawned {
            anchor,
            config,
            position,
            velocity,
            is_live: snapshot.is_live,
            dynamic_speed: snapshot.dynamic_speed,
        });
        self.baseline
            .insert(anchor, AnchorBaseline::from_state(&snapshot));

        info!(%anchor, x = position.x, y = position.y, z = position.z, "anchor spawned");
        Some(anchor)
    }

    /// Spawn an entity the anchor may pull. Part of scenario construction,
    /// mirrored on every instance.
    pub fn spawn_pullable(&mut self, position: Position, radius: f64) -> NetId {
        let id = self.alloc_net_id();
        let entity = self.world.spawn((
            Pullable,
            NetIdentity { id },
            position,
            Collider {
                radius,
                response: CollisionResponse::Block,
            },
        ));
        self.registry.insert(id, entity);
        id
    }

    /// Spawn static spherical blocking geometry.
    pub fn spawn_obstacle_sphere(&mut self, position: Position, radius: f64) -> NetId {
        let id = self.alloc_net_id();
        let entity = self.world.spawn((
            Obstacle,
            NetIdentity { id },
            position,
            Collider {
                radius,
                response: CollisionResponse::Block,
            },
        ));
        self.registry.insert(id, entity);
        id
    }

    /// Spawn static box blocking geometry.
    pub fn spawn_obstacle_box(
        &mut self,
        position: Position,
        half_x: f64,
        half_y: f64,
        half_z: f64,
    ) -> NetId {
        let id = self.alloc_net_id();
        let entity = self.world.spawn((
            Obstacle,
            NetIdentity { id },
            position,
            BoxCollider {
                half_x,
                half_y,
                half_z,
                response: CollisionResponse::Block,
            },
        ));
        self.registry.insert(id, entity);
        id
    }

    // ── Command surface ─────────────────────────────────────────────────

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: AnchorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = AnchorCommand>) {
        self.command_queue.extend(commands);
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: AnchorCommand) {
        match command {
            AnchorCommand::SetSpeed { anchor, speed } => self.set_speed(anchor, speed),
            AnchorCommand::StartPull { anchor, target } => self.start_pull(anchor, target),
            AnchorCommand::StopPull {
                anchor,
                destroy_self,
            } => self.stop_pull(anchor, destroy_self),
            AnchorCommand::ActivateCollision { anchor } => self.activate_collision(anchor),
        }
    }

    // ── Authority-gated operations ──────────────────────────────────────

    /// Flip the anchor's armed flag and re-apply its collision response.
    ///
    /// Intended to run exactly once per anchor (immediately when spawned
    /// pre-armed, or from the arming timer); repeated calls alternate
    /// arm/disarm.
    pub fn activate_collision(&mut self, anchor: NetId) {
        if !self.role.is_authority() {
            debug!(%anchor, "activate_collision ignored on proxy");
            return;
        }
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
            state.is_live = !state.is_live;
        } else {
            return;
        }
        self.apply_collision_response(anchor);
    }

    /// Begin pulling `target`. No-op while a pull is already active, so an
    /// anchor can never be redirected mid-pull.
    pub fn start_pull(&mut self, anchor: NetId, target: NetId) {
        if !self.role.is_authority() {
            debug!(%anchor, "start_pull ignored on proxy");
            return;
        }
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
            if state.pull_target.is_none() {
                state.pull_target = Some(target);
                info!(%anchor, %target, "pull started");
            }
        }
    }

    /// Stop pulling. With `destroy_self`, broadcast the expiry event with
    /// the anchor's final pose and queue it for destruction. Callable
    /// regardless of current pull state.
    pub fn stop_pull(&mut self, anchor: NetId, destroy_self: bool) {
        if !self.role.is_authority() {
            debug!(%anchor, "stop_pull ignored on proxy");
            return;
        }
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
            state.pull_target = None;
        } else {
            return;
        }
        if destroy_self && !self.despawn_buffer.contains(&entity) {
            let position = self
                .world
                .get::<&Position>(entity)
                .map(|p| *p)
                .unwrap_or_default();
            let heading = self
                .world
                .get::<&Velocity>(entity)
                .map(|v| v.heading())
                .unwrap_or_default();
            info!(%anchor, "anchor expired");
            self.events.push(AnchorEvent::AnchorExpire {
                anchor,
                transform: Transform { position, heading },
            });
            self.despawn_buffer.push(entity);
            self.outbox
                .push(ReplicationMessage::AnchorDestroyed { anchor });
        }
    }

    /// Update the anchor's projectile speed and immediately re-normalize
    /// its velocity to the new magnitude, direction preserved.
    pub fn set_speed(&mut self, anchor: NetId, new_speed: f64) {
        if !self.role.is_authority() {
            debug!(%anchor, "set_speed ignored on proxy");
            return;
        }
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
            state.dynamic_speed = new_speed;
        } else {
            return;
        }
        self.apply_dynamic_speed(anchor);
    }

    // ── Change-notification handlers ────────────────────────────────────
    //
    // These run on every instance: on the authority straight after the
    // mutation, on proxies whenever the field arrives via replication.
    // Each is idempotent and safe for whatever values are currently set.

    fn apply_collision_response(&mut self, anchor: NetId) {
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        let is_live = match self.world.get::<&AnchorState>(entity) {
            Ok(s) => s.is_live,
            Err(_) => return,
        };
        if let Ok(mut collider) = self.world.get::<&mut Collider>(entity) {
            collider.response = if is_live {
                CollisionResponse::Block
            } else {
                CollisionResponse::Ignore
            };
        }
    }

    fn apply_dynamic_speed(&mut self, anchor: NetId) {
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        let speed = match self.world.get::<&AnchorState>(entity) {
            Ok(s) => s.dynamic_speed,
            Err(_) => return,
        };
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
            *vel = vel.with_speed(speed);
        }
    }

    fn apply_tracked_position(&mut self, anchor: NetId) {
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        let (target, tracked) = match self.world.get::<&AnchorState>(entity) {
            Ok(s) => (s.pull_target, s.tracked_position),
            Err(_) => return,
        };
        // No locally-resolvable target means no pull to apply here.
        let Some(target) = target else {
            return;
        };
        let Some(&target_entity) = self.registry.get(&target) else {
            return;
        };
        let from = match self.world.get::<&Position>(target_entity) {
            Ok(p) => *p,
            Err(_) => return,
        };
        let radius = self
            .world
            .get::<&Collider>(target_entity)
            .map(|c| c.radius)
            .unwrap_or_default();
        let result = sweep::sweep_sphere(&self.world, target_entity, &from, &tracked, radius);
        if let Ok(mut pos) = self.world.get::<&mut Position>(target_entity) {
            *pos = result.stop;
        }
        if let Some(hit) = result.hit {
            self.events.push(AnchorEvent::PullBlocked { anchor, hit });
        }
    }

    /// Collider contact reaction. The hit event fires only while no pull
    /// is active, so dragging a target through geometry cannot re-trigger
    /// hit notifications.
    fn react_to_hit(&mut self, anchor: NetId, hit: HitInfo) {
        if !self.role.is_authority() {
            return;
        }
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        let pulling = self
            .world
            .get::<&AnchorState>(entity)
            .map(|s| s.pull_target.is_some())
            .unwrap_or(true);
        if !pulling {
            info!(%anchor, blocker = ?hit.blocker, "hookshot hit");
            self.events.push(AnchorEvent::HookshotHit { anchor, hit });
        }
    }

    // ── Tick ────────────────────────────────────────────────────────────

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickReport {
        self.process_commands();

        if self.role.is_authority() {
            for anchor in systems::arming::run(&mut self.timers, self.time.elapsed_secs) {
                debug!(%anchor, "arming timer fired");
                self.activate_collision(anchor);
            }
        }

        let hits = systems::flight::run(&mut self.world, self.time.dt());

        if self.role.is_authority() {
            for (anchor, hit) in hits {
                self.react_to_hit(anchor, hit);
            }

            let outcomes = systems::pull::run(
                &self.world,
                &self.registry,
                &self.despawn_buffer,
                self.time.dt(),
            );
            for outcome in outcomes {
                match outcome {
                    PullOutcome::Expire { anchor } => self.stop_pull(anchor, true),
                    PullOutcome::Advance { anchor, tracked } => {
                        if let Some(&entity) = self.registry.get(&anchor) {
                            if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
                                state.tracked_position = tracked;
                            }
                        }
                        self.apply_tracked_position(anchor);
                    }
                }
            }
        }

        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.timers,
            &mut self.registry,
        );
        self.time.advance();

        let replication = if self.role.is_authority() {
            replication::collect(
                &self.world,
                &mut self.baseline,
                std::mem::take(&mut self.outbox),
                self.time.tick,
            )
        } else {
            ReplicationBatch {
                tick: self.time.tick,
                messages: Vec::new(),
            }
        };

        TickReport {
            time: self.time,
            events: std::mem::take(&mut self.events),
            replication,
        }
    }

    // ── Proxy side ──────────────────────────────────────────────────────

    /// Apply a replication batch received from the authority.
    ///
    /// Each delta field is written and its paired change handler run, in
    /// delivery order. Returns the events the handlers raised locally
    /// (observer-side `PullBlocked`).
    pub fn apply_batch(&mut self, batch: &ReplicationBatch) -> Vec<AnchorEvent> {
        if self.role.is_authority() {
            warn!("replication batch ignored on authority");
            return Vec::new();
        }
        for message in &batch.messages {
            match message {
                ReplicationMessage::AnchorSpawned {
                    anchor,
                    config,
                    position,
                    velocity,
                    is_live,
                    dynamic_speed,
                } => {
                    let state = AnchorState {
                        is_live: *is_live,
                        dynamic_speed: *dynamic_speed,
                        pull_target: None,
                        tracked_position: Position::default(),
                        spawn_location: *position,
                    };
                    let response = if *is_live {
                        CollisionResponse::Block
                    } else {
                        CollisionResponse::Ignore
                    };
                    let entity = self.world.spawn((
                        Anchor,
                        NetIdentity { id: *anchor },
                        *config,
                        state,
                        *position,
                        *velocity,
                        Collider {
                            radius: ANCHOR_COLLIDER_RADIUS,
                            response,
                        },
                    ));
                    self.registry.insert(*anchor, entity);
                    debug!(anchor = %anchor, "proxy anchor spawned");
                }
                ReplicationMessage::AnchorDelta { anchor, fields } => {
                    for field in fields {
                        self.apply_field(*anchor, field);
                    }
                }
                ReplicationMessage::AnchorDestroyed { anchor } => {
                    if let Some(&entity) = self.registry.get(anchor) {
                        if !self.despawn_buffer.contains(&entity) {
                            debug!(anchor = %anchor, "proxy anchor destroyed");
                            self.despawn_buffer.push(entity);
                        }
                    }
                }
            }
        }
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.timers,
            &mut self.registry,
        );
        std::mem::take(&mut self.events)
    }

    fn apply_field(&mut self, anchor: NetId, field: &AnchorField) {
        let Some(&entity) = self.registry.get(&anchor) else {
            return;
        };
        match field {
            AnchorField::IsLive { value } => {
                if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
                    state.is_live = *value;
                } else {
                    return;
                }
                self.apply_collision_response(anchor);
            }
            AnchorField::DynamicSpeed { value } => {
                if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
                    state.dynamic_speed = *value;
                } else {
                    return;
                }
                self.apply_dynamic_speed(anchor);
            }
            AnchorField::PullTarget { value } => {
                if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
                    state.pull_target = *value;
                }
            }
            AnchorField::TrackedPosition { value } => {
                if let Ok(mut state) = self.world.get::<&mut AnchorState>(entity) {
                    state.tracked_position = *value;
                } else {
                    return;
                }
                self.apply_tracked_position(anchor);
            }
        }
    }
}
