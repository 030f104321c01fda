//! Swept sphere movement against blocking colliders.
//!
//! Uses stepped traversal along the movement segment: the moving sphere is
//! sampled at a fixed interval and tested against every Block-responding
//! collider. The first penetrating sample stops the sweep at the last
//! clear sample and reports the contact. Blocked outcomes are signals for
//! the caller, never errors.

use glam::DVec3;
use hecs::{Entity, World};

use hookshot_core::components::{BoxCollider, Collider, NetIdentity};
use hookshot_core::constants::SWEEP_SAMPLE_INTERVAL;
use hookshot_core::enums::CollisionResponse;
use hookshot_core::events::HitInfo;
use hookshot_core::types::{NetId, Position};

/// Outcome of a swept move.
#[derive(Debug, Clone, Copy)]
pub struct SweepResult {
    /// Where the swept entity ends up: the requested destination, or the
    /// last clear sample before a blocking contact.
    pub stop: Position,
    /// The blocking contact, if the move was obstructed.
    pub hit: Option<HitInfo>,
}

enum Shape {
    Sphere { radius: f64 },
    Box { half: DVec3 },
}

struct Blocker {
    net: Option<NetId>,
    center: DVec3,
    shape: Shape,
}

impl Blocker {
    fn penetrates(&self, center: DVec3, radius: f64) -> bool {
        match &self.shape {
            Shape::Sphere { radius: r } => {
                center.distance_squared(self.center) < (radius + r) * (radius + r)
            }
            Shape::Box { half } => {
                let closest = self.closest_point_on_box(center, *half);
                center.distance_squared(closest) < radius * radius
            }
        }
    }

    fn closest_point_on_box(&self, point: DVec3, half: DVec3) -> DVec3 {
        self.center + (point - self.center).clamp(-half, half)
    }

    fn contact(&self, center: DVec3) -> HitInfo {
        let (position, normal) = match &self.shape {
            Shape::Sphere { radius } => {
                let dir = (center - self.center)
                    .try_normalize()
                    .unwrap_or(DVec3::Z);
                (self.center + dir * *radius, dir)
            }
            Shape::Box { half } => {
                let closest = self.closest_point_on_box(center, *half);
                let normal = (center - closest)
                    .try_normalize()
                    .unwrap_or_else(|| {
                        (center - self.center).try_normalize().unwrap_or(DVec3::Z)
                    });
                (closest, normal)
            }
        };
        HitInfo {
            position: Position::from(position),
            normal,
            blocker: self.net,
        }
    }
}

fn collect_blockers(world: &World, mover: Entity) -> Vec<Blocker> {
    let mut blockers = Vec::new();
    for (entity, (pos, collider, net)) in world
        .query::<(&Position, &Collider, Option<&NetIdentity>)>()
        .iter()
    {
        if entity == mover || collider.response != CollisionResponse::Block {
            continue;
        }
        blockers.push(Blocker {
            net: net.map(|n| n.id),
            center: DVec3::from(*pos),
            shape: Shape::Sphere {
                radius: collider.radius,
            },
        });
    }
    for (entity, (pos, collider, net)) in world
        .query::<(&Position, &BoxCollider, Option<&NetIdentity>)>()
        .iter()
    {
        if entity == mover || collider.response != CollisionResponse::Block {
            continue;
        }
        blockers.push(Blocker {
            net: net.map(|n| n.id),
            center: DVec3::from(*pos),
            shape: Shape::Box {
                half: DVec3::new(collider.half_x, collider.half_y, collider.half_z),
            },
        });
    }
    blockers
}

/// Sweep a sphere of `radius` from `from` to `to`, ignoring the mover's own
/// colliders. Blockers the sphere already penetrates at the start are
/// excluded from this sweep, so an entity resting against geometry can
/// still be moved away from (or along) it.
pub fn sweep_sphere(
    world: &World,
    mover: Entity,
    from: &Position,
    to: &Position,
    radius: f64,
) -> SweepResult {
    let start = DVec3::from(*from);
    let end = DVec3::from(*to);
    let delta = end - start;
    let distance = delta.length();
    if distance == 0.0 {
        return SweepResult {
            stop: *to,
            hit: None,
        };
    }

    let blockers = collect_blockers(world, mover);
    if blockers.is_empty() {
        return SweepResult {
            stop: *to,
            hit: None,
        };
    }

    let initially_penetrating: Vec<bool> = blockers
        .iter()
        .map(|b| b.penetrates(start, radius))
        .collect();

    let steps = (distance / SWEEP_SAMPLE_INTERVAL).ceil().max(1.0) as usize;
    let mut clear = start;
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        let sample = start + delta * t;
        for (blocker, skip) in blockers.iter().zip(&initially_penetrating) {
            if *skip {
                continue;
            }
            if blocker.penetrates(sample, radius) {
                return SweepResult {
                    stop: Position::from(clear),
                    hit: Some(blocker.contact(sample)),
                };
            }
        }
        clear = sample;
    }

    SweepResult {
        stop: *to,
        hit: None,
    }
}
