//! Built-in guard scenario used by `arbor run`.
//!
//! The perception stub and the leaf bindings stand in for the game systems a
//! real host would provide. Everything they know lives on the blackboard:
//!
//! | key               | type   | written by            |
//! |-------------------|--------|-----------------------|
//! | `self_pos`        | `Vec3` | movement actions      |
//! | `player_pos`      | `Vec3` | perception            |
//! | `player_visible`  | `bool` | perception            |
//! | `in_attack_range` | `bool` | perception            |
//! | `health`          | `f32`  | perception (damage)   |
//! | `speed`           | `f32`  | document seed         |
//! | `waypoint`        | `i32`  | `patrol`              |
//! | `attacks`         | `i32`  | `attack`              |
//! | `intent`          | string | every action          |

use arbor_config::BindingRegistry;
use arbor_core::{Blackboard, NodeStatus, Vec3};

pub const SIGHT_RADIUS: f32 = 8.0;
pub const ATTACK_RANGE: f32 = 1.5;
pub const LOW_HEALTH: f32 = 30.0;
/// Damage per second taken while the player is in melee range.
pub const PLAYER_DPS: f32 = 20.0;

const DEFAULT_SPEED: f32 = 2.0;
const WAYPOINTS: [Vec3; 2] = [Vec3::new(3.0, 0.0, 0.0), Vec3::new(-3.0, 0.0, 0.0)];
const ARRIVAL_EPSILON: f32 = 0.01;

/// Writes sensed facts about a stationary player before every tick.
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    player: Vec3,
}

impl Default for Perception {
    fn default() -> Self {
        Self::new(Vec3::new(10.0, 0.0, 0.0))
    }
}

impl Perception {
    pub fn new(player: Vec3) -> Self {
        Self { player }
    }

    pub fn sense(&self, bb: &mut Blackboard, dt: f32) {
        let guard = bb.get("self_pos", Vec3::ZERO);
        let distance = guard.distance(self.player);
        let in_range = distance <= ATTACK_RANGE;

        bb.set("player_pos", self.player);
        bb.set("player_visible", distance < SIGHT_RADIUS);
        bb.set("in_attack_range", in_range);

        if in_range {
            let health = bb.get("health", 100.0f32) - PLAYER_DPS * dt;
            bb.set("health", health.max(0.0));
        }
    }
}

pub fn registry() -> BindingRegistry {
    BindingRegistry::new()
        .condition("player_visible", |bb| bb.get("player_visible", false))
        .condition("in_attack_range", |bb| bb.get("in_attack_range", false))
        .condition("low_health", |bb| bb.get("health", 100.0f32) < LOW_HEALTH)
        .action("chase", chase)
        .action("aim", |bb, _dt| {
            bb.set_str("intent", "aim");
            NodeStatus::Running
        })
        .action("attack", |bb, _dt| {
            let attacks = bb.get("attacks", 0) + 1;
            bb.set("attacks", attacks);
            bb.set_str("intent", "attack");
            NodeStatus::Success
        })
        .action("patrol", patrol)
        .action("flee", flee)
        .action("idle", |bb, _dt| {
            bb.set_str("intent", "idle");
            NodeStatus::Success
        })
}

fn speed(bb: &Blackboard) -> f32 {
    bb.get("speed", DEFAULT_SPEED)
}

fn chase(bb: &mut Blackboard, dt: f32) -> NodeStatus {
    let Some(&target) = bb.get_ref::<Vec3>("player_pos") else {
        return NodeStatus::Failure;
    };
    bb.set_str("intent", "chase");

    let pos = bb.get("self_pos", Vec3::ZERO).move_towards(target, speed(bb) * dt);
    bb.set("self_pos", pos);
    if pos.distance(target) <= ATTACK_RANGE {
        NodeStatus::Success
    } else {
        NodeStatus::Running
    }
}

fn patrol(bb: &mut Blackboard, dt: f32) -> NodeStatus {
    bb.set_str("intent", "patrol");

    let index = bb.get("waypoint", 0i32).rem_euclid(WAYPOINTS.len() as i32);
    let target = WAYPOINTS[index as usize];
    let pos = bb.get("self_pos", Vec3::ZERO).move_towards(target, speed(bb) * dt);
    bb.set("self_pos", pos);

    if pos.distance(target) <= ARRIVAL_EPSILON {
        bb.set("waypoint", index + 1);
        NodeStatus::Success
    } else {
        NodeStatus::Running
    }
}

fn flee(bb: &mut Blackboard, dt: f32) -> NodeStatus {
    bb.set_str("intent", "flee");

    let pos = bb.get("self_pos", Vec3::ZERO);
    let threat = bb.get("player_pos", Vec3::ZERO);
    let away = (pos - threat).normalize_or_zero();
    bb.set("self_pos", pos + away * (speed(bb) * dt));
    NodeStatus::Running
}
