//! Physics seam between the wall and a rapier simulation.
//!
//! Bricks are plain rapier bodies; this module only converts between
//! rapier's nalgebra types and the glam types the rest of the crate uses.

pub mod world;

use glam::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;

pub use world::RapierWorld;

/// Handle of a brick body inside the physics world.
pub type BodyHandle = RigidBodyHandle;

/// World-space placement of a body as reported by the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicsPose {
    pub position: Vec3,
    /// Unit quaternion.
    pub orientation: Quat,
}

impl PhysicsPose {
    pub fn of(body: &RigidBody) -> Self {
        Self {
            position: from_vector(body.translation()),
            orientation: from_rotation(body.rotation()),
        }
    }
}

/// The simulation a wall registers its bricks with.
///
/// The wall only ever adds bodies and reads them back; stepping, waking and
/// removal belong to whoever owns the world.
pub trait PhysicsWorld {
    /// Insert `body` with `collider` attached to it.
    fn add_body(&mut self, body: RigidBody, collider: Collider) -> BodyHandle;

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody>;

    fn pose(&self, handle: BodyHandle) -> Option<PhysicsPose> {
        self.body(handle).map(PhysicsPose::of)
    }
}

// ── glam <-> nalgebra ────────────────────────────────────────────────────────

pub fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_rotation(q: Quat) -> Rotation<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn from_rotation(r: &Rotation<Real>) -> Quat {
    Quat::from_xyzw(r.i, r.j, r.k, r.w)
}
