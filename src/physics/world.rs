//! Reference simulation backed by rapier.
//!
//! Owns every rapier set and pipeline stage, steps with a caller-supplied
//! `dt` and exposes the few operations the demo and tests need: an optional
//! ground slab, impulses and wake-ups.

use glam::Vec3;
use rapier3d::prelude::*;

use super::{to_vector, BodyHandle, PhysicsWorld};

/// Half-extent of the ground slab along x and z.
const GROUND_HALF_EXTENT: Real = 500.0;
const GROUND_HALF_THICKNESS: Real = 0.5;

pub struct RapierWorld {
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    time: f32,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self {
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            time: 0.0,
        }
    }
}

impl RapierWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity: to_vector(gravity),
            ..Default::default()
        }
    }

    /// Add a fixed slab whose top face lies at `height`.
    pub fn add_ground(&mut self, height: f32) -> ColliderHandle {
        let ground = ColliderBuilder::cuboid(GROUND_HALF_EXTENT, GROUND_HALF_THICKNESS, GROUND_HALF_EXTENT)
            .translation(vector![0.0, height - GROUND_HALF_THICKNESS, 0.0])
            .build();
        self.colliders.insert(ground)
    }

    /// Simulated seconds since creation.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn bodies(&self) -> &RigidBodySet {
        &self.bodies
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Remove a body together with its colliders.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        )
    }

    /// Apply `impulse` at world `point` on the body, waking it.  Returns
    /// `false` when the handle is stale.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3, point: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.apply_impulse_at_point(to_vector(impulse), Point::from(to_vector(point)), true);
                true
            }
            None => false,
        }
    }

    pub fn wake_up(&mut self, handle: BodyHandle) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.wake_up(true);
                true
            }
            None => false,
        }
    }

    /// Number of bodies currently asleep.
    pub fn sleeping_count(&self) -> usize {
        self.bodies.iter().filter(|(_, b)| b.is_sleeping()).count()
    }

    /// Advance the simulation by `dt` seconds.  Non-positive steps are ignored.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.time += dt;
    }
}

impl PhysicsWorld for RapierWorld {
    fn add_body(&mut self, body: RigidBody, collider: Collider) -> BodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }
}
