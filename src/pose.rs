use std::sync::Arc;

use glam::{Quat, Vec3};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Position and orientation of the player rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Builds a pose from Euler angles in degrees, applied Z then Y then X.
    pub fn from_euler_degrees(position: Vec3, rotation: Vec3) -> Self {
        let rotation = Quat::from_rotation_z(rotation.z.to_radians())
            * Quat::from_rotation_y(rotation.y.to_radians())
            * Quat::from_rotation_x(rotation.x.to_radians());
        Self { position, rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Accepts teleport requests for the player entity.
pub trait PlayerTeleport {
    fn teleport(&mut self, pose: Pose);
}

/// Shared handle to the player pose; clones observe the same rig.
#[derive(Debug, Clone, Default)]
pub struct PlayerHandle {
    inner: Arc<RwLock<PlayerRig>>,
}

#[derive(Debug, Default)]
struct PlayerRig {
    pose: Pose,
    teleports: usize,
}

impl PlayerHandle {
    pub fn new(pose: Pose) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PlayerRig { pose, teleports: 0 })),
        }
    }

    pub fn pose(&self) -> Pose {
        self.inner.read().pose
    }

    pub fn position(&self) -> Vec3 {
        self.inner.read().pose.position
    }

    /// Moves the rig as regular locomotion would; not counted as a teleport.
    pub fn set_position(&self, position: Vec3) {
        self.inner.write().pose.position = position;
    }

    pub fn teleport_count(&self) -> usize {
        self.inner.read().teleports
    }
}

impl PlayerTeleport for PlayerHandle {
    fn teleport(&mut self, pose: Pose) {
        let mut rig = self.inner.write();
        rig.pose = pose;
        rig.teleports += 1;
    }
}
