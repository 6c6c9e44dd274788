use glam::Vec3;
use log::info;

use crate::control::RaceController;
use crate::pose::{PlayerTeleport, Pose};

pub const DEFAULT_RESPAWN_HEIGHT: f32 = -10.0;

/// Detects the player falling off the course and puts them back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnMonitor {
    threshold: f32,
    respawn_pose: Pose,
}

impl Default for RespawnMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_RESPAWN_HEIGHT, Pose::IDENTITY)
    }
}

impl RespawnMonitor {
    /// `respawn_pose` is normally the pose the player spawned with.
    pub fn new(threshold: f32, respawn_pose: Pose) -> Self {
        Self {
            threshold,
            respawn_pose,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn respawn_pose(&self) -> Pose {
        self.respawn_pose
    }

    /// Moves the respawn point, keeping its orientation.
    pub fn set_respawn_position(&mut self, position: Vec3) {
        self.respawn_pose.position = position;
    }

    /// Teleports the player to the respawn pose and reports the fall when
    /// `position` is below the threshold height.
    ///
    /// The teleport happens before the controller sees the fall, so a
    /// controller that moves the player again has the last word.
    pub fn check<P, C>(&self, position: Vec3, player: &mut P, controller: &mut C) -> bool
    where
        P: PlayerTeleport + ?Sized,
        C: RaceController + ?Sized,
    {
        if position.y >= self.threshold {
            return false;
        }
        info!(
            "Player fell below {:.2} at ({:.2}, {:.2}, {:.2}); respawning at ({:.2}, {:.2}, {:.2})",
            self.threshold,
            position.x,
            position.y,
            position.z,
            self.respawn_pose.position.x,
            self.respawn_pose.position.y,
            self.respawn_pose.position.z
        );
        player.teleport(self.respawn_pose);
        controller.player_fell();
        true
    }
}
