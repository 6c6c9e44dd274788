use log::{debug, info};

use crate::clock::{RaceClock, StopOutcome};
use crate::control::RaceController;
use crate::pose::{PlayerTeleport, Pose};

/// High level state of the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceState {
    #[default]
    NotStarted,
    Running,
    Finished,
}

/// Single authority over the race: owns the clock and decides how zone and
/// respawn events move the run between states.
pub struct RaceFlow {
    state: RaceState,
    clock: RaceClock,
    start_pose: Pose,
    player: Box<dyn PlayerTeleport>,
}

impl RaceFlow {
    pub fn new(clock: RaceClock, start_pose: Pose, player: Box<dyn PlayerTeleport>) -> Self {
        info!("Race flow initialized");
        Self {
            state: RaceState::NotStarted,
            clock,
            start_pose,
            player,
        }
    }

    pub fn on_start_zone_entered(&mut self) {
        if self.state != RaceState::NotStarted {
            debug!("Start zone ignored in state {:?}", self.state);
            return;
        }
        self.state = RaceState::Running;
        info!("Race started");
        self.clock.start();
    }

    /// Ends the run. Returns the clock outcome when this call finished it.
    pub fn on_finish_zone_entered(&mut self) -> Option<StopOutcome> {
        if self.state != RaceState::Running {
            debug!("Finish zone ignored in state {:?}", self.state);
            return None;
        }
        self.state = RaceState::Finished;
        info!("Race finished");
        self.clock.stop()
    }

    /// Returns to the start line with a fresh clock.
    pub fn reset_run(&mut self) {
        self.state = RaceState::NotStarted;
        self.clock.reset();
        self.player.teleport(self.start_pose);
        info!("Race reset");
    }

    pub fn tick(&mut self, dt: f32) {
        self.clock.tick(dt);
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RaceState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == RaceState::Finished
    }

    pub fn clock(&self) -> &RaceClock {
        &self.clock
    }

    pub fn start_pose(&self) -> Pose {
        self.start_pose
    }
}

impl RaceController for RaceFlow {
    fn start_zone_entered(&mut self) {
        self.on_start_zone_entered();
    }

    fn finish_zone_entered(&mut self) {
        self.on_finish_zone_entered();
    }

    fn player_fell(&mut self) {
        self.reset_run();
    }
}
