use glam::Vec3;

use crate::clock::RaceClock;
use crate::course::Course;
use crate::flow::{RaceFlow, RaceState};
use crate::pose::PlayerHandle;
use crate::respawn::RespawnMonitor;
use crate::store::BestTimeStore;
use crate::zone::{Entity, ZoneTrigger};

/// Name under which the session reports the player to the triggers.
pub const PLAYER_NAME: &str = "XR Origin";
pub const PLAYER_TAG: &str = "Player";

/// Wires a course layout to the race flow and drives it once per frame.
pub struct CourseSession {
    course: Course,
    flow: RaceFlow,
    triggers: Vec<ZoneTrigger>,
    respawn: RespawnMonitor,
    player: PlayerHandle,
    frames: u64,
    respawns: usize,
}

impl CourseSession {
    pub fn new(course: Course, store: Box<dyn BestTimeStore>) -> Self {
        let player = PlayerHandle::new(course.start_pose);
        let clock = RaceClock::new(store).with_new_record_display(course.new_record_display);
        let flow = RaceFlow::new(clock, course.start_pose, Box::new(player.clone()));
        let triggers = course
            .zones
            .iter()
            .map(|zone| ZoneTrigger::new(zone.kind, zone.shape))
            .collect();
        let respawn = RespawnMonitor::new(course.respawn_height, flow.start_pose());
        Self {
            course,
            flow,
            triggers,
            respawn,
            player,
            frames: 0,
            respawns: 0,
        }
    }

    /// Advances one frame with the player moved to `position`.
    ///
    /// Triggers see the new position first, then the fall check, then the
    /// clock accumulates `dt`.
    pub fn step(&mut self, dt: f32, position: Vec3) -> RaceState {
        self.frames += 1;
        self.player.set_position(position);
        let entity = Entity::new(PLAYER_NAME, PLAYER_TAG);
        for trigger in &mut self.triggers {
            trigger.update(entity, position, &mut self.flow);
        }
        if self.respawn.check(position, &mut self.player, &mut self.flow) {
            self.respawns += 1;
        }
        self.flow.tick(dt);
        self.flow.state()
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn flow(&self) -> &RaceFlow {
        &self.flow
    }

    pub fn player(&self) -> &PlayerHandle {
        &self.player
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn respawns(&self) -> usize {
        self.respawns
    }
}

pub fn print_summary(session: &CourseSession) {
    let flow = session.flow();
    let clock = flow.clock();
    let display = clock.display();
    println!("Frames simulated: {}", session.frames());
    println!("Respawns: {}", session.respawns());
    match flow.state() {
        RaceState::Finished => println!("Run finished in {}", clock.format_elapsed()),
        RaceState::Running => println!("Run still in progress at {}", clock.format_elapsed()),
        RaceState::NotStarted => println!("Run not started"),
    }
    println!("{}", display.current);
    println!("{}", display.best);
    if let Some(banner) = display.banner {
        println!("{banner}");
    }
}
