//! Race timer and start/finish flow for the VR obstacle course.
//!
//! The crate holds the parts of the minigame that do not depend on the host
//! engine: the run clock, the persisted best time and the state machine that
//! turns zone and fall events into clock transitions.  Physics, rendering and
//! XR input stay with the engine, which feeds this crate positions and frame
//! deltas so everything can be driven headless.

pub mod app;
pub mod clock;
pub mod control;
pub mod course;
pub mod flow;
pub mod pose;
pub mod replay;
pub mod respawn;
pub mod store;
pub mod time;
pub mod zone;

pub use app::CourseSession;
pub use clock::{RaceClock, StopOutcome, TimerDisplay};
pub use control::RaceController;
pub use course::{Course, ZoneSpec};
pub use flow::{RaceFlow, RaceState};
pub use pose::{PlayerHandle, PlayerTeleport, Pose};
pub use replay::{load_replay_from_str, ReplayFrame};
pub use respawn::RespawnMonitor;
pub use store::{BestTimeStore, JsonFileStore, MemoryStore, StoreError};
pub use time::RaceTime;
pub use zone::{Entity, ZoneKind, ZoneShape, ZoneTrigger};
