use log::{debug, info};

use crate::store::BestTimeStore;
use crate::time::{format_best, RaceTime};

/// Seconds the "new record" banner stays visible unless configured otherwise.
pub const DEFAULT_NEW_RECORD_DISPLAY: f32 = 3.0;

pub const NEW_RECORD_TEXT: &str = "NEW RECORD!";

/// Result of a run that the clock actually stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopOutcome {
    pub time: RaceTime,
    pub new_record: bool,
}

/// Text the HUD renders for the timer panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDisplay {
    pub current: String,
    pub best: String,
    pub banner: Option<&'static str>,
}

/// Elapsed time of the current run plus the historical best.
pub struct RaceClock {
    elapsed: f32,
    running: bool,
    finished: bool,
    best: Option<RaceTime>,
    banner_remaining: Option<f32>,
    new_record_display: f32,
    store: Box<dyn BestTimeStore>,
}

impl RaceClock {
    /// Creates a clock and loads the best time from `store`.
    pub fn new(store: Box<dyn BestTimeStore>) -> Self {
        let best = store.load();
        Self {
            elapsed: 0.0,
            running: false,
            finished: false,
            best,
            banner_remaining: None,
            new_record_display: DEFAULT_NEW_RECORD_DISPLAY,
            store,
        }
    }

    pub fn with_new_record_display(mut self, seconds: f32) -> Self {
        self.new_record_display = seconds.max(0.0);
        self
    }

    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = 0.0;
        self.finished = false;
        info!("Timer started");
    }

    /// Advances the clock by one frame.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.running {
            self.elapsed += dt;
        }
        if let Some(remaining) = self.banner_remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.banner_remaining = None;
            }
        }
    }

    /// Stops the current run and records it if it beats the best time.
    ///
    /// Returns `None` when the clock was not running or the run already ended.
    pub fn stop(&mut self) -> Option<StopOutcome> {
        if !self.running || self.finished {
            return None;
        }
        self.running = false;
        self.finished = true;

        let time = self.elapsed();
        info!("Timer stopped! Final time: {time}");
        let new_record = self.best.map_or(true, |best| time < best);
        if new_record {
            self.best = Some(time);
            self.store.save(time);
            self.banner_remaining = Some(self.new_record_display);
            info!("New best time: {time}");
        }
        Some(StopOutcome { time, new_record })
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
        self.finished = false;
        self.banner_remaining = None;
        debug!("Timer reset");
    }

    pub fn elapsed(&self) -> RaceTime {
        RaceTime::from_secs(self.elapsed).unwrap_or(RaceTime::ZERO)
    }

    pub fn best(&self) -> Option<RaceTime> {
        self.best
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn new_record_visible(&self) -> bool {
        self.banner_remaining.is_some()
    }

    pub fn format_elapsed(&self) -> String {
        self.elapsed().format()
    }

    pub fn format_best(&self) -> String {
        format_best(self.best)
    }

    pub fn display(&self) -> TimerDisplay {
        TimerDisplay {
            current: format!("Time: {}", self.format_elapsed()),
            best: format!("Best: {}", self.format_best()),
            banner: self.new_record_visible().then_some(NEW_RECORD_TEXT),
        }
    }
}
