use crate::clock::RaceClock;

/// Receiver for the discrete events produced by zone triggers and the
/// respawn monitor.
///
/// [`RaceFlow`](crate::flow::RaceFlow) is the normal authority. A bare
/// [`RaceClock`] also implements it for courses that only need a timer.
pub trait RaceController {
    fn start_zone_entered(&mut self);
    fn finish_zone_entered(&mut self);
    fn player_fell(&mut self);
}

impl RaceController for RaceClock {
    fn start_zone_entered(&mut self) {
        self.start();
    }

    fn finish_zone_entered(&mut self) {
        self.stop();
    }

    fn player_fell(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn standalone_clock_follows_zone_events() {
        let store = MemoryStore::new();
        let mut clock = RaceClock::new(Box::new(store.clone()));
        clock.start_zone_entered();
        clock.tick(2.5);
        clock.finish_zone_entered();
        assert!(clock.is_finished());
        assert_eq!(store.writes(), 1);

        clock.player_fell();
        assert!(!clock.is_finished());
        assert_eq!(clock.best().map(|best| best.as_secs()), Some(2.5));
    }

    #[test]
    fn standalone_clock_restarts_on_repeated_start() {
        let mut clock = RaceClock::new(Box::new(MemoryStore::new()));
        clock.start_zone_entered();
        clock.tick(4.0);
        clock.start_zone_entered();
        assert_eq!(clock.format_elapsed(), "00:00.00");
        assert!(clock.is_running());
    }
}
