use std::time::{Duration, Instant};

/// Wall-clock bookkeeping for one session. Every query takes `now` so the
/// caller owns the clock; paused time never counts as elapsed.
#[derive(Debug, Clone)]
pub struct SessionClock {
    session_started: Instant,
    round_started: Instant,
    paused_at: Option<Instant>,
    session_paused: Duration,
    round_paused: Duration,
    /// Elapsed time carried over from a saved session.
    session_carried: Duration,
    round_carried: Duration,
}

impl SessionClock {
    pub fn start(now: Instant) -> Self {
        Self {
            session_started: now,
            round_started: now,
            paused_at: None,
            session_paused: Duration::ZERO,
            round_paused: Duration::ZERO,
            session_carried: Duration::ZERO,
            round_carried: Duration::ZERO,
        }
    }

    /// Continue a clock that had already run for the given amounts.
    pub fn resume_from(now: Instant, session_elapsed: Duration, round_elapsed: Duration) -> Self {
        Self {
            session_carried: session_elapsed,
            round_carried: round_elapsed,
            ..Self::start(now)
        }
    }

    pub fn start_round(&mut self, now: Instant) {
        self.round_started = now;
        self.round_paused = Duration::ZERO;
        self.round_carried = Duration::ZERO;
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            let pause = now.saturating_duration_since(paused_at);
            self.session_paused += pause;
            self.round_paused += pause;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    fn open_pause(&self, now: Instant) -> Duration {
        self.paused_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(Duration::ZERO)
    }

    pub fn round_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.round_started)
            .saturating_add(self.round_carried)
            .saturating_sub(self.round_paused)
            .saturating_sub(self.open_pause(now))
    }

    pub fn session_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.session_started)
            .saturating_add(self.session_carried)
            .saturating_sub(self.session_paused)
            .saturating_sub(self.open_pause(now))
    }

    /// Time left on a countdown of `limit` for the current round.
    pub fn round_remaining(&self, limit: Duration, now: Instant) -> Duration {
        limit.saturating_sub(self.round_elapsed(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_elapsed_without_pause() {
        let t0 = Instant::now();
        let clock = SessionClock::start(t0);
        assert_eq!(clock.round_elapsed(t0 + secs(7)), secs(7));
        assert_eq!(clock.session_elapsed(t0 + secs(7)), secs(7));
        assert_eq!(clock.round_remaining(secs(15), t0 + secs(7)), secs(8));
        assert_eq!(clock.round_remaining(secs(15), t0 + secs(20)), Duration::ZERO);
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(t0);

        clock.pause(t0 + secs(5));
        assert!(clock.is_paused());
        assert_eq!(clock.round_elapsed(t0 + secs(30)), secs(5));

        clock.resume(t0 + secs(30));
        assert!(!clock.is_paused());
        assert_eq!(clock.round_elapsed(t0 + secs(32)), secs(7));
        assert_eq!(clock.session_elapsed(t0 + secs(32)), secs(7));
    }

    #[test]
    fn test_new_round_resets_round_time_only() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(t0);
        clock.pause(t0 + secs(2));
        clock.resume(t0 + secs(4));

        clock.start_round(t0 + secs(10));
        assert_eq!(clock.round_elapsed(t0 + secs(13)), secs(3));
        assert_eq!(clock.session_elapsed(t0 + secs(13)), secs(11));
    }

    #[test]
    fn test_repeated_pause_and_resume_are_harmless() {
        let t0 = Instant::now();
        let mut clock = SessionClock::start(t0);
        clock.resume(t0 + secs(1));
        clock.pause(t0 + secs(2));
        clock.pause(t0 + secs(3));
        clock.resume(t0 + secs(4));
        assert_eq!(clock.round_elapsed(t0 + secs(5)), secs(3));
    }

    #[test]
    fn test_resume_from_saved_elapsed() {
        let t0 = Instant::now() + secs(100);
        let clock = SessionClock::resume_from(t0, secs(40), secs(6));
        assert_eq!(clock.session_elapsed(t0 + secs(1)), secs(41));
        assert_eq!(clock.round_elapsed(t0 + secs(1)), secs(7));
    }

    #[test]
    fn test_resume_keeps_elapsed_older_than_the_clock() {
        let t0 = Instant::now();
        let long_ago = secs(10 * 365 * 24 * 3600);
        let mut clock = SessionClock::resume_from(t0, long_ago, secs(6));
        assert_eq!(clock.session_elapsed(t0), long_ago);
        assert_eq!(clock.round_elapsed(t0 + secs(2)), secs(8));

        clock.pause(t0 + secs(2));
        clock.resume(t0 + secs(5));
        assert_eq!(clock.session_elapsed(t0 + secs(5)), long_ago + secs(2));

        clock.start_round(t0 + secs(5));
        assert_eq!(clock.round_elapsed(t0 + secs(5)), Duration::ZERO);
    }
}
