// Jittered timer that decides when an idle animation should play next.

use std::time::Duration;

use rand::Rng;

/// Maximum random offset applied to each interval, in either direction.
pub const JITTER_SECS: f64 = 10.0;

/// Intervals are never shorter than this, whatever the jitter.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Fires roughly every `base_interval`, with +/- 10 s of jitter so that
/// several boards side by side do not animate in lockstep.
///
/// A disabled scheduler does not count down. A paused scheduler keeps
/// counting but swallows the firing.
#[derive(Debug, Clone)]
pub struct EffectScheduler {
    base_interval: Duration,
    enabled: bool,
    paused: bool,
    until_next: Duration,
}

impl EffectScheduler {
    pub fn new<R: Rng + ?Sized>(base_interval: Duration, enabled: bool, rng: &mut R) -> Self {
        EffectScheduler {
            base_interval,
            enabled,
            paused: false,
            until_next: next_interval(base_interval, rng),
        }
    }

    /// Advance the timer. Returns true when the animation should play now.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> bool {
        if !self.enabled || self.base_interval.is_zero() {
            return false;
        }
        if dt < self.until_next {
            self.until_next -= dt;
            return false;
        }
        self.until_next = next_interval(self.base_interval, rng);
        !self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change the base interval. Takes effect after the pending firing.
    pub fn set_interval(&mut self, base_interval: Duration) {
        self.base_interval = base_interval;
    }

    pub fn until_next(&self) -> Duration {
        self.until_next
    }
}

/// Draw the next interval: base +/- jitter, clamped to [`MIN_INTERVAL`].
pub fn next_interval<R: Rng + ?Sized>(base: Duration, rng: &mut R) -> Duration {
    let jitter = rng.gen_range(-JITTER_SECS..JITTER_SECS);
    let secs = (base.as_secs_f64() + jitter).max(MIN_INTERVAL.as_secs_f64());
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn interval_stays_within_jitter() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let d = next_interval(Duration::from_secs(60), &mut rng);
            assert!(d >= Duration::from_secs(50) && d <= Duration::from_secs(70), "{d:?}");
        }
    }

    #[test]
    fn short_interval_is_clamped() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            assert!(next_interval(Duration::from_secs(2), &mut rng) >= MIN_INTERVAL);
        }
    }

    #[test]
    fn fires_once_interval_elapses() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = EffectScheduler::new(Duration::from_secs(30), true, &mut rng);
        let wait = s.until_next();
        assert!(!s.tick(wait / 2, &mut rng));
        assert!(s.tick(wait, &mut rng));
        // Rescheduled for another full interval.
        assert!(s.until_next() >= Duration::from_secs(20));
    }

    #[test]
    fn disabled_never_fires() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = EffectScheduler::new(Duration::from_secs(30), false, &mut rng);
        assert!(!s.tick(Duration::from_secs(3600), &mut rng));
        s.set_enabled(true);
        assert!(s.tick(Duration::from_secs(3600), &mut rng));
    }

    #[test]
    fn paused_swallows_firing_but_keeps_counting() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = EffectScheduler::new(Duration::from_secs(30), true, &mut rng);
        s.pause();
        assert!(!s.tick(Duration::from_secs(60), &mut rng));
        s.resume();
        let wait = s.until_next();
        assert!(s.tick(wait, &mut rng));
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = EffectScheduler::new(Duration::ZERO, true, &mut rng);
        assert!(!s.tick(Duration::from_secs(3600), &mut rng));
        s.set_interval(Duration::from_secs(30));
        assert!(s.tick(Duration::from_secs(3600), &mut rng));
    }
}
