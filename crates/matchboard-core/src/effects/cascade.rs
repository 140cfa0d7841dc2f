// Sequential highlight over a row of cards, plus the "matches starting" pulse.

use std::time::Duration;

use super::VisualEffect;

/// Lights items 0..count one after another. Item `i` lights at
/// `i * stagger` and stays lit for `hold`; when two overlap the newer one
/// wins.
#[derive(Debug, Clone)]
pub struct Cascade {
    stagger: Duration,
    hold: Duration,
    count: usize,
    elapsed: Duration,
    running: bool,
}

impl Cascade {
    pub fn new(stagger: Duration, hold: Duration) -> Self {
        Cascade {
            stagger,
            hold,
            count: 0,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Table spin: 0.8 s between tables, each spinning for 1 s.
    pub fn table_spin() -> Self {
        Cascade::new(Duration::from_millis(800), Duration::from_millis(1000))
    }

    /// On-deck jiggle: 0.7 s between cards, each jiggling for 0.6 s.
    pub fn on_deck_jiggle() -> Self {
        Cascade::new(Duration::from_millis(700), Duration::from_millis(600))
    }

    /// Restart the cascade over `count` items. Zero items is a no-op.
    pub fn start(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.count = count;
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    fn start_of(&self, i: usize) -> Duration {
        self.stagger * i as u32
    }

    fn total(&self) -> Duration {
        self.start_of(self.count.saturating_sub(1)) + self.hold
    }

    /// Index of the item currently lit, if any.
    pub fn highlighted(&self) -> Option<usize> {
        if !self.running {
            return None;
        }
        let started = if self.stagger.is_zero() {
            self.count - 1
        } else {
            let n = (self.elapsed.as_nanos() / self.stagger.as_nanos()) as usize;
            n.min(self.count - 1)
        };
        (0..=started)
            .rev()
            .find(|&i| self.elapsed < self.start_of(i) + self.hold)
    }
}

impl VisualEffect for Cascade {
    fn tick(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.total() {
            self.running = false;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Timed banner shown after the board moves to new matches.
#[derive(Debug, Clone, Default)]
pub struct Pulse {
    remaining: Duration,
}

impl Pulse {
    pub fn start(&mut self, duration: Duration) {
        self.remaining = duration;
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}

impl VisualEffect for Pulse {
    fn tick(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    fn is_running(&self) -> bool {
        !self.remaining.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn spin_walks_through_tables() {
        let mut c = Cascade::table_spin();
        c.start(3);
        assert_eq!(c.highlighted(), Some(0));
        c.tick(ms(500));
        assert_eq!(c.highlighted(), Some(0));
        // 0.9 s: table 0 still spinning, table 1 started; newest wins.
        c.tick(ms(400));
        assert_eq!(c.highlighted(), Some(1));
        c.tick(ms(800));
        assert_eq!(c.highlighted(), Some(2));
        // 1.6 s + 1 s hold = 2.6 s total.
        c.tick(ms(900));
        assert!(!c.is_running());
        assert_eq!(c.highlighted(), None);
    }

    #[test]
    fn jiggle_has_gaps_between_cards() {
        let mut c = Cascade::on_deck_jiggle();
        c.start(2);
        c.tick(ms(650));
        // Card 0 finished at 0.6 s, card 1 starts at 0.7 s.
        assert_eq!(c.highlighted(), None);
        assert!(c.is_running());
        c.tick(ms(100));
        assert_eq!(c.highlighted(), Some(1));
        c.tick(ms(600));
        assert!(!c.is_running());
    }

    #[test]
    fn start_with_zero_items_does_nothing() {
        let mut c = Cascade::table_spin();
        c.start(0);
        assert!(!c.is_running());
        assert_eq!(c.highlighted(), None);
    }

    #[test]
    fn restart_resets_elapsed() {
        let mut c = Cascade::table_spin();
        c.start(2);
        c.tick(ms(900));
        c.start(2);
        assert_eq!(c.highlighted(), Some(0));
    }

    #[test]
    fn pulse_counts_down() {
        let mut p = Pulse::default();
        assert!(!p.is_running());
        p.start(Duration::from_secs(2));
        p.tick(ms(1500));
        assert!(p.is_running());
        p.tick(ms(1500));
        assert!(!p.is_running());
        assert_eq!(p.remaining(), Duration::ZERO);
    }
}
