// Visual effects for the board display.
//
// Effects never look at the board itself. The front end feeds them the
// number of cards on screen and a frame delta, and reads back which card (if
// any) is animating.

pub mod cascade;
pub mod confetti;
pub mod scheduler;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub use cascade::{Cascade, Pulse};
pub use confetti::{Confetti, ConfettiShape, Particle, PALETTE};
pub use scheduler::EffectScheduler;

/// Anything animated by a frame clock.
pub trait VisualEffect {
    fn tick(&mut self, dt: Duration);
    fn is_running(&self) -> bool;
}

/// Timings and switches for the idle animations.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    pub table_spin_interval: Duration,
    pub table_spin_enabled: bool,
    pub on_deck_jiggle_interval: Duration,
    pub on_deck_jiggle_enabled: bool,
    pub pulse_duration: Duration,
}

impl Default for EffectSettings {
    fn default() -> Self {
        EffectSettings {
            table_spin_interval: Duration::from_secs(480),
            table_spin_enabled: true,
            on_deck_jiggle_interval: Duration::from_secs(420),
            on_deck_jiggle_enabled: true,
            pulse_duration: Duration::from_secs(30),
        }
    }
}

/// How many cards of each kind are currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayCounts {
    pub active: usize,
    pub on_deck: usize,
}

/// Every effect the board shows, plus the RNG that drives them.
pub struct Effects {
    settings: EffectSettings,
    spin_timer: EffectScheduler,
    jiggle_timer: EffectScheduler,
    spin: Cascade,
    jiggle: Cascade,
    pulse: Pulse,
    confetti: Confetti,
    rng: StdRng,
}

impl Effects {
    pub fn new(settings: EffectSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Build with a caller-supplied RNG; tests pass a seeded one.
    pub fn with_rng(settings: EffectSettings, mut rng: StdRng) -> Self {
        let spin_timer = EffectScheduler::new(
            settings.table_spin_interval,
            settings.table_spin_enabled,
            &mut rng,
        );
        let jiggle_timer = EffectScheduler::new(
            settings.on_deck_jiggle_interval,
            settings.on_deck_jiggle_enabled,
            &mut rng,
        );
        Effects {
            settings,
            spin_timer,
            jiggle_timer,
            spin: Cascade::table_spin(),
            jiggle: Cascade::on_deck_jiggle(),
            pulse: Pulse::default(),
            confetti: Confetti::new(),
            rng,
        }
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    /// Advance every effect by `dt` and start idle animations that are due.
    pub fn tick(&mut self, dt: Duration, counts: DisplayCounts) {
        self.pulse.tick(dt);
        self.spin.tick(dt);
        self.jiggle.tick(dt);
        self.confetti.tick(dt);

        let spin_due = self.spin_timer.tick(dt, &mut self.rng);
        let jiggle_due = self.jiggle_timer.tick(dt, &mut self.rng);
        if self.pulse.is_running() {
            return;
        }
        if spin_due && counts.active > 0 {
            debug!("table spin over {} cards", counts.active);
            self.spin.start(counts.active);
        }
        if jiggle_due && counts.on_deck > 0 {
            debug!("on-deck jiggle over {} cards", counts.on_deck);
            self.jiggle.start(counts.on_deck);
        }
    }

    /// The board moved on to new matches: show the pulse and cut any
    /// running cascade short.
    pub fn matches_started(&mut self) {
        self.pulse.start(self.settings.pulse_duration);
        self.spin.stop();
        self.jiggle.stop();
    }

    /// Fire a confetti burst over a `width` x `height` pixel area.
    pub fn launch_confetti(&mut self, width: f64, height: f64) -> ConfettiShape {
        let shape = self.confetti.burst(&mut self.rng, width, height);
        debug!("confetti burst ({:?}), {} particles in flight", shape, self.confetti.len());
        shape
    }

    /// Pause or resume both idle timers. Returns true when now paused.
    pub fn toggle_paused(&mut self) -> bool {
        if self.spin_timer.is_paused() {
            self.spin_timer.resume();
            self.jiggle_timer.resume();
            false
        } else {
            self.spin_timer.pause();
            self.jiggle_timer.pause();
            true
        }
    }

    pub fn is_paused(&self) -> bool {
        self.spin_timer.is_paused()
    }

    /// Start both cascades now, unless the pulse is showing.
    pub fn trigger_cascades(&mut self, counts: DisplayCounts) {
        if self.pulse.is_running() {
            return;
        }
        self.spin.start(counts.active);
        self.jiggle.start(counts.on_deck);
    }

    /// Active card currently spinning.
    pub fn spinning_index(&self) -> Option<usize> {
        self.spin.highlighted()
    }

    /// On-deck card currently jiggling.
    pub fn jiggling_index(&self) -> Option<usize> {
        self.jiggle.highlighted()
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_running()
    }

    pub fn pulse_remaining(&self) -> Duration {
        self.pulse.remaining()
    }

    pub fn particles(&self) -> &[Particle] {
        self.confetti.particles()
    }

    /// True while anything on screen is moving.
    pub fn is_animating(&self) -> bool {
        self.spin.is_running()
            || self.jiggle.is_running()
            || self.pulse.is_running()
            || self.confetti.is_running()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(settings: EffectSettings) -> Effects {
        Effects::with_rng(settings, StdRng::seed_from_u64(42))
    }

    fn fast_settings() -> EffectSettings {
        EffectSettings {
            table_spin_interval: Duration::from_secs(20),
            on_deck_jiggle_interval: Duration::from_secs(20),
            pulse_duration: Duration::from_secs(5),
            ..EffectSettings::default()
        }
    }

    const COUNTS: DisplayCounts = DisplayCounts { active: 2, on_deck: 3 };

    /// Tick in 100 ms steps until `done` holds, giving up after `limit`.
    fn run_until(fx: &mut Effects, limit: Duration, done: impl Fn(&Effects) -> bool) -> bool {
        let step = Duration::from_millis(100);
        let mut t = Duration::ZERO;
        while t < limit {
            fx.tick(step, COUNTS);
            if done(fx) {
                return true;
            }
            t += step;
        }
        false
    }

    #[test]
    fn idle_animations_eventually_play() {
        let mut fx = effects(fast_settings());
        // 20 s +/- 10 s.
        assert!(run_until(&mut fx, Duration::from_secs(31), |fx| fx.spinning_index().is_some()));
        let mut fx = effects(fast_settings());
        assert!(run_until(&mut fx, Duration::from_secs(31), |fx| fx.jiggling_index().is_some()));
    }

    #[test]
    fn disabled_animations_never_play() {
        let mut fx = effects(EffectSettings {
            table_spin_enabled: false,
            on_deck_jiggle_enabled: false,
            ..fast_settings()
        });
        assert!(!run_until(&mut fx, Duration::from_secs(120), |fx| {
            fx.spinning_index().is_some() || fx.jiggling_index().is_some()
        }));
    }

    #[test]
    fn paused_animations_never_play() {
        let mut fx = effects(fast_settings());
        assert!(fx.toggle_paused());
        assert!(fx.is_paused());
        assert!(!run_until(&mut fx, Duration::from_secs(120), |fx| fx.is_animating()));
        assert!(!fx.toggle_paused());
    }

    #[test]
    fn pulse_blocks_cascades() {
        let mut fx = effects(fast_settings());
        fx.matches_started();
        assert!(fx.is_pulsing());
        fx.trigger_cascades(COUNTS);
        assert_eq!(fx.spinning_index(), None);
        fx.tick(Duration::from_secs(5), COUNTS);
        assert!(!fx.is_pulsing());
        fx.trigger_cascades(COUNTS);
        assert_eq!(fx.spinning_index(), Some(0));
        assert_eq!(fx.jiggling_index(), Some(0));
    }

    #[test]
    fn matches_started_stops_running_cascades() {
        let mut fx = effects(fast_settings());
        fx.trigger_cascades(COUNTS);
        assert!(fx.spinning_index().is_some());
        fx.matches_started();
        assert_eq!(fx.spinning_index(), None);
        assert_eq!(fx.jiggling_index(), None);
    }

    #[test]
    fn confetti_falls_away() {
        let mut fx = effects(EffectSettings::default());
        fx.launch_confetti(800.0, 600.0);
        assert!(!fx.particles().is_empty());
        for _ in 0..600 {
            fx.tick(Duration::from_millis(50), DisplayCounts::default());
        }
        assert!(fx.particles().is_empty());
    }

    #[test]
    fn no_cards_no_cascade() {
        let mut fx = effects(fast_settings());
        fx.trigger_cascades(DisplayCounts::default());
        assert!(!fx.is_animating());
    }
}
