// Confetti particle simulation.
//
// Coordinates are virtual pixels with the origin at the top-left and y
// growing downward. The renderer decides how pixels map onto cells.

use std::time::Duration;

use rand::Rng;

use super::VisualEffect;

/// Colours a particle can take, as RGB.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0x00, 0x00, 0xff),
    (0xff, 0xff, 0x00),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xa5, 0x00),
    (0x61, 0xda, 0xfb),
];

/// Downward acceleration per 60 Hz frame.
pub const GRAVITY: f64 = 0.5;

/// Particles this far below the bottom edge are discarded.
pub const CULL_MARGIN: f64 = 100.0;

const FRAMES_PER_SEC: f64 = 60.0;

/// One burst in four uses bricks instead of regular confetti.
const BRICK_CHANCE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiShape {
    Regular,
    Brick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Index into [`PALETTE`].
    pub color: usize,
    pub shape: ConfettiShape,
}

impl Particle {
    pub fn rgb(&self) -> (u8, u8, u8) {
        PALETTE[self.color % PALETTE.len()]
    }
}

/// All particles currently in flight.
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
    height: f64,
    next_id: u64,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch a burst above a `width` x `height` area. Particles start
    /// within half the width of either side edge, up to half the height
    /// above the top, and fly toward the centre.
    ///
    /// Regular bursts spawn 700..800 particles; brick bursts spawn 60..160.
    /// Returns the shape used.
    pub fn burst<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f64, height: f64) -> ConfettiShape {
        let shape = if rng.gen_bool(BRICK_CHANCE) {
            ConfettiShape::Brick
        } else {
            ConfettiShape::Regular
        };
        let count = match shape {
            ConfettiShape::Brick => 60 + rng.gen_range(0..100),
            ConfettiShape::Regular => 700 + rng.gen_range(0..100),
        };

        self.height = self.height.max(height);
        let half_width = (width / 2.0).max(1.0);
        let half_height = (height / 2.0).max(1.0);
        self.particles.reserve(count);
        for _ in 0..count {
            let from_left = rng.gen_bool(0.5);
            let inset = rng.gen_range(0.0..half_width) - 5.0;
            let (x, angle_deg) = if from_left {
                (inset, rng.gen_range(0.0..90.0))
            } else {
                (width - inset, rng.gen_range(90.0..180.0))
            };
            let angle = f64::to_radians(angle_deg);
            let speed = rng.gen_range(1.0..6.0);
            self.particles.push(Particle {
                id: self.next_id,
                x,
                y: -rng.gen_range(0.0..half_height),
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                rotation: rng.gen_range(0.0..360.0),
                rotation_speed: rng.gen_range(-5.0..5.0),
                color: rng.gen_range(0..PALETTE.len()),
                shape,
            });
            self.next_id += 1;
        }
        shape
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl VisualEffect for Confetti {
    fn tick(&mut self, dt: Duration) {
        let frames = dt.as_secs_f64() * FRAMES_PER_SEC;
        for p in &mut self.particles {
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.vy += GRAVITY * frames;
            p.rotation = (p.rotation + p.rotation_speed * frames).rem_euclid(360.0);
        }
        let floor = self.height + CULL_MARGIN;
        self.particles.retain(|p| p.y < floor);
    }

    fn is_running(&self) -> bool {
        !self.particles.is_empty()
    }
}
