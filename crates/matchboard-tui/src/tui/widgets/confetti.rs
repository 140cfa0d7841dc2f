// Confetti overlay: paints particles straight onto the frame buffer.
//
// Particles live in virtual pixels (see `CELL_WIDTH_PX`/`CELL_HEIGHT_PX`);
// each one lands on whichever cell contains it. Cells outside the area are
// skipped, including particles still above the top edge.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

use matchboard_core::effects::{ConfettiShape, Particle};

use crate::app::{CELL_HEIGHT_PX, CELL_WIDTH_PX};

const BRICK_GLYPH: &str = "■";
const STREAMER_GLYPHS: [&str; 4] = ["─", "╲", "│", "╱"];

pub fn render(frame: &mut Frame, area: Rect, particles: &[Particle]) {
    let buffer = frame.buffer_mut();
    for particle in particles {
        let Some((x, y)) = cell_for(particle, area) else {
            continue;
        };
        let (r, g, b) = particle.rgb();
        if let Some(cell) = buffer.cell_mut((x, y)) {
            cell.set_symbol(glyph(particle)).set_fg(Color::Rgb(r, g, b));
        }
    }
}

/// Terminal cell holding the particle, if it is on screen.
pub fn cell_for(particle: &Particle, area: Rect) -> Option<(u16, u16)> {
    if particle.x < 0.0 || particle.y < 0.0 {
        return None;
    }
    let col = (particle.x / CELL_WIDTH_PX) as u32;
    let row = (particle.y / CELL_HEIGHT_PX) as u32;
    if col >= area.width as u32 || row >= area.height as u32 {
        return None;
    }
    Some((area.x + col as u16, area.y + row as u16))
}

pub fn glyph(particle: &Particle) -> &'static str {
    match particle.shape {
        ConfettiShape::Brick => BRICK_GLYPH,
        ConfettiShape::Regular => {
            let step = (particle.rotation.rem_euclid(180.0) / 45.0) as usize;
            STREAMER_GLYPHS[step.min(STREAMER_GLYPHS.len() - 1)]
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use matchboard_core::effects::PALETTE;

    fn particle(x: f64, y: f64, rotation: f64, shape: ConfettiShape) -> Particle {
        Particle {
            id: 0,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            rotation,
            rotation_speed: 0.0,
            color: 0,
            shape,
        }
    }

    #[test]
    fn maps_pixels_to_cells() {
        let area = Rect::new(0, 0, 20, 10);
        let p = particle(17.0, 33.0, 0.0, ConfettiShape::Regular);
        assert_eq!(cell_for(&p, area), Some((2, 2)));
    }

    #[test]
    fn skips_offscreen_particles() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(cell_for(&particle(10.0, -4.0, 0.0, ConfettiShape::Regular), area), None);
        assert_eq!(cell_for(&particle(-1.0, 4.0, 0.0, ConfettiShape::Regular), area), None);
        assert_eq!(cell_for(&particle(160.0, 4.0, 0.0, ConfettiShape::Regular), area), None);
        assert_eq!(cell_for(&particle(10.0, 160.0, 0.0, ConfettiShape::Regular), area), None);
    }

    #[test]
    fn glyph_follows_rotation() {
        assert_eq!(glyph(&particle(0.0, 0.0, 10.0, ConfettiShape::Regular)), "─");
        assert_eq!(glyph(&particle(0.0, 0.0, 95.0, ConfettiShape::Regular)), "│");
        assert_eq!(glyph(&particle(0.0, 0.0, 275.0, ConfettiShape::Regular)), "│");
        assert_eq!(glyph(&particle(0.0, 0.0, 95.0, ConfettiShape::Brick)), "■");
    }

    #[test]
    fn paints_particle_color() {
        let backend = ratatui::backend::TestBackend::new(20, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let particles = vec![particle(40.0, 48.0, 0.0, ConfettiShape::Brick)];
        terminal
            .draw(|frame| render(frame, frame.area(), &particles))
            .unwrap();
        let cell = &terminal.backend().buffer()[(5, 3)];
        assert_eq!(cell.symbol(), "■");
        let (r, g, b) = PALETTE[0];
        assert_eq!(cell.fg, Color::Rgb(r, g, b));
    }
}
