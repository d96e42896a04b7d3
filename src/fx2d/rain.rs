use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Effect2d;
use crate::color::{Rgb, Rgba, CYAN};
use crate::geom::{frames, PointerRatio, Size};
use crate::paint::Painter;

const GLYPHS: &str = "アァカサタナハマヤャラワ0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$%&*";
const FADE: Rgba = Rgba::new(0, 0, 0, 0.05);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainOptions {
    pub font_px: f64,
    pub color: Rgb,
    /// Chance per frame that a column past the bottom restarts at the top.
    pub reset_chance: f64,
    /// Extra speed multiplier with the pointer at the right edge.
    pub pointer_boost: f64,
}

impl Default for RainOptions {
    fn default() -> Self {
        Self {
            font_px: 20.0,
            color: CYAN,
            reset_chance: 0.025,
            pointer_boost: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Head position in rows.
    pub drop: f64,
    /// Glyph drawn this frame and its y in px.
    pub glyph: char,
    pub head_y: f64,
}

/// Falling glyph columns whose speed follows the pointer's horizontal position.
pub struct DigitalRain {
    options: RainOptions,
    size: Size,
    glyphs: Vec<char>,
    columns: Vec<Column>,
    speed: f64,
    rng: StdRng,
}

impl DigitalRain {
    pub fn new(options: RainOptions, size: Size, rng: StdRng) -> Self {
        let mut fx = Self {
            options,
            size,
            glyphs: GLYPHS.chars().collect(),
            columns: Vec::new(),
            speed: 1.0,
            rng,
        };
        fx.resize(size);
        fx
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    fn glyph(&mut self) -> char {
        self.glyphs.choose(&mut self.rng).copied().unwrap_or('0')
    }
}

impl Effect2d for DigitalRain {
    fn resize(&mut self, size: Size) {
        self.size = size;
        let count = if self.options.font_px > 0.0 {
            (size.width / self.options.font_px).floor().max(0.0) as usize
        } else {
            0
        };
        self.columns = (0..count)
            .map(|_| Column { drop: 0.0, glyph: ' ', head_y: 0.0 })
            .collect();
    }

    fn pointer(&mut self, at: PointerRatio) {
        self.speed = 1.0 + at.x * self.options.pointer_boost;
    }

    fn advance(&mut self, dt: f64) {
        let steps = frames(dt);
        let font = self.options.font_px;
        // Per-frame chance compounded over however many reference frames passed.
        let chance = 1.0 - (1.0 - self.options.reset_chance.clamp(0.0, 1.0)).powf(steps);
        for i in 0..self.columns.len() {
            let glyph = self.glyph();
            let restart = self.rng.random::<f64>() < chance;
            let column = &mut self.columns[i];
            column.glyph = glyph;
            column.head_y = column.drop * font;
            column.drop += self.speed * steps;
            if column.head_y > self.size.height && restart {
                column.drop = 0.0;
            }
        }
    }

    fn render(&self, painter: &mut dyn Painter) {
        painter.fill_rect(0.0, 0.0, self.size.width, self.size.height, FADE);
        let color = self.options.color.alpha(1.0);
        let font = self.options.font_px;
        for (i, column) in self.columns.iter().enumerate() {
            let mut buf = [0u8; 4];
            painter.text(column.glyph.encode_utf8(&mut buf), i as f64 * font, column.head_y, color, font);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::REFERENCE_FRAME;
    use rand::SeedableRng;

    fn rain(width: f64) -> DigitalRain {
        DigitalRain::new(RainOptions::default(), Size::new(width, 100.0), StdRng::seed_from_u64(5))
    }

    #[test]
    fn one_column_per_font_width() {
        assert_eq!(rain(419.0).columns().len(), 20);
        let mut fx = rain(100.0);
        fx.resize(Size::new(40.0, 10.0));
        assert_eq!(fx.columns().len(), 2);
    }

    #[test]
    fn pointer_scales_speed() {
        let mut fx = rain(100.0);
        fx.pointer(PointerRatio { x: 1.0, y: 0.3 });
        assert_eq!(fx.speed(), 5.0);
        fx.pointer(PointerRatio { x: 0.0, y: 0.0 });
        assert_eq!(fx.speed(), 1.0);
    }

    #[test]
    fn drops_fall_and_eventually_restart() {
        let mut fx = rain(100.0);
        fx.advance(REFERENCE_FRAME);
        assert!(fx.columns().iter().all(|c| (c.drop - 1.0).abs() < 1e-9));
        assert!(fx.columns().iter().all(|c| GLYPHS.contains(c.glyph)));
        for _ in 0..5000 {
            fx.advance(REFERENCE_FRAME);
        }
        // Restarted columns never sit far below the surface for long.
        assert!(fx.columns().iter().any(|c| c.drop * 20.0 < 5000.0));
    }

    fn restarts_per_second(hz: f64) -> f64 {
        let mut fx = DigitalRain::new(RainOptions::default(), Size::new(20.0, 10.0), StdRng::seed_from_u64(11));
        let seconds = 2000.0;
        let mut restarts = 0;
        for _ in 0..(seconds * hz) as usize {
            fx.advance(1.0 / hz);
            if fx.columns()[0].drop == 0.0 {
                restarts += 1;
            }
        }
        f64::from(restarts) / seconds
    }

    #[test]
    fn restart_rate_ignores_refresh_rate() {
        let at_60 = restarts_per_second(60.0);
        let at_240 = restarts_per_second(240.0);
        assert!((1.3..1.6).contains(&at_60), "60 Hz: {at_60}");
        assert!((at_240 / at_60 - 1.0).abs() < 0.1, "60 Hz: {at_60}, 240 Hz: {at_240}");
    }
}
