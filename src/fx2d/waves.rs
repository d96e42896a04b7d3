use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Effect2d;
use crate::color::{Rgba, CYAN, MAGENTA};
use crate::geom::{frames, Size};
use crate::paint::Painter;

const EVEN_COLOR: Rgba = CYAN.alpha(0.5);
const ODD_COLOR: Rgba = MAGENTA.alpha(0.4);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveOptions {
    pub count: usize,
    /// Horizontal sampling step in px.
    pub step: f64,
    pub line_width: f64,
}

impl Default for WaveOptions {
    fn default() -> Self {
        Self {
            count: 4,
            step: 2.0,
            line_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: f64,
    pub wavelength: f64,
    pub speed: f64,
    pub phase: f64,
    pub color: Rgba,
}

impl Wave {
    pub fn y_at(&self, x: f64, baseline: f64) -> f64 {
        baseline + ((x / self.wavelength) * TAU + self.phase).sin() * self.amplitude
    }
}

/// Overlapping sine strokes slowly sliding sideways.
pub struct WaveBackground {
    options: WaveOptions,
    size: Size,
    waves: Vec<Wave>,
    rng: StdRng,
}

impl WaveBackground {
    pub fn new(options: WaveOptions, size: Size, rng: StdRng) -> Self {
        let mut fx = Self {
            options,
            size,
            waves: Vec::new(),
            rng,
        };
        fx.resize(size);
        fx
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }
}

impl Effect2d for WaveBackground {
    fn resize(&mut self, size: Size) {
        self.size = size;
        let rng = &mut self.rng;
        self.waves = (0..self.options.count)
            .map(|i| Wave {
                amplitude: rng.random::<f64>() * 20.0 + 20.0,
                wavelength: rng.random::<f64>() * 100.0 + 100.0,
                speed: rng.random::<f64>() * 0.8 + 0.2,
                phase: rng.random::<f64>() * TAU,
                color: if i % 2 == 0 { EVEN_COLOR } else { ODD_COLOR },
            })
            .collect();
    }

    fn advance(&mut self, dt: f64) {
        let steps = frames(dt);
        for wave in &mut self.waves {
            wave.phase = (wave.phase + wave.speed * 0.01 * steps) % TAU;
        }
    }

    fn render(&self, painter: &mut dyn Painter) {
        painter.clear();
        let baseline = self.size.height / 2.0;
        let step = self.options.step.max(0.5);
        let samples = (self.size.width / step).floor() as usize;
        for wave in &self.waves {
            let mut points = Vec::with_capacity(samples + 2);
            points.push((0.0, baseline));
            points.extend((0..=samples).map(|i| {
                let x = i as f64 * step;
                (x, wave.y_at(x, baseline))
            }));
            painter.polyline(&points, wave.color, self.options.line_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::recorder::{Op, Recorder};
    use rand::SeedableRng;

    #[test]
    fn waves_alternate_colors_and_stay_in_ranges() {
        let fx = WaveBackground::new(WaveOptions::default(), Size::new(600.0, 200.0), StdRng::seed_from_u64(3));
        assert_eq!(fx.waves().len(), 4);
        for (i, w) in fx.waves().iter().enumerate() {
            assert_eq!(w.color, if i % 2 == 0 { EVEN_COLOR } else { ODD_COLOR });
            assert!((20.0..40.0).contains(&w.amplitude));
            assert!((100.0..200.0).contains(&w.wavelength));
            assert!((0.2..1.0).contains(&w.speed));
        }
    }

    #[test]
    fn renders_one_polyline_per_wave() {
        let fx = WaveBackground::new(WaveOptions::default(), Size::new(100.0, 50.0), StdRng::seed_from_u64(4));
        let mut rec = Recorder::default();
        fx.render(&mut rec);
        assert_eq!(rec.count(|op| matches!(op, Op::Polyline { points: 52, .. })), 4);
    }

    #[test]
    fn stays_within_amplitude() {
        let w = Wave { amplitude: 25.0, wavelength: 150.0, speed: 0.5, phase: 1.0, color: EVEN_COLOR };
        for x in 0..300 {
            assert!((w.y_at(f64::from(x), 100.0) - 100.0).abs() <= 25.0 + 1e-9);
        }
    }
}
