use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Effect2d;
use crate::color::{Rgb, CYAN, MAGENTA, VIOLET};
use crate::geom::{frames, Size};
use crate::paint::Painter;

const FILL_ALPHA: f64 = 0x30 as f64 / 255.0;
const STROKE_ALPHA: f64 = 0x70 as f64 / 255.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapesOptions {
    pub area_per_shape: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub max_speed: f64,
    pub colors: Vec<Rgb>,
}

impl Default for ShapesOptions {
    fn default() -> Self {
        Self {
            area_per_shape: 18000.0,
            min_radius: 10.0,
            max_radius: 35.0,
            max_speed: 0.5,
            colors: vec![CYAN, MAGENTA, VIOLET],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: Rgb,
}

/// Translucent neon circles drifting across the surface and wrapping around.
pub struct FloatingShapes {
    options: ShapesOptions,
    size: Size,
    shapes: Vec<Shape>,
    rng: StdRng,
}

impl FloatingShapes {
    pub fn new(options: ShapesOptions, size: Size, rng: StdRng) -> Self {
        let mut fx = Self {
            options,
            size,
            shapes: Vec::new(),
            rng,
        };
        fx.resize(size);
        fx
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

/// Wraps a coordinate that left `[-margin, extent + margin]` to the opposite side.
fn wrap(v: f64, extent: f64, margin: f64) -> f64 {
    if v > extent + margin {
        -margin
    } else if v < -margin {
        extent + margin
    } else {
        v
    }
}

impl Effect2d for FloatingShapes {
    fn resize(&mut self, size: Size) {
        self.size = size;
        let count = size.count_for(self.options.area_per_shape);
        let opts = &self.options;
        let rng = &mut self.rng;
        self.shapes = (0..count)
            .map(|_| Shape {
                x: rng.random::<f64>() * size.width,
                y: rng.random::<f64>() * size.height,
                radius: opts.min_radius + rng.random::<f64>() * (opts.max_radius - opts.min_radius),
                vx: (rng.random::<f64>() - 0.5) * opts.max_speed,
                vy: (rng.random::<f64>() - 0.5) * opts.max_speed,
                color: opts.colors.choose(rng).copied().unwrap_or(CYAN),
            })
            .collect();
    }

    fn advance(&mut self, dt: f64) {
        let steps = frames(dt);
        let Size { width, height } = self.size;
        for s in &mut self.shapes {
            s.x = wrap(s.x + s.vx * steps, width, s.radius);
            s.y = wrap(s.y + s.vy * steps, height, s.radius);
        }
    }

    fn render(&self, painter: &mut dyn Painter) {
        painter.clear();
        for s in &self.shapes {
            painter.circle(s.x, s.y, s.radius, s.color.alpha(FILL_ALPHA), Some((s.color.alpha(STROKE_ALPHA), 0.8)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn count_follows_area() {
        let mut fx = FloatingShapes::new(ShapesOptions::default(), Size::new(1200.0, 800.0), StdRng::seed_from_u64(1));
        assert_eq!(fx.shapes().len(), 53);
        fx.resize(Size::new(100.0, 100.0));
        assert!(fx.shapes().is_empty());
    }

    #[test]
    fn shapes_use_palette_and_bounds() {
        let opts = ShapesOptions::default();
        let fx = FloatingShapes::new(opts.clone(), Size::new(900.0, 600.0), StdRng::seed_from_u64(2));
        for s in fx.shapes() {
            assert!(opts.colors.contains(&s.color));
            assert!((10.0..35.0).contains(&s.radius));
            assert!(s.x < 900.0 && s.y < 600.0);
        }
    }

    #[test]
    fn wraps_past_margin() {
        assert_eq!(wrap(131.0, 100.0, 30.0), -30.0);
        assert_eq!(wrap(-31.0, 100.0, 30.0), 130.0);
        assert_eq!(wrap(50.0, 100.0, 30.0), 50.0);
    }
}
