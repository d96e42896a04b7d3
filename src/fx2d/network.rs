use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Effect2d;
use crate::color::{Rgb, CYAN};
use crate::geom::{frames, Size};
use crate::paint::Painter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkOptions {
    /// Surface area (px²) per particle.
    pub area_per_particle: f64,
    /// Particles closer than this are linked.
    pub link_distance: f64,
    /// Peak opacity of a link between two coincident particles.
    pub link_opacity: f64,
    /// Velocity components are drawn from `[-max_speed/2, max_speed/2)`.
    pub max_speed: f64,
    pub dot_radius: f64,
    pub color: Rgb,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            area_per_particle: 8000.0,
            link_distance: 120.0,
            link_opacity: 0.6,
            max_speed: 0.6,
            dot_radius: 2.0,
            color: CYAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// Drifting dots joined by fading lines when they come close.
pub struct ParticleNetwork {
    options: NetworkOptions,
    size: Size,
    particles: Vec<Particle>,
    rng: StdRng,
}

/// Opacity of the link between two particles `distance` apart, `None` when
/// they are too far apart to be linked.
pub fn link_alpha(distance: f64, link_distance: f64, peak: f64) -> Option<f64> {
    (distance < link_distance).then(|| (1.0 - distance / link_distance) * peak)
}

impl ParticleNetwork {
    pub fn new(options: NetworkOptions, size: Size, rng: StdRng) -> Self {
        let mut network = Self {
            options,
            size,
            particles: Vec::new(),
            rng,
        };
        network.resize(size);
        network
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn spawn(&mut self) -> Particle {
        let Size { width, height } = self.size;
        let speed = self.options.max_speed;
        Particle {
            x: self.rng.random::<f64>() * width,
            y: self.rng.random::<f64>() * height,
            vx: (self.rng.random::<f64>() - 0.5) * speed,
            vy: (self.rng.random::<f64>() - 0.5) * speed,
        }
    }
}

impl Effect2d for ParticleNetwork {
    fn resize(&mut self, size: Size) {
        self.size = size;
        let count = size.count_for(self.options.area_per_particle);
        self.particles = (0..count).map(|_| self.spawn()).collect();
        log::debug!("particle network resized to {}x{}: {count} particles", size.width, size.height);
    }

    fn advance(&mut self, dt: f64) {
        let steps = frames(dt);
        let Size { width, height } = self.size;
        for p in &mut self.particles {
            p.x += p.vx * steps;
            p.y += p.vy * steps;
            if p.x < 0.0 || p.x > width {
                p.vx = -p.vx;
            }
            if p.y < 0.0 || p.y > height {
                p.vy = -p.vy;
            }
        }
    }

    fn render(&self, painter: &mut dyn Painter) {
        painter.clear();
        let dot = self.options.color.alpha(1.0);
        for p in &self.particles {
            painter.circle(p.x, p.y, self.options.dot_radius, dot, None);
        }
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if let Some(alpha) = link_alpha(distance, self.options.link_distance, self.options.link_opacity) {
                    painter.line((a.x, a.y), (b.x, b.y), self.options.color.alpha(alpha), 1.0);
                }
            }
        }
    }
}
