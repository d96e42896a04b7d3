use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::geometry::scatter;
use super::{Camera, DrawBatch, Scene};
use crate::color::Rgb;
use crate::geom::{frames, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldOptions {
    pub count: usize,
    /// Half the edge of the cube the stars are scattered in.
    pub extent: f32,
    pub color: Rgb,
    pub point_size: f32,
    pub opacity: f64,
    /// Y rotation per reference frame.
    pub spin: f32,
}

impl Default for StarFieldOptions {
    fn default() -> Self {
        Self {
            count: 400,
            extent: 40.0,
            color: Rgb::hex(0x004d8c),
            point_size: 0.6,
            opacity: 0.5,
            spin: 0.0005,
        }
    }
}

/// Slowly turning cloud of dim stars.
pub struct StarField {
    options: StarFieldOptions,
    camera: Camera,
    stars: Vec<Vec3>,
    rotation: f32,
}

impl StarField {
    pub fn new(options: StarFieldOptions, size: Size, rng: &mut StdRng) -> Self {
        let stars = scatter(rng, options.count, Vec3::splat(options.extent));
        let mut camera = Camera::new(60.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 10.0));
        camera.resize(size);
        Self {
            options,
            camera,
            stars,
            rotation: 0.0,
        }
    }

    pub fn stars(&self) -> &[Vec3] {
        &self.stars
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Scene for StarField {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn resize(&mut self, size: Size) {
        self.camera.resize(size);
    }

    fn advance(&mut self, dt: f64) {
        self.rotation = (self.rotation + self.options.spin * frames(dt) as f32) % std::f32::consts::TAU;
    }

    fn draw<'a>(&'a self, batch: &mut DrawBatch<'a>) {
        batch.points(
            &self.stars,
            Mat4::from_rotation_y(self.rotation),
            self.options.color.alpha(self.options.opacity),
            self.options.point_size,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn scatters_inside_cube_and_spins() {
        let mut field = StarField::new(StarFieldOptions::default(), Size::new(640.0, 480.0), &mut StdRng::seed_from_u64(3));
        assert_eq!(field.stars().len(), 400);
        assert!(field.stars().iter().all(|s| s.abs().max_element() <= 40.0));
        field.advance(1.0);
        assert!((field.rotation() - 0.03).abs() < 1e-6);
    }
}
