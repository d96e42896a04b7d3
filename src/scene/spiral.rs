use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Vec3};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::torus_knot;
use super::{Camera, DrawBatch, Scene};
use crate::color::{Rgb, CYAN};
use crate::geom::{frames, PointerRatio, Size};

const BASE_SWIRL_SPEED: f32 = 0.002;
const POINTER_SWIRL_SPEED: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralOptions {
    /// Draw a wireframe torus knot in the middle of the swirl.
    pub torus: bool,
    pub torus_color: Rgb,
    pub torus_radius: f32,
    pub particle_color: Rgb,
    pub swirl_count: usize,
    pub point_size: f32,
}

impl Default for SpiralOptions {
    fn default() -> Self {
        Self {
            torus: false,
            torus_color: CYAN,
            torus_radius: 1.5,
            particle_color: Rgb::hex(0xff00d4),
            swirl_count: 600,
            point_size: 0.07,
        }
    }
}

/// Points circling the view axis at random radii, optionally around a
/// spinning torus knot. The pointer's horizontal position sets the swirl speed.
pub struct SpiralScene {
    options: SpiralOptions,
    camera: Camera,
    torus: Option<Vec<Vec3>>,
    torus_rotation: (f32, f32),
    angles: Vec<f32>,
    radii: Vec<f32>,
    positions: Vec<Vec3>,
    swirl_speed: f32,
}

impl SpiralScene {
    pub fn new(options: SpiralOptions, size: Size, rng: &mut StdRng) -> Self {
        let count = options.swirl_count;
        let angles: Vec<f32> = (0..count).map(|_| rng.random::<f32>() * TAU).collect();
        let radii: Vec<f32> = (0..count).map(|_| 1.0 + rng.random::<f32>() * 4.0).collect();
        let positions = angles
            .iter()
            .zip(&radii)
            .map(|(a, r)| Vec3::new(a.cos() * r, a.sin() * r, (rng.random::<f32>() - 0.5) * 1.5))
            .collect();
        let torus = options
            .torus
            .then(|| torus_knot(options.torus_radius, 0.35, 128, 16, 2, 3));
        let mut camera = Camera::new(50.0, 0.1, 100.0, Vec3::new(0.0, 0.0, 4.0));
        camera.resize(size);
        Self {
            options,
            camera,
            torus,
            torus_rotation: (0.0, 0.0),
            angles,
            radii,
            positions,
            swirl_speed: BASE_SWIRL_SPEED,
        }
    }

    pub fn swirl_speed(&self) -> f32 {
        self.swirl_speed
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    pub fn has_torus(&self) -> bool {
        self.torus.is_some()
    }
}

impl Scene for SpiralScene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn resize(&mut self, size: Size) {
        self.camera.resize(size);
    }

    fn pointer(&mut self, at: PointerRatio) {
        self.swirl_speed = BASE_SWIRL_SPEED + at.x as f32 * POINTER_SWIRL_SPEED;
    }

    fn advance(&mut self, dt: f64) {
        let steps = frames(dt) as f32;
        if self.torus.is_some() {
            self.torus_rotation.0 += 0.004 * steps;
            self.torus_rotation.1 += 0.003 * steps;
        }
        let delta = self.swirl_speed * steps;
        for ((angle, r), pos) in self.angles.iter_mut().zip(&self.radii).zip(&mut self.positions) {
            *angle = (*angle + delta) % TAU;
            let a = *angle;
            *pos = Vec3::new(a.cos() * r, a.sin() * r, (a * 2.0).sin() * r * 0.2);
        }
    }

    fn draw<'a>(&'a self, batch: &mut DrawBatch<'a>) {
        if let Some(torus) = &self.torus {
            let (rx, ry) = self.torus_rotation;
            batch.lines(torus, Mat4::from_euler(EulerRot::XYZ, rx, ry, 0.0), self.options.torus_color.alpha(1.0));
        }
        batch.points(
            &self.positions,
            Mat4::IDENTITY,
            self.options.particle_color.alpha(0.7),
            self.options.point_size,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::REFERENCE_FRAME;
    use crate::scene::Primitive;
    use rand::SeedableRng;

    fn scene(torus: bool) -> SpiralScene {
        let opts = SpiralOptions { torus, swirl_count: 200, ..SpiralOptions::default() };
        SpiralScene::new(opts, Size::new(800.0, 400.0), &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn particles_keep_their_radius() {
        let mut s = scene(false);
        assert_eq!(s.positions().len(), 200);
        assert!(s.radii().iter().all(|r| (1.0..5.0).contains(r)));
        for _ in 0..30 {
            s.advance(REFERENCE_FRAME);
        }
        for (p, r) in s.positions().iter().zip(s.radii()) {
            assert!((p.truncate().length() - r).abs() < 1e-4);
            assert!(p.z.abs() <= r * 0.2 + 1e-5);
        }
    }

    #[test]
    fn pointer_sets_swirl_speed() {
        let mut s = scene(false);
        assert_eq!(s.swirl_speed(), 0.002);
        s.pointer(PointerRatio { x: 1.0, y: 0.0 });
        assert!((s.swirl_speed() - 0.012).abs() < 1e-7);
    }

    #[test]
    fn torus_is_optional() {
        let mut batch = DrawBatch::default();
        let with = scene(true);
        with.draw(&mut batch);
        assert_eq!(batch.calls.len(), 2);
        assert_eq!(batch.calls[0].primitive, Primitive::Lines);

        let mut batch = DrawBatch::default();
        let without = scene(false);
        without.draw(&mut batch);
        assert_eq!(batch.calls.len(), 1);
        assert_eq!(batch.calls[0].primitive, Primitive::Points);
        assert!(!without.has_torus());
    }

    #[test]
    fn resize_updates_projection() {
        let mut s = scene(true);
        assert!((s.camera().aspect - 2.0).abs() < 1e-6);
        s.resize(Size::new(300.0, 600.0));
        assert!((s.camera().aspect - 0.5).abs() < 1e-6);
    }
}
