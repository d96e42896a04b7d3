use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::geometry::{grid, scatter};
use super::{Camera, DrawBatch, Scene};
use crate::color::{Rgb, CYAN};
use crate::geom::{frames, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub size: f32,
    pub divisions: usize,
    pub center_color: Rgb,
    pub line_color: Rgb,
    pub line_opacity: f64,
    pub point_count: usize,
    pub point_color: Rgb,
    pub point_size: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            size: 60.0,
            divisions: 60,
            center_color: Rgb::hex(0x0044aa),
            line_color: Rgb::hex(0x001a44),
            line_opacity: 0.3,
            point_count: 300,
            point_color: CYAN,
            point_size: 0.06,
        }
    }
}

/// Neon grid standing upright in front of the camera, turning about the
/// view axis with a sprinkle of faster-turning points.
pub struct GridScene {
    options: GridOptions,
    camera: Camera,
    center_lines: Vec<Vec3>,
    lines: Vec<Vec3>,
    points: Vec<Vec3>,
    rotation: f32,
}

impl GridScene {
    pub fn new(options: GridOptions, size: Size, rng: &mut StdRng) -> Self {
        let (center_lines, lines) = grid(options.size, options.divisions);
        let half = options.size / 2.0;
        let points = scatter(rng, options.point_count, Vec3::new(half, half, 5.0));
        let mut camera = Camera::new(45.0, 0.1, 200.0, Vec3::new(0.0, 0.0, 30.0));
        camera.resize(size);
        Self {
            options,
            camera,
            center_lines,
            lines,
            points,
            rotation: 0.0,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn grid_model(&self) -> Mat4 {
        // Stand the XZ grid up into the XY plane, then turn it.
        Mat4::from_rotation_z(self.rotation) * Mat4::from_rotation_x(FRAC_PI_2)
    }
}

impl Scene for GridScene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn resize(&mut self, size: Size) {
        self.camera.resize(size);
    }

    fn advance(&mut self, dt: f64) {
        self.rotation += 0.0015 * frames(dt) as f32;
    }

    fn draw<'a>(&'a self, batch: &mut DrawBatch<'a>) {
        let model = self.grid_model();
        let o = self.options.line_opacity;
        batch.lines(&self.lines, model, self.options.line_color.alpha(o));
        batch.lines(&self.center_lines, model, self.options.center_color.alpha(o));
        batch.points(
            &self.points,
            Mat4::from_rotation_z(self.rotation * 1.5),
            self.options.point_color.alpha(0.6),
            self.options.point_size,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn grid_faces_the_camera() {
        let scene = GridScene::new(GridOptions::default(), Size::new(1000.0, 500.0), &mut StdRng::seed_from_u64(9));
        let mut batch = DrawBatch::default();
        scene.draw(&mut batch);
        assert_eq!(batch.calls.len(), 3);
        for v in batch.calls[0].vertices {
            let p = batch.calls[0].model.transform_point3(*v);
            assert!(p.z.abs() < 1e-4);
        }
    }

    #[test]
    fn points_turn_faster_than_grid() {
        let mut scene = GridScene::new(GridOptions::default(), Size::new(100.0, 100.0), &mut StdRng::seed_from_u64(9));
        scene.advance(crate::geom::REFERENCE_FRAME * 10.0);
        assert!((scene.rotation() - 0.015).abs() < 1e-6);
        let mut batch = DrawBatch::default();
        scene.draw(&mut batch);
        let expected = Mat4::from_rotation_z(0.0225);
        assert!(batch.calls[2].model.abs_diff_eq(expected, 1e-5));
    }
}
