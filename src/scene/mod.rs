//! WebGL-backed 3D scenes: line meshes and point clouds under a perspective
//! camera. Scenes only produce draw calls; the browser binding owns the GL
//! context and uploads whatever a frame asks for.

pub mod geometry;
pub mod grid;
pub mod orbit;
pub mod spiral;
pub mod starfield;

use glam::{Mat4, Vec3};

use crate::color::Rgba;
use crate::geom::{PointerRatio, Size};

pub use grid::{GridOptions, GridScene};
pub use orbit::{OrbitOptions, OrbitScene};
pub use spiral::{SpiralOptions, SpiralScene};
pub use starfield::{StarField, StarFieldOptions};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
}

impl Camera {
    pub fn new(fov_deg: f32, near: f32, far: f32, eye: Vec3) -> Self {
        Self {
            fov_deg,
            aspect: 1.0,
            near,
            far,
            eye,
        }
    }

    /// Follows the surface aspect; a collapsed surface keeps the last one.
    pub fn resize(&mut self, size: Size) {
        if size.width > 0.0 && size.height > 0.0 {
            self.aspect = (size.width / size.height) as f32;
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Lines,
    Points,
}

#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub primitive: Primitive,
    pub vertices: &'a [Vec3],
    pub model: Mat4,
    pub color: Rgba,
    /// World-space point size, attenuated by distance.
    pub point_size: f32,
}

/// One frame's worth of draw calls.
#[derive(Debug, Default)]
pub struct DrawBatch<'a> {
    pub calls: Vec<DrawCall<'a>>,
}

impl<'a> DrawBatch<'a> {
    pub fn lines(&mut self, vertices: &'a [Vec3], model: Mat4, color: Rgba) {
        self.calls.push(DrawCall {
            primitive: Primitive::Lines,
            vertices,
            model,
            color,
            point_size: 1.0,
        });
    }

    pub fn points(&mut self, vertices: &'a [Vec3], model: Mat4, color: Rgba, point_size: f32) {
        self.calls.push(DrawCall {
            primitive: Primitive::Points,
            vertices,
            model,
            color,
            point_size,
        });
    }
}

pub trait Scene {
    fn camera(&self) -> &Camera;

    /// Surface changed size; recompute projection parameters.
    fn resize(&mut self, size: Size);

    fn pointer(&mut self, _at: PointerRatio) {}

    fn advance(&mut self, dt: f64);

    fn draw<'a>(&'a self, batch: &mut DrawBatch<'a>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_tracks_aspect() {
        let mut cam = Camera::new(50.0, 0.1, 100.0, Vec3::new(0.0, 0.0, 4.0));
        cam.resize(Size::new(1920.0, 1080.0));
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.resize(Size::new(300.0, 0.0));
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_center() {
        let cam = Camera::new(60.0, 0.1, 100.0, Vec3::new(0.0, 0.0, 4.0));
        let clip = cam.projection() * cam.view() * Vec3::ZERO.extend(1.0);
        assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
        assert!(clip.z / clip.w > -1.0 && clip.z / clip.w < 1.0);
    }
}
