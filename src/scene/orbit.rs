use std::f32::consts::{FRAC_PI_8, PI};

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::geometry::{cone, cuboid, cylinder, icosahedron, scatter, transformed};
use super::{Camera, DrawBatch, Scene};
use crate::color::{Rgb, CYAN};
use crate::geom::{ease_toward, frames, PointerRatio, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitOptions {
    pub core_color: Rgb,
    pub hull_color: Rgb,
    pub thruster_color: Rgb,
    pub orbit_radius: f32,
    pub star_count: usize,
    pub star_color: Rgb,
    /// How far the pointer can tilt the whole group, in radians.
    pub max_tilt: f64,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            core_color: CYAN,
            hull_color: Rgb::hex(0xff00d4),
            thruster_color: Rgb::hex(0xff0077),
            orbit_radius: 2.0,
            star_count: 800,
            star_color: Rgb::hex(0x007bff),
            max_tilt: 0.6,
        }
    }
}

struct Ship {
    hull: Vec<Vec3>,
    thruster: Vec<Vec3>,
}

impl Ship {
    fn build() -> Self {
        let place = |lines: Vec<Vec3>, rotation: Quat, at: Vec3| {
            transformed(&lines, Mat4::from_rotation_translation(rotation, at))
        };
        let mut hull = cylinder(0.15, 0.15, 1.4, 16);
        hull.extend(place(cone(0.15, 0.4, 16), Quat::IDENTITY, Vec3::new(0.0, 0.9, 0.0)));
        let wing = cuboid(0.8, 0.05, 0.25);
        hull.extend(place(wing.clone(), Quat::from_rotation_z(FRAC_PI_8), Vec3::new(0.0, 0.0, 0.25)));
        hull.extend(place(wing, Quat::from_rotation_z(-FRAC_PI_8), Vec3::new(0.0, 0.0, -0.25)));
        let thruster = place(cone(0.18, 0.5, 16), Quat::from_rotation_x(PI), Vec3::new(0.0, -0.95, 0.0));

        let scale = Mat4::from_scale(Vec3::splat(0.4));
        Self {
            hull: transformed(&hull, scale),
            thruster: transformed(&thruster, scale),
        }
    }
}

/// Wireframe icosahedron with a small ship circling it, all tilting toward
/// the pointer, in front of a turning star cloud.
pub struct OrbitScene {
    options: OrbitOptions,
    camera: Camera,
    core: Vec<Vec3>,
    ship: Ship,
    stars: Vec<Vec3>,
    tilt: (f64, f64),
    tilt_target: (f64, f64),
    orbit_angle: f32,
    ship_spin: f32,
    core_rotation: (f32, f32),
    star_rotation: f32,
}

impl OrbitScene {
    pub fn new(options: OrbitOptions, size: Size, rng: &mut StdRng) -> Self {
        let stars = scatter(rng, options.star_count, Vec3::splat(15.0));
        let mut camera = Camera::new(60.0, 0.1, 100.0, Vec3::new(0.0, 0.0, 4.0));
        camera.resize(size);
        Self {
            options,
            camera,
            core: icosahedron(1.2, 1),
            ship: Ship::build(),
            stars,
            tilt: (0.0, 0.0),
            tilt_target: (0.0, 0.0),
            orbit_angle: 0.0,
            ship_spin: 0.0,
            core_rotation: (0.0, 0.0),
            star_rotation: 0.0,
        }
    }

    pub fn tilt(&self) -> (f64, f64) {
        self.tilt
    }

    /// Ship position relative to the group center.
    pub fn ship_position(&self) -> Vec3 {
        let r = self.options.orbit_radius;
        Vec3::new(self.orbit_angle.cos() * r, 0.0, self.orbit_angle.sin() * r)
    }

    fn group(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.tilt.0 as f32, self.tilt.1 as f32, 0.0)
    }
}

impl Scene for OrbitScene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn resize(&mut self, size: Size) {
        self.camera.resize(size);
    }

    fn pointer(&mut self, at: PointerRatio) {
        let max = self.options.max_tilt;
        self.tilt_target = ((at.y * 2.0 - 1.0) * max, (at.x * 2.0 - 1.0) * max);
    }

    fn advance(&mut self, dt: f64) {
        let steps = frames(dt) as f32;
        self.tilt.0 = ease_toward(self.tilt.0, self.tilt_target.0, 0.03, dt);
        self.tilt.1 = ease_toward(self.tilt.1, self.tilt_target.1, 0.03, dt);
        self.orbit_angle += 0.01 * steps;
        self.ship_spin += 0.05 * steps;
        self.core_rotation.0 += 0.003 * steps;
        self.core_rotation.1 += 0.002 * steps;
        self.star_rotation += 0.0004 * steps;
    }

    fn draw<'a>(&'a self, batch: &mut DrawBatch<'a>) {
        let group = self.group();
        let (cx, cy) = self.core_rotation;
        batch.lines(&self.core, group * Mat4::from_euler(EulerRot::XYZ, cx, cy, 0.0), self.options.core_color.alpha(1.0));

        let ship = group * Mat4::from_translation(self.ship_position()) * Mat4::from_rotation_y(self.ship_spin);
        batch.lines(&self.ship.hull, ship, self.options.hull_color.alpha(1.0));
        batch.lines(&self.ship.thruster, ship, self.options.thruster_color.alpha(1.0));

        batch.points(&self.stars, Mat4::from_rotation_y(self.star_rotation), self.options.star_color.alpha(0.6), 0.05);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::REFERENCE_FRAME;
    use rand::SeedableRng;

    fn scene() -> OrbitScene {
        OrbitScene::new(OrbitOptions::default(), Size::new(1280.0, 720.0), &mut StdRng::seed_from_u64(21))
    }

    #[test]
    fn tilt_eases_toward_pointer() {
        let mut s = scene();
        s.pointer(PointerRatio { x: 1.0, y: 0.5 });
        s.advance(REFERENCE_FRAME);
        assert!((s.tilt().1 - 0.6 * 0.03).abs() < 1e-9);
        assert!(s.tilt().0.abs() < 1e-12);
        for _ in 0..600 {
            s.advance(REFERENCE_FRAME);
        }
        assert!((s.tilt().1 - 0.6).abs() < 1e-3);
    }

    #[test]
    fn ship_stays_on_orbit() {
        let mut s = scene();
        for _ in 0..157 {
            s.advance(REFERENCE_FRAME);
            assert!((s.ship_position().length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ship_is_small() {
        let s = scene();
        let reach = s.ship.hull.iter().chain(&s.ship.thruster).map(|v| v.length()).fold(0.0, f32::max);
        assert!(reach < 0.5);
        let mut batch = DrawBatch::default();
        s.draw(&mut batch);
        assert_eq!(batch.calls.len(), 4);
    }
}
