//! Wireframe generators. Every function returns a line list: consecutive
//! vertex pairs are independent segments.

use std::collections::{BTreeSet, HashMap};
use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::Rng;

fn torus_knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

/// (p, q) torus knot swept by a tube of radius `tube`.
pub fn torus_knot(radius: f32, tube: f32, tubular: usize, radial: usize, p: u32, q: u32) -> Vec<Vec3> {
    let (p, q) = (p as f32, q as f32);
    let ring = radial + 1;
    let mut grid = Vec::with_capacity((tubular + 1) * ring);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = torus_knot_curve(u, p, q, radius);
        let p2 = torus_knot_curve(u + 0.01, p, q, radius);
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        let n = b.cross(t).normalize_or_zero();
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            grid.push(p1 + n * cx + b * cy);
        }
    }

    let mut lines = Vec::with_capacity(tubular * radial * 4);
    for i in 0..tubular {
        for j in 0..radial {
            let a = grid[i * ring + j];
            lines.extend([a, grid[(i + 1) * ring + j], a, grid[i * ring + j + 1]]);
        }
    }
    lines
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Icosahedron projected onto a sphere of `radius`, each face split
/// `detail` times into four. Shared edges are emitted once.
pub fn icosahedron(radius: f32, detail: u32) -> Vec<Vec3> {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let mut verts: Vec<Vec3> = [
        (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
        (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
        (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();
    let mut faces = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..detail {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut midpoint = |a: usize, b: usize, verts: &mut Vec<Vec3>| {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                verts.push(((verts[a] + verts[b]) * 0.5).normalize());
                verts.len() - 1
            })
        };
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut verts);
            let bc = midpoint(b, c, &mut verts);
            let ca = midpoint(c, a, &mut verts);
            next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = next;
    }

    let edges: BTreeSet<(usize, usize)> = faces
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect();
    edges
        .into_iter()
        .flat_map(|(a, b)| [verts[a] * radius, verts[b] * radius])
        .collect()
}

/// Open-ended cylinder (or cone when one radius is zero) along +y,
/// centered on the origin.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: usize) -> Vec<Vec3> {
    let half = height / 2.0;
    let ring = |r: f32, y: f32| -> Vec<Vec3> {
        (0..segments)
            .map(|i| {
                let a = i as f32 / segments as f32 * TAU;
                Vec3::new(r * a.sin(), y, r * a.cos())
            })
            .collect()
    };
    let top = ring(radius_top, half);
    let bottom = ring(radius_bottom, -half);
    let mut lines = Vec::with_capacity(segments * 6);
    for i in 0..segments {
        let j = (i + 1) % segments;
        if radius_top > 0.0 {
            lines.extend([top[i], top[j]]);
        }
        if radius_bottom > 0.0 {
            lines.extend([bottom[i], bottom[j]]);
        }
        lines.extend([top[i], bottom[i]]);
    }
    lines
}

pub fn cone(radius: f32, height: f32, segments: usize) -> Vec<Vec3> {
    cylinder(0.0, radius, height, segments)
}

/// Axis-aligned box edges.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Vec<Vec3> {
    let h = Vec3::new(width, height, depth) / 2.0;
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { -h.x } else { h.x },
            if i & 2 == 0 { -h.y } else { h.y },
            if i & 4 == 0 { -h.z } else { h.z },
        )
    };
    let mut lines = Vec::with_capacity(24);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                lines.extend([corner(i), corner(i | bit)]);
            }
        }
    }
    lines
}

/// Square grid on the XZ plane. Returns the two center lines and the rest
/// separately so they can be tinted differently.
pub fn grid(size: f32, divisions: usize) -> (Vec<Vec3>, Vec<Vec3>) {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut center = Vec::with_capacity(4);
    let mut rest = Vec::with_capacity(divisions * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let segs = [
            Vec3::new(-half, 0.0, k),
            Vec3::new(half, 0.0, k),
            Vec3::new(k, 0.0, -half),
            Vec3::new(k, 0.0, half),
        ];
        if i * 2 == divisions {
            center.extend(segs);
        } else {
            rest.extend(segs);
        }
    }
    (center, rest)
}

/// Bakes `model` into the vertices.
pub fn transformed(lines: &[Vec3], model: Mat4) -> Vec<Vec3> {
    lines.iter().map(|v| model.transform_point3(*v)).collect()
}

/// Uniformly scattered points in the box `[-half, half)` per axis.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize, half: Vec3) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0 * half.x,
                (rng.random::<f32>() - 0.5) * 2.0 * half.y,
                (rng.random::<f32>() - 0.5) * 2.0 * half.z,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icosahedron_edge_counts() {
        assert_eq!(icosahedron(1.0, 0).len(), 30 * 2);
        let sub = icosahedron(1.2, 1);
        assert_eq!(sub.len(), 120 * 2);
        assert!(sub.iter().all(|v| (v.length() - 1.2).abs() < 1e-5));
    }

    #[test]
    fn torus_knot_segment_count() {
        let knot = torus_knot(1.5, 0.35, 128, 16, 2, 3);
        assert_eq!(knot.len(), 128 * 16 * 4);
        assert!(knot.iter().all(|v| v.is_finite()));
        // The tube never strays further than radius * 1.5 + tube from the axis.
        assert!(knot.iter().all(|v| v.length() <= 1.5 * 1.5 + 0.35 + 1e-3));
    }

    #[test]
    fn cone_has_no_top_ring() {
        assert_eq!(cone(0.15, 0.4, 16).len(), 16 * 4);
        assert_eq!(cylinder(0.15, 0.15, 1.4, 16).len(), 16 * 6);
        assert_eq!(cuboid(0.8, 0.05, 0.25).len(), 24);
    }

    #[test]
    fn grid_splits_center_lines() {
        let (center, rest) = grid(60.0, 60);
        assert_eq!(center.len(), 4);
        assert_eq!(rest.len(), 60 * 4);
        assert!(center.iter().any(|v| v.z == 0.0 && v.x == -30.0));
    }
}
