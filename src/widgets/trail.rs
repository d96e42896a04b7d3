use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, CYAN, MAGENTA, TEAL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailOptions {
    pub enabled: bool,
    pub lifetime_ms: u32,
    pub min_size: f64,
    pub max_size: f64,
    pub colors: Vec<Rgb>,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            lifetime_ms: 600,
            min_size: 4.0,
            max_size: 12.0,
            colors: vec![CYAN, MAGENTA, TEAL],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgb,
    age: f64,
}

/// Short-lived dots dropped behind the pointer.
pub struct CursorTrail {
    options: TrailOptions,
    lifetime: f64,
    markers: VecDeque<Marker>,
    next_id: u64,
    rng: StdRng,
}

impl CursorTrail {
    pub fn new(options: TrailOptions, rng: StdRng) -> Self {
        Self {
            lifetime: f64::from(options.lifetime_ms) / 1000.0,
            options,
            markers: VecDeque::new(),
            next_id: 0,
            rng,
        }
    }

    pub fn live(&self) -> usize {
        self.markers.len()
    }

    /// Drops a marker at client coordinates.
    pub fn spawn(&mut self, x: f64, y: f64) -> Marker {
        let (lo, hi) = (self.options.min_size, self.options.max_size);
        let marker = Marker {
            id: self.next_id,
            x,
            y,
            size: lo + self.rng.random::<f64>() * (hi - lo),
            color: self.options.colors.choose(&mut self.rng).copied().unwrap_or(CYAN),
            age: 0.0,
        };
        self.next_id += 1;
        self.markers.push_back(marker);
        marker
    }

    /// Ages every marker and returns the ids that expired.
    pub fn advance(&mut self, dt: f64) -> Vec<u64> {
        for m in &mut self.markers {
            m.age += dt;
        }
        let mut expired = Vec::new();
        while let Some(front) = self.markers.front() {
            if front.age < self.lifetime {
                break;
            }
            expired.push(front.id);
            self.markers.pop_front();
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn markers_expire_in_spawn_order() {
        let mut trail = CursorTrail::new(TrailOptions::default(), StdRng::seed_from_u64(8));
        let a = trail.spawn(10.0, 10.0);
        assert!((4.0..12.0).contains(&a.size));
        assert!(trail.advance(0.25).is_empty());
        let b = trail.spawn(12.0, 11.0);
        assert_eq!(trail.live(), 2);
        assert_eq!(trail.advance(0.4), vec![a.id]);
        assert_eq!(trail.advance(0.25), vec![b.id]);
        assert_eq!(trail.live(), 0);
    }
}
