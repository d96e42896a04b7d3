use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    pub interval_ms: u32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self { interval_ms: 6000 }
    }
}

/// Cycles a single active slide through `len` slides on a fixed interval.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    active: usize,
    interval: f64,
    elapsed: f64,
}

impl Carousel {
    /// `None` without slides.
    pub fn new(len: usize, options: &CarouselOptions) -> Option<Self> {
        (len > 0).then(|| Self {
            len,
            active: 0,
            interval: f64::from(options.interval_ms.max(1)) / 1000.0,
            elapsed: 0.0,
        })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, slide: usize) -> bool {
        slide == self.active
    }

    /// Returns `(previous, next)` when the active slide changed.
    pub fn advance(&mut self, dt: f64) -> Option<(usize, usize)> {
        self.elapsed += dt;
        let previous = self.active;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.active = (self.active + 1) % self.len;
        }
        (previous != self.active).then_some((previous, self.active))
    }
}
