use serde::{Deserialize, Serialize};

use crate::geom::{ease_toward, PointerRatio};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxOptions {
    /// Maximum background shift in percent, edge to edge.
    pub intensity: f64,
    /// Fraction of the remaining distance covered per reference frame.
    pub smoothing: f64,
    /// Viewports narrower than this get no parallax.
    pub min_viewport_width: f64,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            intensity: 8.0,
            smoothing: 0.08,
            min_viewport_width: 768.0,
        }
    }
}

/// Background offset that trails the pointer.
#[derive(Debug, Clone)]
pub struct Parallax {
    options: ParallaxOptions,
    current: (f64, f64),
    target: (f64, f64),
}

impl Parallax {
    /// `None` on narrow viewports.
    pub fn new(options: ParallaxOptions, viewport_width: f64) -> Option<Self> {
        (viewport_width >= options.min_viewport_width).then(|| Self {
            options,
            current: (0.0, 0.0),
            target: (0.0, 0.0),
        })
    }

    pub fn pointer(&mut self, at: PointerRatio) {
        let k = self.options.intensity;
        self.target = ((at.x - 0.5) * k, (at.y - 0.5) * k);
    }

    pub fn advance(&mut self, dt: f64) {
        let s = self.options.smoothing;
        self.current = (
            ease_toward(self.current.0, self.target.0, s, dt),
            ease_toward(self.current.1, self.target.1, s, dt),
        );
    }

    pub fn offset(&self) -> (f64, f64) {
        self.current
    }

    /// CSS `background-position` for the current offset.
    pub fn background_position(&self) -> String {
        format!("{}% {}%", 50.0 + self.current.0, 50.0 + self.current.1)
    }
}
