//! Canvas 2D effects. Each one owns its element set, regenerates it on
//! resize and redraws the whole surface every frame.

pub mod chart;
pub mod network;
pub mod rain;
pub mod shapes;
pub mod waves;

use crate::geom::{PointerRatio, Size};
use crate::paint::Painter;

pub use chart::{ChartOptions, DoughnutChart};
pub use network::{NetworkOptions, ParticleNetwork};
pub use rain::{DigitalRain, RainOptions};
pub use shapes::{FloatingShapes, ShapesOptions};
pub use waves::{WaveBackground, WaveOptions};

pub trait Effect2d {
    /// Recomputes every derived element from the new surface size.
    fn resize(&mut self, size: Size);

    /// Pointer moved somewhere in the viewport.
    fn pointer(&mut self, _at: PointerRatio) {}

    /// Pointer moved over the canvas, in canvas pixels.
    fn hover(&mut self, _x: f64, _y: f64) {}

    fn advance(&mut self, dt: f64);

    fn render(&self, painter: &mut dyn Painter);
}
