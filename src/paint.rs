//! Drawing seam for the 2D effects.
//!
//! Effects describe a frame through [`Painter`]; the browser binding
//! implements it on a `CanvasRenderingContext2d`.

use crate::color::Rgba;

pub trait Painter {
    /// Clears the whole surface to transparent.
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    /// Filled circle with an optional `(color, line_width)` outline.
    fn circle(&mut self, x: f64, y: f64, r: f64, fill: Rgba, stroke: Option<(Rgba, f64)>);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
    fn polyline(&mut self, points: &[(f64, f64)], color: Rgba, width: f64);
    /// Left/top anchored text at `font_px` monospace-ish size.
    fn text(&mut self, text: &str, x: f64, y: f64, color: Rgba, font_px: f64);
    /// Ring segment between `inner` and `outer` radii, angles in radians
    /// measured clockwise from +x (canvas convention).
    fn sector(&mut self, center: (f64, f64), inner: f64, outer: f64, angles: (f64, f64), fill: Rgba, stroke: Option<(Rgba, f64)>);
}

#[cfg(test)]
pub(crate) mod recorder {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear,
        FillRect { w: f64, h: f64, color: Rgba },
        Circle { x: f64, y: f64, r: f64, fill: Rgba },
        Line { from: (f64, f64), to: (f64, f64), color: Rgba },
        Polyline { points: usize, color: Rgba },
        Text { text: String, x: f64, y: f64 },
        Sector { inner: f64, outer: f64, angles: (f64, f64), fill: Rgba },
    }

    /// Painter that keeps every call for assertions.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn lines(&self) -> Vec<&Op> {
            self.ops.iter().filter(|op| matches!(op, Op::Line { .. })).collect()
        }

        pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl Painter for Recorder {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, _x: f64, _y: f64, w: f64, h: f64, color: Rgba) {
            self.ops.push(Op::FillRect { w, h, color });
        }

        fn circle(&mut self, x: f64, y: f64, r: f64, fill: Rgba, _stroke: Option<(Rgba, f64)>) {
            self.ops.push(Op::Circle { x, y, r, fill });
        }

        fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, _width: f64) {
            self.ops.push(Op::Line { from, to, color });
        }

        fn polyline(&mut self, points: &[(f64, f64)], color: Rgba, _width: f64) {
            self.ops.push(Op::Polyline { points: points.len(), color });
        }

        fn text(&mut self, text: &str, x: f64, y: f64, _color: Rgba, _font_px: f64) {
            self.ops.push(Op::Text { text: text.to_owned(), x, y });
        }

        fn sector(&mut self, _center: (f64, f64), inner: f64, outer: f64, angles: (f64, f64), fill: Rgba, _stroke: Option<(Rgba, f64)>) {
            self.ops.push(Op::Sector { inner, outer, angles, fill });
        }
    }
}
