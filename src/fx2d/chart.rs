//! Doughnut chart of skill percentages with a bottom legend, an eased intro
//! and hover highlighting.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::Effect2d;
use crate::color::{Rgb, Rgba, CYAN, MAGENTA, VIOLET};
use crate::geom::Size;
use crate::paint::Painter;

const PALETTE: [Rgb; 3] = [CYAN, MAGENTA, VIOLET];
const SWATCH: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Hole radius as a fraction of the outer radius.
    pub cutout: f64,
    pub hover_offset: f64,
    pub border_width: f64,
    pub intro_ms: u32,
    pub legend_font_px: f64,
    pub legend_color: Rgb,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            labels: ["HTML5", "CSS/SCSS", "JavaScript", "Node.js", "Docker", "Database"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            values: vec![90.0, 85.0, 80.0, 75.0, 70.0, 65.0],
            cutout: 0.6,
            hover_offset: 10.0,
            border_width: 2.0,
            intro_ms: 1000,
            legend_font_px: 14.0,
            legend_color: Rgb::hex(0xe3f2fd),
        }
    }
}

/// Fill and border color of the `i`-th segment.
pub fn segment_colors(i: usize) -> (Rgba, Rgba) {
    let base = PALETTE[i % PALETTE.len()];
    let fill = if (i / PALETTE.len()) % 2 == 0 { 0.8 } else { 0.6 };
    (base.alpha(fill), base.alpha(1.0))
}

fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub center: (f64, f64),
    pub inner: f64,
    pub outer: f64,
}

pub struct DoughnutChart {
    options: ChartOptions,
    size: Size,
    elapsed: f64,
    hovered: Option<usize>,
    pointer: (f64, f64),
}

impl DoughnutChart {
    pub fn new(options: ChartOptions, size: Size) -> Self {
        Self {
            options,
            size,
            elapsed: 0.0,
            hovered: None,
            pointer: (0.0, 0.0),
        }
    }

    fn total(&self) -> f64 {
        self.options.values.iter().filter(|v| **v > 0.0).sum()
    }

    /// Intro progress in [0, 1] after easing.
    pub fn progress(&self) -> f64 {
        let duration = f64::from(self.options.intro_ms) / 1000.0;
        if duration <= 0.0 {
            return 1.0;
        }
        ease_out_quart((self.elapsed / duration).min(1.0))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    fn legend_row_height(&self) -> f64 {
        self.options.legend_font_px * 2.0
    }

    fn legend_item_width(&self, label: &str) -> f64 {
        SWATCH + 6.0 + label.chars().count() as f64 * self.options.legend_font_px * 0.6 + 16.0
    }

    /// Top-left corner of every legend entry, wrapped into centered rows.
    pub fn legend_layout(&self) -> Vec<(f64, f64)> {
        let width = self.size.width;
        let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new()];
        let mut row_width = 0.0;
        for (i, label) in self.options.labels.iter().enumerate() {
            let w = self.legend_item_width(label);
            if row_width + w > width && !rows.last().is_some_and(Vec::is_empty) {
                rows.push(Vec::new());
                row_width = 0.0;
            }
            if let Some(row) = rows.last_mut() {
                row.push((i, w));
            }
            row_width += w;
        }
        let row_h = self.legend_row_height();
        let top = self.size.height - rows.len() as f64 * row_h;
        let mut out = vec![(0.0, 0.0); self.options.labels.len()];
        for (r, row) in rows.iter().enumerate() {
            let total: f64 = row.iter().map(|(_, w)| w).sum();
            let mut x = ((width - total) / 2.0).max(0.0);
            for &(i, w) in row {
                out[i] = (x, top + r as f64 * row_h + row_h / 4.0);
                x += w;
            }
        }
        out
    }

    fn legend_rows(&self) -> usize {
        let layout = self.legend_layout();
        let mut ys: Vec<f64> = layout.iter().map(|p| p.1).collect();
        ys.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        ys.len()
    }

    pub fn geometry(&self) -> Geometry {
        let chart_h = (self.size.height - self.legend_rows() as f64 * self.legend_row_height()).max(0.0);
        let outer = (self.size.width.min(chart_h) / 2.0 - self.options.hover_offset).max(0.0);
        Geometry {
            center: (self.size.width / 2.0, chart_h / 2.0),
            inner: outer * self.options.cutout,
            outer,
        }
    }

    /// Angular extent of each segment, clockwise from 12 o'clock, at full progress.
    pub fn spans(&self) -> Vec<(f64, f64)> {
        let total = self.total();
        let mut start = -FRAC_PI_2;
        self.options
            .values
            .iter()
            .map(|v| {
                let sweep = if total > 0.0 { v.max(0.0) / total * TAU } else { 0.0 };
                let span = (start, start + sweep);
                start += sweep;
                span
            })
            .collect()
    }

    /// Segment under canvas point `(x, y)`.
    pub fn segment_at(&self, x: f64, y: f64) -> Option<usize> {
        let g = self.geometry();
        let (dx, dy) = (x - g.center.0, y - g.center.1);
        let r = dx.hypot(dy);
        if r < g.inner || r > g.outer + self.options.hover_offset {
            return None;
        }
        let angle = (dy.atan2(dx) + FRAC_PI_2).rem_euclid(TAU) - FRAC_PI_2;
        self.spans().iter().position(|&(a, b)| angle >= a && angle < b)
    }

    pub fn tooltip(&self) -> Option<String> {
        let i = self.hovered?;
        let label = self.options.labels.get(i).map_or("", String::as_str);
        let value = self.options.values.get(i)?;
        Some(format!("{label}: {value}%"))
    }
}

impl Effect2d for DoughnutChart {
    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn hover(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
        self.hovered = self.segment_at(x, y);
    }

    fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    fn render(&self, painter: &mut dyn Painter) {
        painter.clear();
        let g = self.geometry();
        let progress = self.progress();
        let (outer, inner) = (g.outer * progress, g.inner * progress);
        for (i, (a, b)) in self.spans().into_iter().enumerate() {
            let (a, b) = (-FRAC_PI_2 + (a + FRAC_PI_2) * progress, -FRAC_PI_2 + (b + FRAC_PI_2) * progress);
            let mut center = g.center;
            if self.hovered == Some(i) {
                let mid = (a + b) / 2.0;
                center.0 += mid.cos() * self.options.hover_offset;
                center.1 += mid.sin() * self.options.hover_offset;
            }
            let (fill, border) = segment_colors(i);
            painter.sector(center, inner, outer, (a, b), fill, Some((border, self.options.border_width)));
        }

        let font = self.options.legend_font_px;
        let text_color = self.options.legend_color.alpha(1.0);
        for (i, (x, y)) in self.legend_layout().into_iter().enumerate() {
            painter.fill_rect(x, y, SWATCH, SWATCH, segment_colors(i).0);
            painter.text(&self.options.labels[i], x + SWATCH + 6.0, y, text_color, font);
        }

        if let Some(tip) = self.tooltip() {
            let (x, y) = (self.pointer.0 + 12.0, self.pointer.1 + 12.0);
            let w = tip.chars().count() as f64 * font * 0.6 + 12.0;
            painter.fill_rect(x, y, w, font * 1.8, Rgba::new(0, 0, 0, 0.8));
            painter.text(&tip, x + 6.0, y + font * 0.4, text_color, font);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::recorder::{Op, Recorder};

    fn chart() -> DoughnutChart {
        DoughnutChart::new(ChartOptions::default(), Size::new(400.0, 460.0))
    }

    #[test]
    fn spans_cover_full_circle_from_top() {
        let spans = chart().spans();
        assert_eq!(spans.len(), 6);
        assert!((spans[0].0 + FRAC_PI_2).abs() < 1e-12);
        assert!((spans[5].1 - (TAU - FRAC_PI_2)).abs() < 1e-9);
        let first = (spans[0].1 - spans[0].0) / TAU;
        assert!((first - 90.0 / 465.0).abs() < 1e-12);
    }

    #[test]
    fn hit_test_by_angle_and_ring() {
        let c = chart();
        let g = c.geometry();
        let r = (g.inner + g.outer) / 2.0;
        // Just right of 12 o'clock falls in the first segment.
        let a = -FRAC_PI_2 + 0.05;
        assert_eq!(c.segment_at(g.center.0 + r * a.cos(), g.center.1 + r * a.sin()), Some(0));
        // Just left of 12 o'clock wraps to the last one.
        let a = -FRAC_PI_2 - 0.05;
        assert_eq!(c.segment_at(g.center.0 + r * a.cos(), g.center.1 + r * a.sin()), Some(5));
        assert_eq!(c.segment_at(g.center.0, g.center.1), None);
    }

    #[test]
    fn hover_sets_tooltip() {
        let mut c = chart();
        let g = c.geometry();
        let r = (g.inner + g.outer) / 2.0;
        c.hover(g.center.0 + r, g.center.1);
        assert_eq!(c.hovered(), Some(1));
        assert_eq!(c.tooltip().as_deref(), Some("CSS/SCSS: 85%"));
        c.hover(0.0, 0.0);
        assert_eq!(c.tooltip(), None);
    }

    #[test]
    fn intro_eases_to_full() {
        let mut c = chart();
        assert_eq!(c.progress(), 0.0);
        c.advance(0.5);
        assert!((c.progress() - 0.9375).abs() < 1e-12);
        c.advance(1.0);
        assert_eq!(c.progress(), 1.0);
        let mut rec = Recorder::default();
        c.render(&mut rec);
        assert_eq!(rec.count(|op| matches!(op, Op::Sector { .. })), 6);
        assert_eq!(rec.count(|op| matches!(op, Op::Text { .. })), 6);
    }

    #[test]
    fn palette_alternates_alpha() {
        assert_eq!(segment_colors(0).0, CYAN.alpha(0.8));
        assert_eq!(segment_colors(4).0, MAGENTA.alpha(0.6));
        assert_eq!(segment_colors(4).1, MAGENTA.alpha(1.0));
    }
}
