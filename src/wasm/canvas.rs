//! Canvas 2D backend: `Painter` over a `CanvasRenderingContext2d` and the
//! mount routine that keeps a 2D effect alive on its canvas.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::{dom, frame};
use crate::color::Rgba;
use crate::fx2d::Effect2d;
use crate::geom::Size;
use crate::paint::Painter;

struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    fn stroke(&self, color: Rgba, width: f64) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self) {
        let (w, h) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(x, y, w, h);
    }

    fn circle(&mut self, x: f64, y: f64, r: f64, fill: Rgba, stroke: Option<(Rgba, f64)>) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, r.max(0.0), 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&fill.css());
        self.ctx.fill();
        if let Some((color, width)) = stroke {
            self.stroke(color, width);
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.stroke(color, width);
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: Rgba, width: f64) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.stroke(color, width);
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: Rgba, font_px: f64) {
        self.ctx.set_font(&format!("{font_px}px monospace"));
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.css());
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn sector(&mut self, center: (f64, f64), inner: f64, outer: f64, angles: (f64, f64), fill: Rgba, stroke: Option<(Rgba, f64)>) {
        let (cx, cy) = center;
        let (start, end) = angles;
        self.ctx.begin_path();
        if self.ctx.arc(cx, cy, outer.max(0.0), start, end).is_err()
            || self.ctx.arc_with_anticlockwise(cx, cy, inner.max(0.0), end, start, true).is_err()
        {
            return;
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&fill.css());
        self.ctx.fill();
        if let Some((color, width)) = stroke {
            self.stroke(color, width);
        }
    }
}

/// Matches the canvas backing store to its laid-out size.
fn fit(canvas: &HtmlCanvasElement) -> Size {
    let size = dom::rect_size(canvas);
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);
    size
}

/// Builds an effect for `canvas` and drives it until the page goes away.
/// A canvas without a 2D context is skipped.
pub fn mount<E, F>(canvas: HtmlCanvasElement, build: F) -> Result<(), JsValue>
where
    E: Effect2d + 'static,
    F: FnOnce(Size) -> E,
{
    let Some(ctx) = canvas
        .get_context("2d")?
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        log::warn!("no 2D context for #{}, effect skipped", canvas.id());
        return Ok(());
    };

    let effect = Rc::new(RefCell::new(build(fit(&canvas))));
    let window = dom::window()?;

    {
        let effect = effect.clone();
        let canvas = canvas.clone();
        dom::listen(&window, "resize", move |_| {
            effect.borrow_mut().resize(fit(&canvas));
        })?;
    }
    {
        let effect = effect.clone();
        let win = window.clone();
        dom::listen(&window, "mousemove", move |event| {
            if let Some(at) = dom::pointer_ratio(&win, &event) {
                effect.borrow_mut().pointer(at);
            }
        })?;
    }
    {
        let effect = effect.clone();
        dom::listen(&canvas, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                effect.borrow_mut().hover(f64::from(mouse.offset_x()), f64::from(mouse.offset_y()));
            }
        })?;
    }

    log::info!("2D effect started on #{}", canvas.id());
    let mut painter = CanvasPainter { canvas, ctx };
    frame::animate(move |dt| {
        let mut effect = effect.borrow_mut();
        effect.advance(dt);
        effect.render(&mut painter);
        true
    })
}
