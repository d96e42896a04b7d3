use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use super::dom;

/// Longest step handed to an effect; a tab coming back from the background
/// resumes instead of jumping.
const MAX_DT: f64 = 0.1;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Calls `tick(dt)` on every animation frame until it returns `false`.
pub fn animate(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<(), JsValue> {
    // The closure reschedules itself, so it has to be reachable from inside.
    // Storing it in an `Option` lets us create it first and fill the slot after.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut last: Option<f64> = None;
    *g.borrow_mut() = Some(Closure::new(move |now: f64| {
        let dt = last.map_or(0.0, |prev| ((now - prev) / 1000.0).clamp(0.0, MAX_DT));
        last = Some(now);
        if !tick(dt) {
            return;
        }

        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = request(callback) {
                log::warn!("animation loop stopped: {err:?}");
            }
        }
    }));

    if let Some(callback) = g.borrow().as_ref() {
        request(callback)?;
    }
    Ok(())
}
