//! Decorative effects for a single-page portfolio site: WebGL scenes,
//! canvas backgrounds and small interactive widgets.
//!
//! Everything outside `wasm` is plain state that advances by `dt` and draws
//! through a seam, so it builds and tests on the host.

pub mod color;
pub mod config;
pub mod fx2d;
pub mod geom;
pub mod paint;
pub mod scene;
pub mod widgets;

// Only compile browser bindings when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod dom;
    mod frame;
    mod page;
    mod render;
    mod widgets;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger unavailable: {err}").into());
        }
        page::start()
    }
}
