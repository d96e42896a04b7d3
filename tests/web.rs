#![cfg(target_arch = "wasm32")]

use neon_fx::config::FxConfig;
use neon_fx::fx2d::{NetworkOptions, ParticleNetwork};
use neon_fx::geom::Size;
use neon_fx::widgets::counter::parse_target;
use neon_fx::widgets::modal::background_url;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn os_rng_seeds_effects_in_the_browser() {
    let network = ParticleNetwork::new(NetworkOptions::default(), Size::new(800.0, 600.0), StdRng::from_os_rng());
    assert_eq!(network.particles().len(), 60);
}

#[wasm_bindgen_test]
fn canvas_offers_a_2d_context() {
    let canvas = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    assert!(canvas.get_context("2d").unwrap().is_some());
}

#[wasm_bindgen_test]
fn counter_target_reads_from_markup() {
    let el = document().create_element("span").unwrap();
    el.set_attribute("data-target", "250").unwrap();
    assert_eq!(parse_target(el.get_attribute("data-target").as_deref()), 250);
    assert_eq!(parse_target(el.get_attribute("data-missing").as_deref()), 0);
}

#[wasm_bindgen_test]
fn background_image_round_trips_through_inline_style() {
    let el = document()
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    el.style().set_property("background-image", "url('img/city.jpg')").unwrap();
    let css = el.style().get_property_value("background-image").unwrap();
    assert_eq!(background_url(&css), "img/city.jpg");
}

#[wasm_bindgen_test]
fn inline_config_parses() {
    let cfg = FxConfig::from_json(r#"{ "carousel": { "interval_ms": 3000 } }"#).unwrap();
    assert_eq!(cfg.carousel.interval_ms, 3000);
}
