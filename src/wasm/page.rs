//! Page wiring: which effect goes on which element.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlCanvasElement};

use super::{canvas, dom, render, widgets};
use crate::config::{FxConfig, HeroKind};
use crate::fx2d::{DigitalRain, DoughnutChart, FloatingShapes, ParticleNetwork, WaveBackground};
use crate::scene::{GridScene, OrbitScene, SpiralOptions, SpiralScene, StarField};

pub mod ids {
    pub const CONFIG: &str = "fx-config";

    pub const HERO: &str = "hero-canvas";
    pub const CONTACT_SCENE: &str = "contact-background";
    pub const SECTION_SPIRALS: [&str; 2] = ["skills-background", "portfolio-background"];
    pub const STARS: &str = ".stars-canvas";
    pub const FEATURED_GRID: &str = "featured-canvas";

    pub const NETWORKS: [&str; 4] = ["services-network", "stats-network", "terminal-background", "skills-chart-bg"];
    pub const SHAPES: &str = "floating-shapes";
    pub const WAVES: &str = "form-wave";
    pub const RAIN: &str = "matrix-rain";
    pub const CHART: &str = "skills-chart-canvas";

    pub const TYPED_TEXT: &str = "typed-text";
    pub const COUNTERS: &str = ".stat-item .count";
    pub const SLIDES: &str = ".testimonial-slide";
    pub const TERMINAL_INPUT: &str = "terminal-input-field";
    pub const TERMINAL_OUTPUT: &str = "terminal-output";
    pub const MODAL: &str = "portfolio-modal";
    pub const MODAL_TITLE: &str = "modal-title";
    pub const MODAL_IMAGE: &str = "modal-image";
    pub const MODAL_DESCRIPTION: &str = "modal-description";
    pub const PORTFOLIO_ITEMS: &str = ".portfolio-item";
    pub const CONTACT_FORM: &str = "contact-form";
    pub const FORM_RESPONSE: &str = "form-response";
    pub const BACK_TO_TOP: &str = "back-to-top";
    pub const PARALLAX: &str = ".parallax-bg";
    pub const TILT: &str = "[data-tilt]";
    pub const PRELOADER: &str = "preloader";
    pub const NAV_LINKS: &str = ".nav a";
}

type Init = fn(&Document, &FxConfig) -> Result<(), JsValue>;

/// Reads the inline JSON config. Absent means defaults; so does malformed,
/// with a warning.
fn load_config(doc: &Document) -> FxConfig {
    let Some(json) = doc.get_element_by_id(ids::CONFIG).and_then(|el| el.text_content()) else {
        return FxConfig::default();
    };
    FxConfig::from_json(&json).unwrap_or_else(|err| {
        log::warn!("{err}; using defaults");
        FxConfig::default()
    })
}

fn spiral(doc: &Document, id: &str, options: &SpiralOptions) -> Result<(), JsValue> {
    let Some(surface) = dom::by_id::<HtmlCanvasElement>(doc, id) else {
        return Ok(());
    };
    let options = options.clone();
    render::mount(surface, |size| SpiralScene::new(options, size, &mut StdRng::from_os_rng()))
}

fn hero(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    match cfg.hero.kind {
        HeroKind::Spiral => spiral(doc, ids::HERO, &cfg.hero.spiral),
        HeroKind::Orbit => {
            let Some(surface) = dom::by_id::<HtmlCanvasElement>(doc, ids::HERO) else {
                return Ok(());
            };
            let options = cfg.hero.orbit.clone();
            render::mount(surface, |size| OrbitScene::new(options, size, &mut StdRng::from_os_rng()))
        }
    }
}

/// Logs a failed mount so the rest of the page still starts.
fn report(what: &str, result: Result<(), JsValue>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::error!("{what} failed to start: {err:?}");
            false
        }
    }
}

/// Mounts every item of a group; one failure does not stop its siblings.
/// Returns how many failed.
fn mount_each<T>(
    what: &str,
    items: impl IntoIterator<Item = T>,
    mut mount: impl FnMut(T) -> Result<(), JsValue>,
) -> usize {
    items.into_iter().map(|item| report(what, mount(item))).filter(|started| !started).count()
}

fn section_scenes(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let spirals = [(ids::CONTACT_SCENE, &cfg.contact_scene)]
        .into_iter()
        .chain(ids::SECTION_SPIRALS.map(|id| (id, &cfg.section_spiral)));
    mount_each("section scene", spirals, |(id, options)| spiral(doc, id, options));
    Ok(())
}

fn star_fields(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let surfaces = dom::query_all_as::<HtmlCanvasElement>(doc, ids::STARS)?;
    mount_each("star field", surfaces, |surface| {
        let options = cfg.stars.clone();
        render::mount(surface, |size| StarField::new(options, size, &mut StdRng::from_os_rng()))
    });
    Ok(())
}

fn featured_grid(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let Some(surface) = dom::by_id::<HtmlCanvasElement>(doc, ids::FEATURED_GRID) else {
        return Ok(());
    };
    let options = cfg.grid.clone();
    render::mount(surface, |size| GridScene::new(options, size, &mut StdRng::from_os_rng()))
}

fn networks(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let surfaces = ids::NETWORKS
        .into_iter()
        .filter_map(|id| dom::by_id::<HtmlCanvasElement>(doc, id));
    mount_each("particle network", surfaces, |surface| {
        let options = cfg.network.clone();
        canvas::mount(surface, |size| ParticleNetwork::new(options, size, StdRng::from_os_rng()))
    });
    Ok(())
}

fn flat_effects(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let surface = |id: &str| dom::by_id::<HtmlCanvasElement>(doc, id);
    if let Some(el) = surface(ids::SHAPES) {
        let options = cfg.shapes.clone();
        report(
            ids::SHAPES,
            canvas::mount(el, |size| FloatingShapes::new(options, size, StdRng::from_os_rng())),
        );
    }
    if let Some(el) = surface(ids::WAVES) {
        let options = cfg.waves.clone();
        report(
            ids::WAVES,
            canvas::mount(el, |size| WaveBackground::new(options, size, StdRng::from_os_rng())),
        );
    }
    if let Some(el) = surface(ids::RAIN) {
        let options = cfg.rain.clone();
        report(
            ids::RAIN,
            canvas::mount(el, |size| DigitalRain::new(options, size, StdRng::from_os_rng())),
        );
    }
    if let Some(el) = surface(ids::CHART) {
        let options = cfg.chart.clone();
        report(ids::CHART, canvas::mount(el, |size| DoughnutChart::new(options, size)));
    }
    Ok(())
}

/// Starts every effect whose element is on the page. A failing initializer
/// is logged and the rest still run.
pub fn start() -> Result<(), JsValue> {
    let doc = dom::document()?;
    let cfg = load_config(&doc);

    let inits: [(&str, Init); 19] = [
        ("preloader", widgets::preloader),
        ("nav highlight", |doc, _| widgets::nav_highlight(doc)),
        ("hero", hero),
        ("section scenes", section_scenes),
        ("star fields", star_fields),
        ("featured grid", featured_grid),
        ("particle networks", networks),
        ("canvas effects", flat_effects),
        ("typed text", widgets::typed_text),
        ("counters", widgets::counters),
        ("carousel", widgets::carousel),
        ("terminal", |doc, _| widgets::terminal_prompt(doc)),
        ("portfolio modal", |doc, _| widgets::portfolio_modal(doc)),
        ("contact form", |doc, _| widgets::contact_form(doc)),
        ("back to top", widgets::back_to_top),
        ("parallax", widgets::parallax),
        ("cursor trail", widgets::cursor_trail),
        ("tilt", widgets::tilt),
        ("scroll reveal", widgets::scroll_reveal),
    ];
    mount_each("initializer", inits, |(name, init)| {
        init(&doc, &cfg).map_err(|err| JsValue::from_str(&format!("{name}: {err:?}")))
    });
    log::info!("page effects ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn failed_mount_does_not_skip_siblings() {
        let mut started = Vec::new();
        let failed = mount_each("canvas", ["a", "b", "c"], |id| {
            started.push(id);
            if id == "a" {
                Err(JsValue::from_str("no context"))
            } else {
                Ok(())
            }
        });
        assert_eq!(started, ["a", "b", "c"]);
        assert_eq!(failed, 1);
    }
}
