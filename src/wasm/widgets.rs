//! Binds the widget state machines to their elements.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Reflect};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollToOptions,
};

use super::page::ids;
use super::{dom, frame};
use crate::config::FxConfig;
use crate::widgets::controls::{is_current, submit_contact, PreloaderState};
use crate::widgets::counter::parse_target;
use crate::widgets::modal::background_url;
use crate::widgets::reveal::start_line_margin;
use crate::widgets::tilt::{Rect, TiltPose};
use crate::widgets::{
    terminal, BackToTop, Carousel, Counter, CursorTrail, Modal, ModalClick, ModalContent, Parallax,
    Preloader, RevealRule, TiltOptions, TypedText,
};

fn set_style(el: &HtmlElement, name: &str, value: &str) -> Result<(), JsValue> {
    el.style().set_property(name, value)
}

/// `set_style` from inside a handler, where the only thing to do with a
/// failure is log it.
fn restyle(el: &HtmlElement, name: &str, value: &str) {
    if let Err(err) = set_style(el, name, value) {
        log::warn!("setting {name} failed: {err:?}");
    }
}

/// Watches `targets` against a viewport whose bottom edge sits at `start` of
/// its height. The handler gets the index of the reporting target.
fn observe<F>(targets: &[Element], start: f64, mut on_entry: F) -> Result<(), JsValue>
where
    F: FnMut(&IntersectionObserver, usize, &IntersectionObserverEntry) + 'static,
{
    let watched = targets.to_vec();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            if let Some(i) = watched.iter().position(|el| *el == target) {
                on_entry(&observer, i, &entry);
            }
        }
    });
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&start_line_margin(start));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    for el in targets {
        observer.observe(el);
    }
    Ok(())
}

pub fn typed_text(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id(ids::TYPED_TEXT) else {
        return Ok(());
    };
    let Some(mut typed) = TypedText::new(cfg.typed.clone()) else {
        return Ok(());
    };
    el.set_text_content(Some(""));
    frame::animate(move |dt| {
        if typed.advance(dt) {
            el.set_text_content(Some(typed.text()));
        }
        true
    })
}

pub fn counters(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let elements = dom::query_all(doc, ids::COUNTERS)?;
    if elements.is_empty() {
        return Ok(());
    }
    let counters: Vec<Counter> = elements
        .iter()
        .map(|el| Counter::new(parse_target(el.get_attribute("data-target").as_deref()), &cfg.counters))
        .collect();
    let counters = Rc::new(RefCell::new(counters));

    {
        let counters = counters.clone();
        let targets = elements.clone();
        observe(&elements, cfg.counters.start_line, move |observer, i, entry| {
            if entry.is_intersecting() {
                counters.borrow_mut()[i].trigger();
                observer.unobserve(&targets[i]);
            }
        })?;
    }

    let mut shown: Vec<Option<u64>> = vec![None; elements.len()];
    frame::animate(move |dt| {
        let mut counters = counters.borrow_mut();
        for ((counter, el), last) in counters.iter_mut().zip(&elements).zip(&mut shown) {
            counter.advance(dt);
            let value = counter.value();
            if *last != Some(value) {
                el.set_text_content(Some(value.to_string().as_str()));
                *last = Some(value);
            }
        }
        // Untriggered counters keep the loop alive.
        !counters.iter().all(Counter::is_done)
    })
}

pub fn carousel(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let slides = dom::query_all(doc, ids::SLIDES)?;
    let Some(mut carousel) = Carousel::new(slides.len(), &cfg.carousel) else {
        return Ok(());
    };
    for (i, slide) in slides.iter().enumerate() {
        slide.class_list().toggle_with_force("active", carousel.is_active(i))?;
    }
    frame::animate(move |dt| {
        if let Some((prev, next)) = carousel.advance(dt) {
            let swap = slides[prev]
                .class_list()
                .remove_1("active")
                .and_then(|()| slides[next].class_list().add_1("active"));
            if let Err(err) = swap {
                log::warn!("carousel update failed: {err:?}");
            }
        }
        true
    })
}

pub fn terminal_prompt(doc: &Document) -> Result<(), JsValue> {
    let (Some(input), Some(output)) = (
        dom::by_id::<HtmlInputElement>(doc, ids::TERMINAL_INPUT),
        doc.get_element_by_id(ids::TERMINAL_OUTPUT),
    ) else {
        return Ok(());
    };
    let doc = doc.clone();
    let field = input.clone();
    dom::listen(&input, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
        if key.key() != "Enter" {
            return;
        }
        let Some(lines) = terminal::submit(&field.value()) else { return };
        for text in &lines {
            match doc.create_element("div") {
                Ok(line) => {
                    line.set_text_content(Some(text.as_str()));
                    if let Err(err) = output.append_child(&line) {
                        log::warn!("terminal output failed: {err:?}");
                    }
                }
                Err(err) => log::warn!("terminal output failed: {err:?}"),
            }
        }
        output.set_scroll_top(output.scroll_height());
        field.set_value("");
    })
}

fn modal_content(item: &Element) -> ModalContent {
    let text = |selector: &str| {
        item.query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    };
    let image_url = item
        .query_selector(".item-image")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .and_then(|el| el.style().get_property_value("background-image").ok())
        .map(|css| background_url(&css))
        .unwrap_or_default();
    ModalContent {
        title: text("h3"),
        description: text("p"),
        image_url,
    }
}

pub fn portfolio_modal(doc: &Document) -> Result<(), JsValue> {
    let Some(modal_el) = doc.get_element_by_id(ids::MODAL) else {
        return Ok(());
    };
    let title = doc.get_element_by_id(ids::MODAL_TITLE);
    let description = doc.get_element_by_id(ids::MODAL_DESCRIPTION);
    let image = dom::by_id::<HtmlImageElement>(doc, ids::MODAL_IMAGE);
    let modal = Rc::new(RefCell::new(Modal::default()));

    for item in dom::query_all(doc, ids::PORTFOLIO_ITEMS)? {
        let modal = modal.clone();
        let modal_el = modal_el.clone();
        let (title, description, image) = (title.clone(), description.clone(), image.clone());
        let card = item.clone();
        dom::listen(&item, "click", move |_| {
            let content = modal_content(&card);
            if let Some(el) = &title {
                el.set_text_content(Some(content.title.as_str()));
            }
            if let Some(el) = &description {
                el.set_text_content(Some(content.description.as_str()));
            }
            if let Some(el) = &image {
                el.set_src(&content.image_url);
            }
            modal.borrow_mut().open(content);
            if let Err(err) = modal_el.class_list().add_1("active") {
                log::warn!("modal open failed: {err:?}");
            }
        })?;
    }

    let close = {
        let modal_el = modal_el.clone();
        move |modal: &RefCell<Modal>, at: ModalClick| {
            if modal.borrow_mut().click(at) {
                if let Err(err) = modal_el.class_list().remove_1("active") {
                    log::warn!("modal close failed: {err:?}");
                }
            }
        }
    };
    if let Some(button) = modal_el.query_selector(".modal-close")? {
        let modal = modal.clone();
        let close = close.clone();
        dom::listen(&button, "click", move |_| close(&*modal, ModalClick::CloseButton))?;
    }
    let backdrop = modal_el.clone();
    dom::listen(&modal_el, "click", move |event| {
        let on_backdrop = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|t| t == backdrop);
        let at = if on_backdrop { ModalClick::Backdrop } else { ModalClick::Content };
        close(&*modal, at);
    })
}

pub fn contact_form(doc: &Document) -> Result<(), JsValue> {
    let Some(form) = dom::by_id::<HtmlFormElement>(doc, ids::CONTACT_FORM) else {
        return Ok(());
    };
    let response = doc.get_element_by_id(ids::FORM_RESPONSE);
    let target = form.clone();
    dom::listen(&form, "submit", move |event| {
        event.prevent_default();
        let message = submit_contact();
        if let Some(el) = &response {
            el.set_text_content(Some(message));
        }
        target.reset();
    })
}

pub fn back_to_top(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let Some(button) = doc.get_element_by_id(ids::BACK_TO_TOP) else {
        return Ok(());
    };
    let window = dom::window()?;
    let mut state = BackToTop::new(&cfg.back_to_top);
    if let Some(visible) = state.scrolled(window.scroll_y()?) {
        button.class_list().toggle_with_force("show", visible)?;
    }

    {
        let win = window.clone();
        let button = button.clone();
        dom::listen(&window, "scroll", move |_| {
            let Ok(y) = win.scroll_y() else { return };
            if let Some(visible) = state.scrolled(y) {
                if let Err(err) = button.class_list().toggle_with_force("show", visible) {
                    log::warn!("back-to-top update failed: {err:?}");
                }
            }
        })?;
    }
    dom::listen(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    })
}

pub fn parallax(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let layers = dom::query_all_as::<HtmlElement>(doc, ids::PARALLAX)?;
    if layers.is_empty() {
        return Ok(());
    }
    let window = dom::window()?;
    let Some(parallax) = Parallax::new(cfg.parallax.clone(), dom::viewport(&window).width) else {
        log::debug!("viewport too narrow for parallax");
        return Ok(());
    };
    let parallax = Rc::new(RefCell::new(parallax));
    {
        let parallax = parallax.clone();
        let win = window.clone();
        dom::listen(&window, "mousemove", move |event| {
            if let Some(at) = dom::pointer_ratio(&win, &event) {
                parallax.borrow_mut().pointer(at);
            }
        })?;
    }
    frame::animate(move |dt| {
        let mut parallax = parallax.borrow_mut();
        parallax.advance(dt);
        let position = parallax.background_position();
        for layer in &layers {
            restyle(layer, "background-position", &position);
        }
        true
    })
}

pub fn cursor_trail(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let window = dom::window()?;
    if !cfg.trail.enabled || Reflect::has(&window, &"ontouchstart".into())? {
        return Ok(());
    }
    let Some(body) = doc.body() else {
        return Ok(());
    };
    let trail = Rc::new(RefCell::new(CursorTrail::new(cfg.trail.clone(), StdRng::from_os_rng())));
    let markers: Rc<RefCell<HashMap<u64, Element>>> = Rc::default();

    {
        let trail = trail.clone();
        let markers = markers.clone();
        let owner = doc.clone();
        dom::listen(doc, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else { return };
            let marker = trail
                .borrow_mut()
                .spawn(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let Ok(el) = owner.create_element("span") else { return };
            el.set_class_name("cursor-trail");
            let Ok(el) = el.dyn_into::<HtmlElement>() else { return };
            let size = format!("{}px", marker.size);
            let styled = set_style(&el, "width", &size)
                .and_then(|()| set_style(&el, "height", &size))
                .and_then(|()| set_style(&el, "left", &format!("{}px", marker.x)))
                .and_then(|()| set_style(&el, "top", &format!("{}px", marker.y)))
                .and_then(|()| set_style(&el, "background-color", &marker.color.to_string()))
                .and_then(|()| body.append_child(&el).map(drop));
            match styled {
                Ok(()) => {
                    markers.borrow_mut().insert(marker.id, el.into());
                }
                Err(err) => log::warn!("cursor trail marker failed: {err:?}"),
            }
        })?;
    }

    frame::animate(move |dt| {
        let expired = trail.borrow_mut().advance(dt);
        let mut markers = markers.borrow_mut();
        for id in expired {
            if let Some(el) = markers.remove(&id) {
                el.remove();
            }
        }
        true
    })
}

fn tilt_card(card: HtmlElement, options: TiltOptions, doc: &Document) -> Result<(), JsValue> {
    set_style(&card, "transition", &options.transition())?;
    set_style(&card, "transform-style", "preserve-3d")?;
    let glare = if options.glare {
        let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
        el.set_class_name("tilt-glare");
        set_style(&el, "opacity", "0")?;
        card.append_child(&el)?;
        Some(el)
    } else {
        None
    };
    let options = Rc::new(options);

    {
        let options = options.clone();
        let glare = glare.clone();
        let target = card.clone();
        dom::listen(&card, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else { return };
            let bounds = target.get_bounding_client_rect();
            let rect = Rect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            let pose = options.pose(rect, f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            restyle(&target, "transform", &options.transform(&pose));
            if let Some(glare) = &glare {
                let gradient = format!(
                    "linear-gradient({:.1}deg, rgba(255, 255, 255, 1) 0%, rgba(255, 255, 255, 0) 80%)",
                    pose.glare_angle
                );
                restyle(glare, "background", &gradient);
                restyle(glare, "opacity", &pose.glare_opacity.to_string());
            }
        })?;
    }
    let target = card.clone();
    dom::listen(&card, "mouseleave", move |_| {
        restyle(&target, "transform", &options.transform(&TiltPose::default()));
        if let Some(glare) = &glare {
            restyle(glare, "opacity", "0");
        }
    })
}

pub fn tilt(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    for card in dom::query_all_as::<HtmlElement>(doc, ids::TILT)? {
        tilt_card(card, cfg.tilt.clone(), doc)?;
    }
    Ok(())
}

fn reveal_rule(doc: &Document, rule: RevealRule) -> Result<(), JsValue> {
    let targets = dom::query_all(doc, &rule.selector)?;
    let styled: Vec<HtmlElement> = targets
        .iter()
        .filter_map(|el| el.clone().dyn_into::<HtmlElement>().ok())
        .collect();
    if styled.len() != targets.len() || targets.is_empty() {
        return Ok(());
    }
    for (i, el) in styled.iter().enumerate() {
        set_style(el, "opacity", "0")?;
        set_style(el, "transform", &rule.hidden_transform(i))?;
        set_style(el, "transition", &rule.transition())?;
    }

    let window = dom::window()?;
    let mut shown = vec![false; targets.len()];
    let start = rule.start;
    observe(&targets, start, move |observer, i, entry| {
        let line = entry
            .root_bounds()
            .map(|root| root.bottom())
            .unwrap_or_else(|| dom::viewport(&window).height * rule.start);
        let below = entry.bounding_client_rect().top() >= line;
        let visible = rule.next_visible(shown[i], entry.is_intersecting(), below);
        if visible == shown[i] {
            return;
        }
        shown[i] = visible;
        let el = &styled[i];
        // Shown elements drop the inline overrides and fall back to the stylesheet.
        let applied = if visible {
            el.style()
                .remove_property("opacity")
                .and_then(|_| el.style().remove_property("transform"))
                .map(drop)
        } else {
            set_style(el, "opacity", "0").and_then(|()| set_style(el, "transform", &rule.hidden_transform(i)))
        };
        if let Err(err) = applied {
            log::warn!("reveal of {} failed: {err:?}", rule.selector);
        }
        if visible && !rule.reverse {
            observer.unobserve(el);
        }
    })
}

pub fn scroll_reveal(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    for rule in &cfg.reveal {
        reveal_rule(doc, rule.clone())?;
    }
    Ok(())
}

pub fn preloader(doc: &Document, cfg: &FxConfig) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id(ids::PRELOADER) else {
        return Ok(());
    };
    let preloader = Rc::new(RefCell::new(Preloader::new(&cfg.preloader)));
    let fade = {
        let preloader = preloader.clone();
        let el = el.clone();
        move || {
            preloader.borrow_mut().loaded();
            if let Err(err) = el.class_list().add_1("loaded") {
                log::warn!("preloader fade failed: {err:?}");
            }
        }
    };
    if doc.ready_state() == "complete" {
        fade();
    } else {
        let mut fade = Some(fade);
        dom::listen(&dom::window()?, "load", move |_| {
            if let Some(fade) = fade.take() {
                fade();
            }
        })?;
    }
    frame::animate(move |dt| {
        let mut preloader = preloader.borrow_mut();
        if preloader.advance(dt) {
            el.remove();
        }
        preloader.state() != PreloaderState::Removed
    })
}

pub fn nav_highlight(doc: &Document) -> Result<(), JsValue> {
    let pathname = dom::window()?.location().pathname()?;
    for link in dom::query_all(doc, ids::NAV_LINKS)? {
        let current = is_current(link.get_attribute("href").as_deref(), &pathname);
        link.class_list().toggle_with_force("active", current)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn restyle_applies_and_tolerates_bad_values() {
        let doc = dom::document().unwrap();
        let el: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
        restyle(&el, "opacity", "0.5");
        assert_eq!(el.style().get_property_value("opacity").unwrap(), "0.5");
        // An invalid value is dropped by the browser; the previous one stays.
        restyle(&el, "opacity", "not a number");
        assert_eq!(el.style().get_property_value("opacity").unwrap(), "0.5");
    }
}
