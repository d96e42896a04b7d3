//! Document lookups and listener plumbing shared by the initializers.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, MouseEvent, NodeList, Window};

use crate::geom::{PointerRatio, Size};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| JsValue::from_str("no document"))
}

/// Element with `id` as `T`; absent or differently typed elements are `None`.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(doc.query_selector_all(selector)?))
}

/// Every match cast to `T`, skipping the ones that are not.
pub fn query_all_as<T: JsCast>(doc: &Document, selector: &str) -> Result<Vec<T>, JsValue> {
    Ok(query_all(doc, selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<T>().ok())
        .collect())
}

/// Registers `handler` for the page lifetime.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn viewport(window: &Window) -> Size {
    let extent = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(extent(window.inner_width()), extent(window.inner_height()))
}

pub fn pointer_ratio(window: &Window, event: &Event) -> Option<PointerRatio> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerRatio::from_client(
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
        viewport(window),
    ))
}

/// Size of an element's box in CSS pixels.
pub fn rect_size(el: &Element) -> Size {
    let rect = el.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}
