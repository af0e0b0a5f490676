use log::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, HtmlElement};
use yew::prelude::*;

/// Rendered width in pixels of the element behind `node_ref`.
///
/// Measured on mount and again whenever `value` changes, so a track that
/// was resized after mount is picked up on the next slider movement.
/// Reads 0.0 before the element is mounted.
#[hook]
pub fn use_element_width(node_ref: NodeRef, value: f64) -> f64 {
    let width = use_state_eq(|| 0.0_f64);

    {
        let width = width.clone();
        use_effect_with((node_ref, value.to_bits()), move |(node_ref, _)| {
            if let Some(element) = node_ref.cast::<HtmlElement>() {
                width.set(f64::from(element.offset_width()));
            }
            || ()
        });
    }

    *width
}

/// Emits `onclick` for every click that bubbles up to the document.
///
/// Handlers that call `stop_propagation` keep their clicks from arriving.
/// The listener is registered once on mount with the callback given then,
/// and removed on unmount.
#[hook]
pub fn use_document_click(onclick: Callback<()>) {
    use_effect_with((), move |_| {
        let listener = Closure::<dyn Fn(Event)>::new(move |_: Event| onclick.emit(()));
        let document = gloo_utils::document();
        if let Err(err) =
            document.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        {
            warn!("Could not listen for page clicks: {:?}", err);
        }

        move || {
            if let Err(err) = document
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            {
                warn!("Could not remove page click listener: {:?}", err);
            }
        }
    });
}
