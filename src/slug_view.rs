use catalog_forms_core::autofill_slug;
use gloo::events::EventListener;
use web_sys::HtmlInputElement;

use crate::dom;
use crate::page::PageConfig;
use crate::page_runtime;

pub(crate) fn attach(config: &PageConfig) {
    let Some(name) = dom::element_by_id::<HtmlInputElement>(&config.name_input) else {
        return;
    };
    let Some(slug) = dom::element_by_id::<HtmlInputElement>(&config.slug_input) else {
        return;
    };
    let source = name.clone();
    let listener = EventListener::new(&name, "blur", move |_event| {
        if let Some(value) = autofill_slug(&slug.value(), &source.value()) {
            slug.set_value(value.as_str());
        }
    });
    page_runtime::keep_listener(listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Fixture;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    fn blur_name(name: &str, slug: &str) -> String {
        let _fixture = Fixture::mount(&format!(
            r#"<input id="id_name" type="text" value="{name}"><input id="id_slug" type="text" value="{slug}">"#
        ));
        attach(&PageConfig::default());
        let name_input = dom::element_by_id::<HtmlInputElement>("id_name").unwrap();
        name_input.dispatch_event(&Event::new("blur").unwrap()).unwrap();
        dom::element_by_id::<HtmlInputElement>("id_slug").unwrap().value()
    }

    #[wasm_bindgen_test]
    fn blur_fills_empty_slug() {
        assert_eq!(blur_name("Red Leather Jacket", ""), "red-leather-jacket");
    }

    #[wasm_bindgen_test]
    fn blur_leaves_slug_empty_without_usable_name() {
        assert_eq!(blur_name("!!!", ""), "");
    }

    #[wasm_bindgen_test]
    fn blur_keeps_manual_slug() {
        assert_eq!(blur_name("Anything", "x"), "x");
    }
}
