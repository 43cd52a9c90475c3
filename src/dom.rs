use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, NodeList};

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn query<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

pub(crate) fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub(crate) fn document_query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

pub(crate) fn document_query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|document| document.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

pub(crate) fn read_count(id: &str) -> Option<usize> {
    element_by_id::<HtmlInputElement>(id)?.value().trim().parse().ok()
}

/// Console text for a rejected promise or thrown value: an `Error`'s
/// message, a thrown string, or the value's JSON.
pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    error
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(&error)
                .ok()
                .and_then(|json| json.as_string())
        })
        .unwrap_or_else(|| format!("{error:?}"))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[cfg(test)]
pub(crate) struct Fixture {
    pub(crate) root: Element,
}

#[cfg(test)]
impl Fixture {
    pub(crate) fn mount(html: &str) -> Self {
        let document = document().expect("document");
        let root = document.create_element("div").expect("fixture root");
        root.set_inner_html(html);
        document
            .body()
            .expect("body")
            .append_child(&root)
            .expect("mount fixture");
        Self { root }
    }
}

#[cfg(test)]
impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}
