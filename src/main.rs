mod cascade_view;
mod dom;
mod file_reader;
mod image_forms;
mod image_swap;
mod page;
mod page_runtime;
mod slug_view;

use gloo::events::EventListener;

fn main() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", |_event| attach_page());
        page_runtime::keep_listener(listener);
    } else {
        attach_page();
    }
}

fn attach_page() {
    if page_runtime::mark_attached() {
        return;
    }
    page::set_page_config(page::load_page_config());
    let config = page::page_config();
    cascade_view::attach(&config);
    slug_view::attach(&config);
    image_forms::attach(&config);
    image_swap::export_global();
}
