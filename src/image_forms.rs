use std::cell::RefCell;
use std::rc::Rc;

use catalog_forms_core::{
    FormsetError, ImageFormset, PreviewTracker, DELETE_FIELD, FEATURED_FIELD, MAX_NUM_FORMS,
    TOTAL_FORMS,
};
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, EventTarget, HtmlElement, HtmlImageElement, HtmlInputElement, Node};

use crate::dom;
use crate::file_reader;
use crate::page::PageConfig;
use crate::page_runtime;

const FILE_INPUT_SELECTOR: &str = "input[type=\"file\"]";
const TEXT_INPUT_SELECTOR: &str = "input[type=\"text\"]";
const CHECKBOX_SELECTOR: &str = "input[type=\"checkbox\"]";
const REINDEXED_SELECTOR: &str = "[name], [id], [for]";
const REINDEXED_ATTRS: &[&str] = &["name", "id", "for"];

const PREVIEW_SELECTOR: &str = "img";
const PREVIEW_CLASS: &str = "mx-auto h-32 w-auto object-contain";
const PREVIEW_ALT: &str = "Preview";
const DROP_ZONE_SELECTOR: &str = ".space-y-1";
const HELPER_TEXT_SELECTOR: &str = ":scope > .flex.text-sm";
const PLACEHOLDER_SELECTOR: &str = "svg";

struct ImageForms {
    formset: RefCell<ImageFormset>,
    previews: RefCell<PreviewTracker>,
    row_selector: String,
    container_id: String,
}

impl ImageForms {
    fn row_index(&self, name: &str) -> Option<usize> {
        self.formset.borrow().row_index(name)
    }

    /// Names of the featured checkboxes to clear after `name` changed.
    ///
    /// `observed` is the checked state of every featured checkbox on the
    /// page, read at the time of the change.
    fn featured_changed(
        &self,
        name: &str,
        checked: bool,
        observed: &[(usize, bool)],
    ) -> Vec<String> {
        let Some(index) = self.row_index(name) else {
            return Vec::new();
        };
        let mut formset = self.formset.borrow_mut();
        formset.sync_featured(observed);
        formset
            .set_featured(index, checked)
            .into_iter()
            .map(|other| formset.field_name(other, FEATURED_FIELD))
            .collect()
    }
}

pub(crate) fn attach(config: &PageConfig) {
    let rows = dom::document_query_all(&config.image_row_selector);
    let add_button = dom::element_by_id::<HtmlElement>(&config.add_image_button);
    if rows.is_empty() && add_button.is_none() {
        return;
    }
    let featured_selector = suffix_selector(FEATURED_FIELD);
    let featured: Vec<bool> = rows
        .iter()
        .map(|row| {
            dom::query::<HtmlInputElement>(row, &featured_selector)
                .map(|input| input.checked())
                .unwrap_or(false)
        })
        .collect();
    let prefix = config.formset_prefix.as_str();
    let total_id = format!("id_{prefix}-{TOTAL_FORMS}");
    let max_id = format!("id_{prefix}-{MAX_NUM_FORMS}");
    let total = dom::read_count(&total_id).unwrap_or(rows.len());
    let max = dom::read_count(&max_id);

    let state = Rc::new(ImageForms {
        formset: RefCell::new(ImageFormset::from_rows(prefix, &featured, total, max)),
        previews: RefCell::new(PreviewTracker::new()),
        row_selector: config.image_row_selector.clone(),
        container_id: config.image_rows_container.clone(),
    });

    for row in &rows {
        bind_preview(&state, row);
    }
    if let Some(button) = add_button {
        let state = state.clone();
        let listener = EventListener::new(&button, "click", move |_event| {
            if let Err(err) = add_row(&state) {
                gloo::console::warn!("failed to add image row", dom::js_err(err));
            }
        });
        page_runtime::keep_listener(listener);
    }
    bind_featured(&state);
}

fn suffix_selector(field: &str) -> String {
    format!("input[name$=\"-{field}\"]")
}

fn bind_preview(state: &Rc<ImageForms>, row: &Element) {
    let Some(input) = dom::query::<HtmlInputElement>(row, FILE_INPUT_SELECTOR) else {
        return;
    };
    let state = state.clone();
    let target = input.clone();
    let listener = EventListener::new(&input, "change", move |_event| {
        start_preview(&state, &target);
    });
    page_runtime::keep_listener(listener);
}

fn start_preview(state: &Rc<ImageForms>, input: &HtmlInputElement) {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };
    let Some(row) = input.closest(&state.row_selector).ok().flatten() else {
        return;
    };
    let ticket = state
        .row_index(&input.name())
        .map(|index| state.previews.borrow_mut().begin(index));
    let state = state.clone();
    spawn_local(async move {
        let data_url = match file_reader::read_as_data_url(&file).await {
            Ok(data_url) => data_url,
            Err(err) => {
                gloo::console::warn!("image preview read failed", dom::js_err(err));
                return;
            }
        };
        if let Some(ticket) = ticket {
            if !state.previews.borrow().accept(&ticket) {
                return;
            }
            state.previews.borrow_mut().forget(ticket.row);
        }
        if let Err(err) = show_preview(&row, &data_url) {
            gloo::console::warn!("image preview failed", dom::js_err(err));
        }
    });
}

fn show_preview(row: &Element, src: &str) -> Result<(), JsValue> {
    if let Some(preview) = dom::query::<HtmlImageElement>(row, PREVIEW_SELECTOR) {
        preview.set_src(src);
        return Ok(());
    }
    let document = dom::document().ok_or_else(|| JsValue::from_str("missing document"))?;
    let image = document
        .create_element("img")?
        .dyn_into::<HtmlImageElement>()
        .map_err(JsValue::from)?;
    image.set_src(src);
    image.set_class_name(PREVIEW_CLASS);
    image.set_alt(PREVIEW_ALT);
    match dom::query::<Element>(row, DROP_ZONE_SELECTOR) {
        Some(zone) => {
            let helper = dom::query::<Node>(&zone, HELPER_TEXT_SELECTOR);
            zone.insert_before(&image, helper.as_ref())?;
        }
        None => {
            row.append_child(&image)?;
        }
    }
    if let Some(placeholder) = dom::query::<Element>(row, PLACEHOLDER_SELECTOR) {
        placeholder.remove();
    }
    Ok(())
}

fn add_row(state: &Rc<ImageForms>) -> Result<(), JsValue> {
    let total_id = state.formset.borrow().management_id(TOTAL_FORMS);
    let Some(total_input) = dom::element_by_id::<HtmlInputElement>(&total_id) else {
        return Ok(());
    };
    let Some(template) = dom::document_query_all(&state.row_selector).into_iter().next() else {
        return Ok(());
    };
    let Ok(total) = total_input.value().trim().parse::<usize>() else {
        gloo::console::warn!("image row not added: unreadable form count", total_input.value());
        return Ok(());
    };
    let planned = state.formset.borrow().plan_row(total);
    let index = match planned {
        Ok(index) => index,
        Err(FormsetError::NoTemplate) => return Ok(()),
        Err(err @ FormsetError::AtCapacity { .. }) => {
            gloo::console::warn!("image row not added", err.to_string());
            return Ok(());
        }
    };

    let row = template
        .clone_node_with_deep(true)?
        .dyn_into::<Element>()
        .map_err(JsValue::from)?;
    reindex_row(state, &row, index)?;
    reset_row(&row)?;

    match dom::element_by_id::<Element>(&state.container_id) {
        Some(container) => container.append_child(&row)?,
        None => {
            let parent = template
                .parent_node()
                .ok_or_else(|| JsValue::from_str("image row has no container"))?;
            parent.append_child(&row)?
        }
    };
    state.formset.borrow_mut().commit_row(index);
    total_input.set_value(&(index + 1).to_string());
    bind_preview(state, &row);
    Ok(())
}

fn reindex_row(state: &ImageForms, row: &Element, index: usize) -> Result<(), JsValue> {
    let formset = state.formset.borrow();
    let mut elements = vec![row.clone()];
    elements.extend(dom::query_all(row, REINDEXED_SELECTOR));
    for element in elements {
        for attr in REINDEXED_ATTRS {
            let Some(value) = element.get_attribute(attr) else {
                continue;
            };
            let next = formset.reindex(&value, index);
            if next != value {
                element.set_attribute(attr, &next)?;
            }
        }
    }
    Ok(())
}

fn reset_row(row: &Element) -> Result<(), JsValue> {
    if let Some(file_input) = dom::query::<HtmlInputElement>(row, FILE_INPUT_SELECTOR) {
        file_input.set_value("");
    }
    if let Some(preview) = dom::query::<Element>(row, PREVIEW_SELECTOR) {
        preview.remove();
    }
    if let Some(alt_text) = dom::query::<HtmlInputElement>(row, TEXT_INPUT_SELECTOR) {
        alt_text.set_value("");
    }
    for checkbox in dom::query_all(row, CHECKBOX_SELECTOR) {
        if let Ok(checkbox) = checkbox.dyn_into::<HtmlInputElement>() {
            checkbox.set_checked(false);
        }
    }
    let delete_container = dom::query::<Element>(row, &suffix_selector(DELETE_FIELD))
        .and_then(|input| input.parent_element())
        .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
    if let Some(container) = delete_container {
        container.style().set_property("display", "flex")?;
    }
    Ok(())
}

fn bind_featured(state: &Rc<ImageForms>) {
    let target: Option<EventTarget> = dom::element_by_id::<Element>(&state.container_id)
        .map(EventTarget::from)
        .or_else(|| dom::document().map(EventTarget::from));
    let Some(target) = target else {
        return;
    };
    let state = state.clone();
    let suffix = format!("-{FEATURED_FIELD}");
    let featured_selector = suffix_selector(FEATURED_FIELD);
    let listener = EventListener::new(&target, "change", move |event| {
        let Some(input) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let name = input.name();
        if !name.ends_with(&suffix) {
            return;
        }
        let observed: Vec<(usize, bool)> = dom::document_query_all(&featured_selector)
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .filter_map(|checkbox| {
                state
                    .row_index(&checkbox.name())
                    .map(|index| (index, checkbox.checked()))
            })
            .collect();
        for other in state.featured_changed(&name, input.checked(), &observed) {
            let selector = format!("input[name=\"{other}\"]");
            if let Some(checkbox) = dom::document_query::<HtmlInputElement>(&selector) {
                checkbox.set_checked(false);
            }
        }
    });
    page_runtime::keep_listener(listener);
}
