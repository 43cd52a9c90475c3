use std::cell::RefCell;
use std::rc::Rc;

use catalog_forms_core::{
    decode_model_list, Cascade, DependentSelect, LookupError, LookupOutcome, LookupRequest,
    ModelOption, SelectOption,
};
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlOptionElement, HtmlSelectElement, Response};

use crate::dom;
use crate::page::PageConfig;
use crate::page_runtime;

pub(crate) struct SelectView {
    select: HtmlSelectElement,
}

impl SelectView {
    pub(crate) fn new(select: HtmlSelectElement) -> Self {
        Self { select }
    }

    fn append_option(&self, option: &SelectOption) -> Result<(), JsValue> {
        let element = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)?;
        self.select.append_child(&element)?;
        Ok(())
    }
}

impl DependentSelect for SelectView {
    fn replace_options(&mut self, options: &[SelectOption]) {
        self.select.set_inner_html("");
        for option in options {
            if let Err(err) = self.append_option(option) {
                gloo::console::warn!(
                    "model option not added",
                    option.label.clone(),
                    dom::js_err(err)
                );
            }
        }
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.select.set_disabled(disabled);
    }
}

pub(crate) fn attach(config: &PageConfig) {
    let Some(brand) = dom::element_by_id::<HtmlSelectElement>(&config.brand_select) else {
        return;
    };
    let Some(model) = dom::element_by_id::<HtmlSelectElement>(&config.model_select) else {
        return;
    };
    let cascade = Rc::new(RefCell::new(Cascade::new(SelectView::new(model))));
    let models_url: Rc<str> = Rc::from(config.models_url.as_str());
    let source = brand.clone();
    let listener = EventListener::new(&brand, "change", move |_event| {
        let request = cascade.borrow_mut().on_brand_change(&source.value());
        let Some(request) = request else {
            return;
        };
        let url = request.url(&models_url);
        let cascade = cascade.clone();
        spawn_local(async move {
            let result = fetch_models(&url).await;
            let outcome = cascade.borrow_mut().on_lookup_complete(request.token, result);
            report(&request, outcome);
        });
    });
    page_runtime::keep_listener(listener);
}

async fn fetch_models(url: &str) -> Result<Vec<ModelOption>, LookupError> {
    let window =
        web_sys::window().ok_or_else(|| LookupError::Network("missing window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network_error)?;
    let response: Response = response.dyn_into().map_err(network_error)?;
    if !response.ok() {
        return Err(LookupError::Status(response.status()));
    }
    let body = JsFuture::from(response.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    decode_model_list(&body.as_string().unwrap_or_default())
}

fn network_error(error: JsValue) -> LookupError {
    LookupError::Network(dom::js_err(error))
}

fn report(request: &LookupRequest, outcome: LookupOutcome) {
    match outcome {
        LookupOutcome::Applied { count } => {
            gloo::console::log!("models loaded", request.brand_id.clone(), count as u32);
        }
        LookupOutcome::Stale => {
            gloo::console::log!(
                "stale model lookup discarded",
                request.brand_id.clone(),
                request.token.value() as f64
            );
        }
        LookupOutcome::Failed(err) => {
            gloo::console::error!("Error fetching models:", err.to_string());
        }
    }
}
