use catalog_forms_core::{DisplayImage, ImageSwap, FADE_DELAY_MS};
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::HtmlImageElement;

use crate::dom;
use crate::page;

pub(crate) const GLOBAL_NAME: &str = "changeMainImage";

struct MainImage(HtmlImageElement);

impl DisplayImage for MainImage {
    fn set_opacity(&mut self, opacity: &str) {
        let _ = self.0.style().set_property("opacity", opacity);
    }

    fn set_source(&mut self, src: &str, alt: &str) {
        self.0.set_src(src);
        self.0.set_alt(alt);
    }
}

pub(crate) fn change_main_image(src: &str, alt: &str) {
    let config = page::page_config();
    let Some(image) = dom::element_by_id::<HtmlImageElement>(&config.main_image) else {
        return;
    };
    let swap = ImageSwap::new(src, alt);
    let mut image = MainImage(image);
    swap.fade_out(&mut image);
    Timeout::new(FADE_DELAY_MS, move || {
        swap.complete(&mut image);
    })
    .forget();
}

pub(crate) fn export_global() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::wrap(Box::new(move |src: JsValue, alt: JsValue| {
        let src = src.as_string().unwrap_or_default();
        let alt = alt.as_string().unwrap_or_default();
        change_main_image(&src, &alt);
    }) as Box<dyn Fn(JsValue, JsValue)>);
    if Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), callback.as_ref()).is_err() {
        gloo::console::warn!("failed to export", GLOBAL_NAME);
        return;
    }
    callback.forget();
}
