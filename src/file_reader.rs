use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, ProgressEvent};

pub(crate) async fn read_as_data_url(file: &File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;
    let promise = reader_to_promise(&reader);
    reader.read_as_data_url(file)?;
    let value = JsFuture::from(promise).await?;
    value
        .as_string()
        .ok_or_else(|| JsValue::from_str("file reader returned no data url"))
}

fn reader_to_promise(reader: &FileReader) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, reject| {
        let load_reader = reader.clone();
        let on_load = Closure::once(move |_event: ProgressEvent| {
            let result = load_reader.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let on_error = Closure::once(move |_event: ProgressEvent| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("file read failed"));
        });
        reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
        reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();
    })
}
