use std::cell::RefCell;

use catalog_forms_core::IMAGE_PREFIX;

pub(crate) const DEFAULT_MODELS_URL: &str = "/api/models/";
pub(crate) const MODELS_URL_ATTR: &str = "data-models-url";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageConfig {
    pub(crate) brand_select: String,
    pub(crate) model_select: String,
    pub(crate) name_input: String,
    pub(crate) slug_input: String,
    pub(crate) main_image: String,
    pub(crate) add_image_button: String,
    pub(crate) image_rows_container: String,
    pub(crate) image_row_selector: String,
    pub(crate) formset_prefix: String,
    pub(crate) models_url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            brand_select: "id_brand".to_string(),
            model_select: "id_model".to_string(),
            name_input: "id_name".to_string(),
            slug_input: "id_slug".to_string(),
            main_image: "main-image".to_string(),
            add_image_button: "add-image".to_string(),
            image_rows_container: "image-forms".to_string(),
            image_row_selector: ".image-form".to_string(),
            formset_prefix: IMAGE_PREFIX.to_string(),
            models_url: DEFAULT_MODELS_URL.to_string(),
        }
    }
}

thread_local! {
    static PAGE_CONFIG: RefCell<Option<PageConfig>> = RefCell::new(None);
}

pub(crate) fn set_page_config(config: PageConfig) {
    PAGE_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config);
    });
}

pub(crate) fn page_config() -> PageConfig {
    PAGE_CONFIG
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(load_page_config)
}

pub(crate) fn load_page_config() -> PageConfig {
    let mut config = PageConfig {
        models_url: default_models_url(),
        ..PageConfig::default()
    };
    if let Some(url) = models_url_from_markup(&config.brand_select) {
        config.models_url = url;
    }
    config
}

fn default_models_url() -> String {
    option_env!("CATALOG_FORMS_MODELS_URL")
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .unwrap_or(DEFAULT_MODELS_URL)
        .to_string()
}

fn models_url_from_markup(brand_select: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let raw = document
        .get_element_by_id(brand_select)?
        .get_attribute(MODELS_URL_ATTR)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
