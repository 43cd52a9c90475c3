pub mod cascade;
pub mod formset;
pub mod image_swap;
pub mod preview;
pub mod slug;

pub use cascade::{
    decode_model_list, Cascade, DependentSelect, LookupError, LookupOutcome, LookupRequest,
    ModelOption, RequestToken, SelectOption, PLACEHOLDER_LABEL,
};
pub use formset::{
    reindex, FieldName, FormsetError, ImageFormset, ImageRow, DELETE_FIELD, FEATURED_FIELD,
    IMAGE_PREFIX, MAX_NUM_FORMS, TOTAL_FORMS,
};
pub use image_swap::{DisplayImage, ImageSwap, FADE_DELAY_MS};
pub use preview::{PreviewTicket, PreviewTracker};
pub use slug::{autofill_slug, slugify, Slug, SlugError};
