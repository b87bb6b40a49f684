pub mod filters;
pub mod media;
pub mod validation;

pub use filters::{Filters, WatchedFilter, MEDIA_SORT_SAFELIST};
pub use media::{validate_media, CreateMediaRequest, MediaItem};
pub use validation::{FieldErrors, Validator};
