pub mod catalog;
pub mod client;
pub mod envelope;
pub mod error;
pub mod image;
pub mod normalize;
pub mod probe;
pub mod search;

pub use catalog::{Catalog, CollectionCheck, ALL_CATEGORIES};
pub use client::CmsClient;
pub use error::CmsError;
pub use image::resolve_image;
pub use search::{SearchOutcome, SearchSession};
