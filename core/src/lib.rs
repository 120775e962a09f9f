#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod error;
pub mod models;
pub mod nutrition;
pub mod query;
pub mod rating;
pub mod response;
pub mod view;

// Re-export commonly used types
pub use error::{FetchError, InputError};
pub use models::{NutrientsPayload, PageEnvelope, Recipe};
pub use nutrition::{NutrientRow, NutritionFacts};
pub use query::{FilterKey, Filters, PageSize, SearchRequest, PAGE_SIZES, SEARCH_PATH};
pub use rating::Stars;
pub use response::decode_search_response;
pub use view::{total_pages, FetchTicket, TableBody, ViewState};
