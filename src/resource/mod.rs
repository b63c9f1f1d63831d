use serde::de::DeserializeOwned;

use crate::error::DataError;
use crate::state::AppState;

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod schema;
pub mod sql;
pub mod value;

pub use schema::{EntitySchema, Schemas};
pub use value::{Scalar, SqlValue};

/// One row as returned by a projection.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Column/value pairs in bind order.
pub type Values = Vec<(&'static str, SqlValue)>;

/// Ties a route prefix to its schema and request bodies; the generic handlers
/// in [`handlers`] do the rest.
pub trait Resource: Send + Sync + 'static {
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;
    type Filter: DeserializeOwned + Send + 'static;

    fn schema(state: &AppState) -> &EntitySchema;

    fn create_values(body: Self::Create) -> Result<Values, DataError>;

    /// Every column the body carries; handlers keep only the schema's update set.
    fn update_values(body: Self::Update) -> Result<Values, DataError>;

    fn filter(query: Self::Filter) -> Option<String>;
}
