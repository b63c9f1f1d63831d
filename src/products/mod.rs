use axum::Router;
use serde::Deserialize;

use crate::error::DataError;
use crate::resource::{handlers, value, EntitySchema, Resource, Scalar, Values};
use crate::state::AppState;

/// Any JSON scalar per field; numeric columns also take numeric strings.
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    pub name: Option<Scalar>,
    pub brand: Option<Scalar>,
    pub price: Option<Scalar>,
    pub stock: Option<Scalar>,
    pub category: Option<Scalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
}

pub struct Products;

impl ProductRequest {
    fn into_values(self) -> Result<Values, DataError> {
        Ok(vec![
            ("name", value::text(self.name)),
            ("brand", value::text(self.brand)),
            ("price", value::numeric("price", self.price)?),
            ("stock", value::integer("stock", self.stock)?),
            ("category", value::text(self.category)),
        ])
    }
}

impl Resource for Products {
    type Create = ProductRequest;
    type Update = ProductRequest;
    type Filter = ProductFilter;

    fn schema(state: &AppState) -> &EntitySchema {
        &state.schemas.products
    }

    fn create_values(body: ProductRequest) -> Result<Values, DataError> {
        body.into_values()
    }

    fn update_values(body: ProductRequest) -> Result<Values, DataError> {
        body.into_values()
    }

    fn filter(query: ProductFilter) -> Option<String> {
        query.category.filter(|c| !c.is_empty())
    }
}

pub fn router() -> Router<AppState> {
    handlers::routes::<Products>("/product")
}
