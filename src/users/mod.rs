use axum::Router;

use crate::error::DataError;
use crate::resource::{dto::NoFilter, handlers, value, EntitySchema, Resource, SqlValue, Values};
use crate::state::AppState;

mod dto;
mod password;

pub use dto::{CreateUserRequest, UpdateUserRequest};

pub const DEFAULT_ROLE: &str = "customer";

pub struct Users;

impl Resource for Users {
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
    type Filter = NoFilter;

    fn schema(state: &AppState) -> &EntitySchema {
        &state.schemas.users
    }

    fn create_values(body: CreateUserRequest) -> Result<Values, DataError> {
        let password = match value::text(body.password) {
            SqlValue::Text(Some(plain)) => Some(password::hash_password(&plain)?),
            _ => None,
        };
        let role = match value::text(body.role) {
            SqlValue::Text(Some(role)) if !role.is_empty() => role,
            _ => DEFAULT_ROLE.to_string(),
        };

        Ok(vec![
            ("username", value::text(body.username)),
            ("email", value::text(body.email)),
            ("password", SqlValue::Text(password)),
            ("full_name", value::text(body.full_name)),
            ("phone", value::text(body.phone)),
            ("role", SqlValue::Text(Some(role))),
        ])
    }

    fn update_values(body: UpdateUserRequest) -> Result<Values, DataError> {
        Ok(vec![
            ("username", value::text(body.username)),
            ("email", value::text(body.email)),
            ("full_name", value::text(body.full_name)),
            ("phone", value::text(body.phone)),
            ("role", value::text(body.role)),
        ])
    }

    fn filter(_: NoFilter) -> Option<String> {
        None
    }
}

pub fn router() -> Router<AppState> {
    handlers::routes::<Users>("/user")
}
