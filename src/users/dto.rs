use serde::Deserialize;

use crate::resource::Scalar;

/// Every field is optional and takes any JSON scalar; a missing one is sent
/// as NULL and left to the table's constraints.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<Scalar>,
    pub email: Option<Scalar>,
    pub password: Option<Scalar>,
    pub full_name: Option<Scalar>,
    pub phone: Option<Scalar>,
    pub role: Option<Scalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<Scalar>,
    pub email: Option<Scalar>,
    pub full_name: Option<Scalar>,
    pub phone: Option<Scalar>,
    pub role: Option<Scalar>,
}
