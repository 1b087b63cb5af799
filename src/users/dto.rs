use serde::{Deserialize, Serialize};

use crate::extractors::RequestBody;

/// Request body for user registration. `password` defaults to empty.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RequestBody for RegisterRequest {
    const MISSING: &'static str = "No data found to register a user!";
}

/// Wholesale replacement of a user's name, email and password.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RequestBody for UpdateUserRequest {
    const MISSING: &'static str = "No data found to update the user!";
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}
