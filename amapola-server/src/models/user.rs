//! User account records
//!
//! Struct fields use English names; the JSON surface keeps the Spanish keys
//! that existing clients send and read (`nombre`, `usuario`, `contraseña`,
//! `sexo`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{check_len, ValidationError};

const MAX_NAME_LEN: usize = 100;
const MAX_SEX_LEN: usize = 100;
const MAX_USERNAME_LEN: usize = 100;
const MAX_PASSWORD_LEN: usize = 200;

/// Persisted user account.
///
/// `password` is stored and compared as plain text for compatibility with
/// existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contraseña")]
    pub password: String,
    #[serde(rename = "sexo")]
    pub sex: String,
}

/// Writable user fields
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contraseña")]
    pub password: String,
    #[serde(rename = "sexo")]
    pub sex: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("nombre", &self.name, MAX_NAME_LEN)?;
        check_len("usuario", &self.username, MAX_USERNAME_LEN)?;
        check_len("contraseña", &self.password, MAX_PASSWORD_LEN)?;
        check_len("sexo", &self.sex, MAX_SEX_LEN)?;
        Ok(())
    }
}

/// Login lookup key, as posted to `/login`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "pass")]
    pub password: String,
}
