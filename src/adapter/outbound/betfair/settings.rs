//! Exchange account configuration.

use serde::Deserialize;

use super::global::{Credentials, FREE_API_PRODUCT_ID};

/// Login details for the exchange account.
///
/// Username and password are normally supplied through the
/// `PADDOCK_USERNAME` and `PADDOCK_PASSWORD` environment variables.
#[derive(Clone, Deserialize)]
pub struct AccountConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_product_id")]
    pub product_id: u32,
}

const fn default_product_id() -> u32 {
    FREE_API_PRODUCT_ID
}

impl AccountConfig {
    /// Credentials, when both username and password are set.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
                product_id: self.product_id,
            }),
            _ => None,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            product_id: default_product_id(),
        }
    }
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("product_id", &self.product_id)
            .finish()
    }
}
