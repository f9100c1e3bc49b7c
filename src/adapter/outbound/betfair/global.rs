//! Gateway over the exchange's global service: login, logout and event
//! navigation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::response::into_payload;
use super::session::Session;
use crate::application::retry::Invoker;
use crate::domain::EventId;
use crate::error::{ConfigError, Result};
use crate::port::{EventListing, EventType, GlobalService, LoginRequest, SessionRenewer};

/// Product id of the free API.
pub const FREE_API_PRODUCT_ID: u32 = 82;

/// Account credentials used to log in and to renew an expired session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub product_id: u32,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("product_id", &self.product_id)
            .finish()
    }
}

pub struct GlobalGateway {
    service: Arc<dyn GlobalService>,
    session: Arc<Session>,
    invoker: Invoker,
    credentials: Option<Credentials>,
    renewal: Mutex<()>,
}

impl GlobalGateway {
    pub fn new(service: Arc<dyn GlobalService>, session: Arc<Session>, invoker: Invoker) -> Self {
        Self {
            service,
            session,
            invoker,
            credentials: None,
            renewal: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Log in and store the session token from the response.
    ///
    /// Retried for transient failures, but never renews a session itself.
    pub async fn login(&self, username: &str, password: &str, product_id: u32) -> Result<()> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            product_id,
            location_id: 0,
            vendor_software_id: 0,
        };

        self.invoker
            .invoke("login", None, || {
                let request = request.clone();
                async move {
                    let response = self.service.login(request).await?;
                    let token = response.header.session_token.clone();
                    into_payload(response, "login")?;
                    self.session.set_token(token);
                    Ok(())
                }
            })
            .await?;

        info!(username, "Logged in");
        Ok(())
    }

    /// Log in with the configured credentials.
    pub async fn login_with_credentials(&self) -> Result<()> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ConfigError::MissingField { field: "account.username" })?;
        self.login(
            &credentials.username,
            &credentials.password,
            credentials.product_id,
        )
        .await
    }

    /// Log out, storing whatever token the exchange hands back.
    pub async fn logout(&self) -> Result<()> {
        self.invoker
            .invoke("logout", None, || async move {
                let response = self.service.logout(self.session.header()).await?;
                let token = response.header.session_token.clone();
                into_payload(response, "logout")?;
                self.session.set_token(token);
                Ok(())
            })
            .await?;

        info!("Logged out");
        Ok(())
    }

    pub async fn get_all_event_types(&self) -> Result<Vec<EventType>> {
        self.invoker
            .invoke("getAllEventTypes", Some(self), || async move {
                let response = self
                    .service
                    .get_all_event_types(self.session.header())
                    .await?;
                into_payload(response, "getAllEventTypes")
            })
            .await
    }

    /// Child events and markets beneath `parent_id`.
    pub async fn get_events(&self, parent_id: EventId) -> Result<EventListing> {
        debug!(parent_id = %parent_id, "Fetching events");
        self.invoker
            .invoke(&format!("getEvents {parent_id}"), Some(self), || async move {
                let response = self
                    .service
                    .get_events(self.session.header(), parent_id)
                    .await?;
                into_payload(response, "getEvents")
            })
            .await
    }
}

#[async_trait]
impl SessionRenewer for GlobalGateway {
    async fn renew(&self) -> Result<()> {
        let _guard = self.renewal.lock().await;
        self.login_with_credentials().await
    }
}
