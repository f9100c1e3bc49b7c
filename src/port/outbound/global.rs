//! Global (account and navigation) service port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::exchange::{RequestHeader, Response};
use crate::domain::{EventId, MarketId};
use crate::error::Error;

/// Credentials and product for a login request.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub product_id: u32,
    pub location_id: u32,
    pub vendor_software_id: u32,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("product_id", &self.product_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub id: EventId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub event_id: EventId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSummary {
    pub market_id: MarketId,
    pub name: String,
    pub start_time: DateTime<Utc>,
}

/// Children of a node in the event hierarchy: sub-events and markets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListing {
    pub events: Vec<EventSummary>,
    pub markets: Vec<MarketSummary>,
}

/// The exchange's global service. Login and logout return the new session
/// token in the response header.
#[async_trait]
pub trait GlobalService: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<Response<()>, Error>;

    async fn logout(&self, header: RequestHeader) -> Result<Response<()>, Error>;

    async fn get_all_event_types(
        &self,
        header: RequestHeader,
    ) -> Result<Response<Vec<EventType>>, Error>;

    async fn get_events(
        &self,
        header: RequestHeader,
        parent_id: EventId,
    ) -> Result<Response<EventListing>, Error>;
}
