//! Session renewal port.

use async_trait::async_trait;

use crate::error::Error;

/// Re-establishes an expired session, typically by logging in again.
#[async_trait]
pub trait SessionRenewer: Send + Sync {
    async fn renew(&self) -> Result<(), Error>;
}
