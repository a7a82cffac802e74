use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::models::error::ScreenError;
use crate::models::position::GeoPosition;

/// Platform service holding the last cached fix. Not owned by the screen.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// `None` when nothing is cached yet, e.g. cold GPS on first run.
    async fn last_known_location(&self) -> Option<GeoPosition>;
}

/// One-shot read of the last known location.
///
/// Permission is checked by the caller before this runs. With no timeout the
/// future waits as long as the provider does.
pub async fn fetch_last_known(
    provider: &dyn LocationProvider,
    timeout: Option<Duration>,
) -> Result<GeoPosition, ScreenError> {
    let location = match timeout {
        Some(limit) => match tokio::time::timeout(limit, provider.last_known_location()).await {
            Ok(location) => location,
            Err(_) => {
                debug!("Last known location not delivered within {:?}", limit);
                None
            }
        },
        None => provider.last_known_location().await,
    };

    location.ok_or(ScreenError::NoLocationAvailable)
}
