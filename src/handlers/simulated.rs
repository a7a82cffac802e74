//! In-process stand-ins for the platform collaborators.
//!
//! The host binary drives these from stdin; tests drive them directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::handlers::events::ScreenEvent;
use crate::handlers::location::LocationProvider;
use crate::handlers::orientation::{OrientationSensor, SensorDelay, SensorRegistration};
use crate::handlers::permission::{PermissionGate, PermissionState, LOCATION_PERMISSION_REQUEST_CODE};
use crate::models::position::{GeoPosition, HeadingSample};

pub struct SimulatedPermissions {
    state: RwLock<PermissionState>,
    requests: AtomicUsize,
}

impl SimulatedPermissions {
    pub fn new(state: PermissionState) -> Self {
        Self { state: RwLock::new(state), requests: AtomicUsize::new(0) }
    }

    pub fn state(&self) -> PermissionState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Times the permission dialog was opened.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Records the user's answer and returns the event the screen receives.
    pub fn answer(&self, granted: bool) -> ScreenEvent {
        let state = if granted { PermissionState::Granted } else { PermissionState::Denied };
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
        info!("Permission dialog answered: {:?}", state);
        ScreenEvent::PermissionResult { request_code: LOCATION_PERMISSION_REQUEST_CODE, granted }
    }
}

impl PermissionGate for SimulatedPermissions {
    fn has_permission(&self) -> bool {
        self.state() == PermissionState::Granted
    }

    fn request_permission(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        info!("Permission dialog shown for request code {}", LOCATION_PERMISSION_REQUEST_CODE);
    }
}

/// Serves whatever fix was last cached, or nothing on a cold start.
#[derive(Default)]
pub struct SimulatedLocationProvider {
    cached: RwLock<Option<GeoPosition>>,
    reads: AtomicUsize,
}

impl SimulatedLocationProvider {
    pub fn new(cached: Option<GeoPosition>) -> Self {
        Self { cached: RwLock::new(cached), reads: AtomicUsize::new(0) }
    }

    pub fn set_fix(&self, fix: Option<GeoPosition>) {
        *self.cached.write().unwrap_or_else(|e| e.into_inner()) = fix;
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocationProvider {
    async fn last_known_location(&self) -> Option<GeoPosition> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let fix = *self.cached.read().unwrap_or_else(|e| e.into_inner());
        debug!("Last known location requested: {:?}", fix);
        fix
    }
}

/// Broadcasts pushed headings to every registered listener.
pub struct SimulatedOrientationSensor {
    feed: broadcast::Sender<HeadingSample>,
}

impl SimulatedOrientationSensor {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(64);
        Self { feed }
    }

    pub fn push(&self, sample: HeadingSample) {
        if self.feed.send(sample).is_err() {
            debug!("Heading {:?} dropped, no listener registered", sample);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.feed.receiver_count()
    }
}

impl Default for SimulatedOrientationSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationSensor for SimulatedOrientationSensor {
    fn register(&self, sink: watch::Sender<Option<HeadingSample>>, delay: SensorDelay) -> SensorRegistration {
        debug!("Registering heading listener at {:?} rate", delay);
        let mut feed = self.feed.subscribe();
        let samples = async_stream::stream! {
            loop {
                match feed.recv().await {
                    Ok(sample) => yield sample,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Heading listener lagged, {} samples skipped", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        };

        SensorRegistration::from_task(tokio::spawn(async move {
            futures::pin_mut!(samples);
            while let Some(sample) = samples.next().await {
                if sink.is_closed() {
                    break;
                }
                sink.send_replace(Some(sample));
            }
        }))
    }
}
