use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::handlers::task::AutoCancelTask;
use crate::models::position::HeadingSample;

/// Platform delivery rate for orientation samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDelay {
    Normal,
}

/// Keeps a sensor listener registered. Dropping it unregisters the listener.
pub struct SensorRegistration {
    _forwarder: AutoCancelTask<()>,
}

impl SensorRegistration {
    pub fn from_task(task: tokio::task::JoinHandle<()>) -> Self {
        Self { _forwarder: AutoCancelTask(task) }
    }
}

/// Platform push stream of compass headings.
pub trait OrientationSensor: Send + Sync {
    /// Starts writing samples into `sink` until the registration is dropped.
    /// Each sample replaces the previous one.
    fn register(&self, sink: watch::Sender<Option<HeadingSample>>, delay: SensorDelay) -> SensorRegistration;
}

enum BindingState {
    Unsubscribed,
    Subscribed {
        _registration: SensorRegistration,
        samples: watch::Receiver<Option<HeadingSample>>,
    },
}

/// Ties the sensor subscription to screen visibility.
///
/// Only `resume` and `pause` move between the two states. Only the newest
/// sample is kept, and each resume opens a new channel, so nothing delivered
/// before a pause is seen again.
pub struct OrientationBinding {
    sensor: Option<Arc<dyn OrientationSensor>>,
    state: BindingState,
}

impl OrientationBinding {
    /// `sensor` is `None` on devices without an orientation sensor.
    pub fn new(sensor: Option<Arc<dyn OrientationSensor>>) -> Self {
        Self { sensor, state: BindingState::Unsubscribed }
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.state, BindingState::Subscribed { .. })
    }

    pub fn resume(&mut self) {
        if self.is_subscribed() {
            debug!("Orientation sensor already subscribed");
            return;
        }
        let Some(sensor) = self.sensor.as_ref() else {
            warn!("No orientation sensor on this device, compass stays idle");
            return;
        };

        let (sink, samples) = watch::channel(None);
        let registration = sensor.register(sink, SensorDelay::Normal);
        self.state = BindingState::Subscribed { _registration: registration, samples };
        info!("Orientation sensor subscribed");
    }

    pub fn pause(&mut self) {
        if let BindingState::Subscribed { .. } = std::mem::replace(&mut self.state, BindingState::Unsubscribed) {
            info!("Orientation sensor unsubscribed");
        }
    }

    /// Next delivered sample. Never resolves while unsubscribed or after the
    /// sensor stopped delivering.
    pub async fn next_sample(&mut self) -> HeadingSample {
        if let BindingState::Subscribed { samples, .. } = &mut self.state {
            while samples.changed().await.is_ok() {
                if let Some(sample) = *samples.borrow_and_update() {
                    return sample;
                }
            }
            debug!("Orientation sensor stopped delivering");
        }
        futures::future::pending().await
    }
}
