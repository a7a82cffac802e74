use std::sync::Arc;

use tokio::select;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::{FeedbackPolicy, ScreenConfig};
use crate::handlers::events::{FetchCompleted, FetchPurpose, ScreenEvent};
use crate::handlers::location::{fetch_last_known, LocationProvider};
use crate::handlers::orientation::{OrientationBinding, OrientationSensor};
use crate::handlers::permission::{PermissionGate, LOCATION_PERMISSION_REQUEST_CODE};
use crate::handlers::tracker::PositionTracker;
use crate::models::display::{DisplayKind, Locale, Notification};
use crate::models::error::ScreenError;
use crate::models::position::HeadingSample;

/// Platform services the screen talks to but does not own.
#[derive(Clone)]
pub struct Collaborators {
    pub permissions: Arc<dyn PermissionGate>,
    pub location: Arc<dyn LocationProvider>,
    /// `None` when the device has no orientation sensor.
    pub orientation: Option<Arc<dyn OrientationSensor>>,
}

/// Writing ends of the four text surfaces.
pub struct Displays {
    current_position: watch::Sender<String>,
    initial_position: watch::Sender<String>,
    distance: watch::Sender<String>,
    compass_angle: watch::Sender<String>,
}

/// Reading ends of the four text surfaces.
#[derive(Clone)]
pub struct DisplayReceivers {
    pub current_position: watch::Receiver<String>,
    pub initial_position: watch::Receiver<String>,
    pub distance: watch::Receiver<String>,
    pub compass_angle: watch::Receiver<String>,
}

impl DisplayReceivers {
    pub fn get(&self, kind: DisplayKind) -> &watch::Receiver<String> {
        match kind {
            DisplayKind::CurrentPosition => &self.current_position,
            DisplayKind::InitialPosition => &self.initial_position,
            DisplayKind::Distance => &self.distance,
            DisplayKind::CompassAngle => &self.compass_angle,
        }
    }
}

impl Displays {
    pub fn new(locale: Locale) -> (Self, DisplayReceivers) {
        let (current_position, current_position_rx) = watch::channel(locale.placeholder(DisplayKind::CurrentPosition));
        let (initial_position, initial_position_rx) = watch::channel(locale.placeholder(DisplayKind::InitialPosition));
        let (distance, distance_rx) = watch::channel(locale.placeholder(DisplayKind::Distance));
        let (compass_angle, compass_angle_rx) = watch::channel(locale.placeholder(DisplayKind::CompassAngle));

        (
            Self { current_position, initial_position, distance, compass_angle },
            DisplayReceivers {
                current_position: current_position_rx,
                initial_position: initial_position_rx,
                distance: distance_rx,
                compass_angle: compass_angle_rx,
            },
        )
    }

    fn set(&self, kind: DisplayKind, text: String) {
        let display = match kind {
            DisplayKind::CurrentPosition => &self.current_position,
            DisplayKind::InitialPosition => &self.initial_position,
            DisplayKind::Distance => &self.distance,
            DisplayKind::CompassAngle => &self.compass_angle,
        };
        display.send_replace(text);
    }
}

/// The screen's UI thread. Every piece of screen state is touched only here;
/// location reads run as spawned tasks and post their result back.
pub struct ScreenActor {
    inbox: mpsc::Receiver<ScreenEvent>,
    fetch_done_tx: mpsc::UnboundedSender<FetchCompleted>,
    fetch_done: mpsc::UnboundedReceiver<FetchCompleted>,
    displays: Displays,
    notifications: mpsc::UnboundedSender<Notification>,
    permissions: Arc<dyn PermissionGate>,
    location: Arc<dyn LocationProvider>,
    orientation: OrientationBinding,
    tracker: PositionTracker,
    heading: Option<HeadingSample>,
    config: ScreenConfig,
    created: bool,
}

impl ScreenActor {
    pub fn new(inbox: mpsc::Receiver<ScreenEvent>,
               displays: Displays,
               notifications: mpsc::UnboundedSender<Notification>,
               collaborators: Collaborators,
               config: ScreenConfig) -> Self {
        let (fetch_done_tx, fetch_done) = mpsc::unbounded_channel();
        Self {
            inbox,
            fetch_done_tx,
            fetch_done,
            displays,
            notifications,
            permissions: collaborators.permissions,
            location: collaborators.location,
            orientation: OrientationBinding::new(collaborators.orientation),
            tracker: PositionTracker::new(),
            heading: None,
            config,
            created: false,
        }
    }

    pub async fn run_actor(mut self) {
        enum Message {
            Event(ScreenEvent),
            Fetched(FetchCompleted),
            Heading(HeadingSample),
        }
        loop {
            let message = select! {
                event = self.inbox.recv() => match event {
                    Some(event) => Message::Event(event),
                    None => {
                        info!("Channel closed");
                        return;
                    }
                },
                Some(done) = self.fetch_done.recv() => Message::Fetched(done),
                sample = self.orientation.next_sample() => Message::Heading(sample),
            };

            match message {
                Message::Event(ScreenEvent::Close) => {
                    info!("Screen closed");
                    self.orientation.pause();
                    return;
                }
                Message::Event(event) => self.on_event(event),
                Message::Fetched(done) => self.on_fetch_completed(done),
                Message::Heading(sample) => self.on_heading(sample),
            }
        }
    }

    fn on_event(&mut self, event: ScreenEvent) {
        debug!("Screen event {:?}", event);
        match event {
            ScreenEvent::Created => self.on_created(),
            ScreenEvent::Resumed => self.orientation.resume(),
            ScreenEvent::Paused => {
                self.orientation.pause();
                if let Some(last) = self.heading.take() {
                    debug!("Discarding heading {:?}", last);
                }
            }
            ScreenEvent::MarkPressed => self.begin_fetch(FetchPurpose::MarkReference),
            ScreenEvent::CalculatePressed => {
                if self.tracker.reference().is_none() {
                    self.report(ScreenError::NoReferenceSet, FetchPurpose::Distance);
                    return;
                }
                self.begin_fetch(FetchPurpose::Distance);
            }
            ScreenEvent::PermissionResult { request_code, granted } => {
                if request_code != LOCATION_PERMISSION_REQUEST_CODE {
                    warn!("Ignoring permission result for unknown request code {}", request_code);
                    return;
                }
                if granted {
                    info!("Location permission granted");
                    self.begin_fetch(FetchPurpose::CurrentPosition);
                } else {
                    info!("Location permission denied");
                    self.report(ScreenError::PermissionDenied, FetchPurpose::CurrentPosition);
                }
            }
            ScreenEvent::Close => {}
        }
    }

    fn on_created(&mut self) {
        if self.created {
            debug!("Screen already created, skipping startup fetch");
            return;
        }
        self.created = true;

        if self.permissions.has_permission() {
            self.begin_fetch(FetchPurpose::CurrentPosition);
        } else {
            info!("Requesting location permission");
            self.permissions.request_permission();
        }
    }

    /// Single permission guard for every location read.
    fn begin_fetch(&mut self, purpose: FetchPurpose) {
        if !self.permissions.has_permission() {
            self.report(ScreenError::PermissionDenied, purpose);
            return;
        }

        debug!("Fetching last known location for {:?}", purpose);
        let location = self.location.clone();
        let timeout = self.config.fetch_timeout;
        let done = self.fetch_done_tx.clone();
        tokio::spawn(async move {
            let result = fetch_last_known(location.as_ref(), timeout).await;
            // The screen may be gone by now.
            let _ = done.send(FetchCompleted { purpose, result });
        });
    }

    fn on_fetch_completed(&mut self, done: FetchCompleted) {
        let position = match done.result {
            Ok(position) => position,
            Err(e) => {
                self.report(e, done.purpose);
                return;
            }
        };

        let locale = self.config.locale;
        match done.purpose {
            FetchPurpose::CurrentPosition => {
                self.displays.set(
                    DisplayKind::CurrentPosition,
                    locale.format_position(DisplayKind::CurrentPosition, &position),
                );
            }
            FetchPurpose::MarkReference => {
                self.tracker.mark_reference(position);
                info!("Reference position marked at {:?}", position);
                self.displays.set(
                    DisplayKind::InitialPosition,
                    locale.format_position(DisplayKind::InitialPosition, &position),
                );
                self.notify(Notification::InitialPositionMarked);
            }
            FetchPurpose::Distance => match self.tracker.compute_distance(&position) {
                Ok(distance) => {
                    debug!("Distance to reference: {} m", distance.meters);
                    self.displays.set(DisplayKind::Distance, locale.format_distance(&distance));
                }
                Err(e) => self.report(e, done.purpose),
            },
        }
    }

    fn on_heading(&mut self, sample: HeadingSample) {
        self.heading = Some(sample);
        self.displays.set(DisplayKind::CompassAngle, self.config.locale.format_heading(&sample));
    }

    fn report(&self, error: ScreenError, purpose: FetchPurpose) {
        let (policy, notification) = match error {
            ScreenError::PermissionDenied => (self.config.permission_feedback, Notification::PermissionRequired),
            ScreenError::NoLocationAvailable => (self.config.no_fix_feedback, Notification::NoLocationAvailable),
            ScreenError::NoReferenceSet => (FeedbackPolicy::Notify, Notification::MarkInitialPositionFirst),
        };

        match policy {
            FeedbackPolicy::Silent => debug!("{:?} dropped: {}", purpose, error),
            FeedbackPolicy::Notify => {
                warn!("{:?} failed: {}", purpose, error);
                self.notify(notification);
            }
        }
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            debug!("Notification {:?} not shown, nobody is listening", notification);
        }
    }
}
