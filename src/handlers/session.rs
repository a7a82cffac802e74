use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::config::ScreenConfig;
use crate::handlers::events::ScreenEvent;
use crate::handlers::screen_actor::{Collaborators, DisplayReceivers, Displays, ScreenActor};
use crate::handlers::task::AutoCancelTask;
use crate::models::display::{DisplayKind, Notification};
use crate::models::error::ErrorWithMessage;

/// A running screen. Dropping the session stops its actor.
pub struct ScreenSession {
    events: mpsc::Sender<ScreenEvent>,
    displays: DisplayReceivers,
    notifications: mpsc::UnboundedReceiver<Notification>,
    handle: AutoCancelTask<()>,
}

impl ScreenSession {
    pub fn new(collaborators: Collaborators, config: ScreenConfig) -> Self {
        let (events, inbox) = mpsc::channel(8);
        let (notify_tx, notifications) = mpsc::unbounded_channel();
        let (displays, receivers) = Displays::new(config.locale);

        let actor = ScreenActor::new(inbox, displays, notify_tx, collaborators, config);

        Self {
            events,
            displays: receivers,
            notifications,
            handle: AutoCancelTask(tokio::spawn(async move {
                actor.run_actor().await;
                debug!("Screen actor finished");
            })),
        }
    }

    pub async fn send(&self, event: ScreenEvent) -> Result<(), ErrorWithMessage> {
        self.events
            .send(event)
            .await
            .map_err(|e| ErrorWithMessage::new(format!("screen is closed, dropped {:?}", e.0)))
    }

    pub fn display(&self, kind: DisplayKind) -> watch::Receiver<String> {
        self.displays.get(kind).clone()
    }

    pub async fn next_notification(&mut self) -> Option<Notification> {
        self.notifications.recv().await
    }

    #[cfg(test)]
    pub fn try_next_notification(&mut self) -> Option<Notification> {
        self.notifications.try_recv().ok()
    }

    /// Sends `Close` and waits for the actor to stop.
    pub async fn close(mut self) {
        if self.send(ScreenEvent::Close).await.is_ok() {
            let _ = (&mut self.handle.0).await;
        }
    }
}
