//! Headless GPS position screen.
//!
//! Run the screen against the simulated platform with
//! ```not_rust
//! cargo run
//! ```
//!
//! then type commands on stdin, one per line:
//! ```not_rust
//! grant                 answer the permission dialog (or: deny)
//! fix -23.55 -46.63 760 cache a location fix (or: nofix)
//! heading 271           push a compass sample
//! mark | calc           press a button
//! pause | resume        leave or return to the foreground
//! quit
//! ```
//!
//! Display changes and notifications are printed to stdout as JSON lines, logs go to stderr.

mod config;
mod handlers;
mod host;
mod models;

use std::sync::Arc;

use futures_util::StreamExt;
use once_cell::sync::Lazy;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ScreenConfig;
use crate::handlers::events::ScreenEvent;
use crate::handlers::orientation::OrientationSensor;
use crate::handlers::permission::PermissionState;
use crate::handlers::screen_actor::Collaborators;
use crate::handlers::session::ScreenSession;
use crate::handlers::simulated::{SimulatedLocationProvider, SimulatedOrientationSensor, SimulatedPermissions};
use crate::handlers::task::AutoCancelTask;
use crate::host::HostCommand;
use crate::models::display::DisplayKind;

static CONFIG: Lazy<ScreenConfig> = Lazy::new(ScreenConfig::init);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gps_position=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CONFIG.clone();
    info!("Starting screen with {:?}", config);

    let permissions = Arc::new(SimulatedPermissions::new(PermissionState::NotRequested));
    let location = Arc::new(SimulatedLocationProvider::new(None));
    let sensor = Arc::new(SimulatedOrientationSensor::new());
    let orientation: Option<Arc<dyn OrientationSensor>> = if config.has_orientation_sensor {
        Some(sensor.clone())
    } else {
        None
    };

    let mut session = ScreenSession::new(
        Collaborators {
            permissions: permissions.clone(),
            location: location.clone(),
            orientation,
        },
        config.clone(),
    );

    let _printers: Vec<AutoCancelTask<()>> = [
        DisplayKind::CurrentPosition,
        DisplayKind::InitialPosition,
        DisplayKind::Distance,
        DisplayKind::CompassAngle,
    ]
        .into_iter()
        .map(|kind| print_display(kind, session.display(kind)))
        .collect();

    session.send(ScreenEvent::Created).await?;
    session.send(ScreenEvent::Resumed).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let commands = async_stream::stream! {
        let mut lines = stdin.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    yield line.parse::<HostCommand>();
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    };
    futures::pin_mut!(commands);

    loop {
        select! {
            command = commands.next() => match command {
                Some(Ok(HostCommand::Quit)) | None => break,
                Some(Ok(command)) => {
                    let event = match command {
                        HostCommand::Mark => Some(ScreenEvent::MarkPressed),
                        HostCommand::Calculate => Some(ScreenEvent::CalculatePressed),
                        HostCommand::Pause => Some(ScreenEvent::Paused),
                        HostCommand::Resume => Some(ScreenEvent::Resumed),
                        HostCommand::Grant => Some(permissions.answer(true)),
                        HostCommand::Deny => Some(permissions.answer(false)),
                        HostCommand::Fix(fix) => {
                            location.set_fix(Some(fix));
                            None
                        }
                        HostCommand::NoFix => {
                            location.set_fix(None);
                            None
                        }
                        HostCommand::Heading(sample) => {
                            sensor.push(sample);
                            None
                        }
                        HostCommand::Quit => None,
                    };
                    if let Some(event) = event {
                        session.send(event).await?;
                    }
                }
                Some(Err(e)) => error!("{}", e),
            },
            Some(notification) = session.next_notification() => {
                let text = config.locale.message(notification);
                println!("{}", json!({ "notification": notification, "text": text }));
            }
        }
    }

    session.send(ScreenEvent::Paused).await?;
    session.close().await;
    info!("Bye");
    Ok(())
}

fn print_display(kind: DisplayKind, mut display: watch::Receiver<String>) -> AutoCancelTask<()> {
    AutoCancelTask(tokio::spawn(async move {
        while display.changed().await.is_ok() {
            let text = display.borrow_and_update().clone();
            println!("{}", json!({ "display": kind, "text": text }));
        }
    }))
}
