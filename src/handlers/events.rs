use crate::models::error::ScreenError;
use crate::models::position::GeoPosition;

/// Everything the host can tell the screen: lifecycle hooks, button presses and
/// the permission dialog's answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenEvent {
    Created,
    Resumed,
    Paused,
    MarkPressed,
    CalculatePressed,
    PermissionResult { request_code: i32, granted: bool },
    Close,
}

/// What a location read was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    CurrentPosition,
    MarkReference,
    Distance,
}

/// Posted back to the screen when a spawned location read finishes.
#[derive(Debug)]
pub struct FetchCompleted {
    pub purpose: FetchPurpose,
    pub result: Result<GeoPosition, ScreenError>,
}
