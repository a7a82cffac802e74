/// Request code the location permission dialog answers with.
pub const LOCATION_PERMISSION_REQUEST_CODE: i32 = 1001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    NotRequested,
    Denied,
    Granted,
}

/// Fine-location runtime permission.
///
/// `request_permission` only opens the platform dialog. The answer reaches the
/// screen later as a `ScreenEvent::PermissionResult` carrying
/// [`LOCATION_PERMISSION_REQUEST_CODE`].
pub trait PermissionGate: Send + Sync {
    fn has_permission(&self) -> bool;

    fn request_permission(&self);
}
