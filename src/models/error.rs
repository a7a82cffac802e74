use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Failures a screen action can run into. Each one is handled where it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenError {
    PermissionDenied,
    NoLocationAvailable,
    NoReferenceSet,
}

impl Display for ScreenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenError::PermissionDenied => write!(f, "fine location permission not granted"),
            ScreenError::NoLocationAvailable => write!(f, "no last known location available"),
            ScreenError::NoReferenceSet => write!(f, "no reference position marked"),
        }
    }
}

impl Error for ScreenError {}

pub struct ErrorWithMessage {
    pub message: String,
}

impl ErrorWithMessage {
    pub fn new(message: String) -> Self {
        Self {
            message
        }
    }
}

impl Debug for ErrorWithMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Display for ErrorWithMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ErrorWithMessage {

}
