pub mod events;
pub mod location;
pub mod orientation;
pub mod permission;
pub mod screen_actor;
pub mod session;
pub mod simulated;
pub mod task;
pub mod tracker;
