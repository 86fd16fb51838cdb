pub mod events;
pub mod progress;
pub mod status_check;
