pub mod events;
pub mod health;
pub mod progress;
pub mod status;
