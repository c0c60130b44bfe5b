pub mod checklist;
pub mod config;
pub mod delivery;
pub mod error;
pub mod guide;
pub mod payment;
pub mod telemetry;
