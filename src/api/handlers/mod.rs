pub mod auth;
pub mod control;
pub mod health;
pub mod metrics;
pub mod trades;
