pub mod analytics;
pub mod platform;
pub mod volunteers;
