pub mod config;
pub mod seed;
pub mod source;
pub mod telemetry;
