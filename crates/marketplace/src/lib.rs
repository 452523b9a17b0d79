pub mod config;
pub mod error;
pub mod opportunities;
pub mod organizations;
pub mod site;
pub mod telemetry;
pub mod users;
