//! Diesel row structs and their conversions into domain entities.

pub mod build;
pub mod category;
pub mod component;
#[cfg(feature = "server")]
pub mod config;
