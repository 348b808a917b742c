//! Request payloads: raw deserialized forms validated with `validator`, then
//! converted into typed payloads before reaching the service layer.

pub mod builds;
pub mod configurator;
