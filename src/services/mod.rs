//! Application service layer.
//!
//! Services sit between the handler and the parameter store client.

mod parameter_service;

pub use parameter_service::{CachedParameterService, ParameterService};
