//! Data models exchanged with the parameter store and the edge.

pub mod parameter;
pub mod response;

pub use parameter::{GetParameterResponse, Parameter};
pub use response::{EdgeResponse, HeaderEntry, TEMPLATE_ERROR_BODY};
