pub mod error;
pub mod json_extract;
pub mod logger;
pub mod validation;
