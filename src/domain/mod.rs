// Domain layer: request/response shapes and the ports endpoints are built on.

pub mod model;
pub mod ports;
