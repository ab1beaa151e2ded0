// Domain layer: payload shapes and ports. No transport concerns here.

pub mod model;
pub mod ports;
