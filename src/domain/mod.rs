// Domain layer: models and ports. No provider or transport specifics here.

pub mod model;
pub mod ports;
