// Domain layer: listing record and the ports the harvester runs against.

pub mod model;
pub mod ports;
