// Domain layer: core records and ports (interfaces). No dependencies beyond
// std/serde; everything concrete lives in adapters.

pub mod model;
pub mod ports;
