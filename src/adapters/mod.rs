// Adapters layer: concrete implementations of the domain ports for external
// systems (HTTP lookup service, registration API, terminal alerts).

pub mod api;
pub mod console;
pub mod viacep;
