// Application layer: composed interactive flows over the core session.

pub mod interactive;
