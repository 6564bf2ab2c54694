// Resume scoring: the pure engine, its configuration and the store-backed
// service.

pub mod engine;
pub mod service;
pub mod weights;
