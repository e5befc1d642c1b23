//! Backend abstraction trait definition

mod advisory_backend;

pub use advisory_backend::AdvisoryBackend;

// Re-export geolocation provider trait
pub use aegis_provider::GeoProvider;
