//! Storage adapters for non-test frontends (CLI, server).

#[cfg(feature = "json-store")]
mod json_override_store;

#[cfg(feature = "json-store")]
pub use json_override_store::JsonFileOverrideRepository;
