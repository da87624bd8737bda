//! Hosting provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "wpengine")]
mod wpengine;

#[cfg(feature = "wpengine")]
pub use wpengine::WpEngineProvider;
