//! DNS Health Core Library
//!
//! Reconciles three sources of truth about a domain into one verdict:
//! - the hosting provider's declared network status
//! - the provider's expected DNS targets
//! - a live DNS lookup performed by this process
//!
//! and lets an operator override a verdict it disagrees with.
//!
//! Storage and DNS are abstracted through traits so that any front-end
//! (CLI, web server, tests) can inject its own implementations.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{DnsResolver, InMemoryOverrideRepository, OverrideRepository, SystemDnsResolver};
