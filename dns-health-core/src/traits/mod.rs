//! Storage and DNS abstraction trait definition

mod dns_resolver;
mod override_repository;

pub use dns_resolver::{DnsResolver, SystemDnsResolver};
pub use override_repository::{InMemoryOverrideRepository, OverrideRepository};
