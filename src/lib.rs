//! Lightsail resource enumeration
//!
//! Enumerates AWS Lightsail resources (instances, disks, load balancers, key
//! pairs, ...) in every region with already-available credentials, and stores
//! the results in a scan session.
//!
//! The enumeration core in [`resource`] is written against small traits
//! ([`resource::LightsailApi`], [`resource::ClientFactory`],
//! [`progress::Progress`], [`session::Session`]); [`aws`] and
//! [`session::FileSession`] provide the standalone implementations.

pub mod aws;
pub mod config;
pub mod progress;
pub mod resource;
pub mod session;
pub mod summary;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Version injected at compile time via ENUM_LIGHTSAIL_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("ENUM_LIGHTSAIL_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
