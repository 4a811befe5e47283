//! Address and prefix utilities.
//!
//! Pure helpers over a single interface prefix: member indexing, usable
//! bounds, and the route/pool/advertisement derivations used by the
//! services.

pub mod derive;
pub mod prefix;

// Re-export commonly used types
pub use derive::{dhcp_pool, radvd_prefix, route_target, DhcpPool, RouteTarget};
pub use prefix::{first_usable, last_usable};
