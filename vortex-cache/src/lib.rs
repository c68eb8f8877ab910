//! # vortex-cache
//!
//! Two-tier result cache: an in-process L1 (moka) in front of a shared L2
//! tier behind the [`SharedCache`] trait. Keys embed per-collection epochs,
//! so bumping an epoch logically invalidates every cached result for that
//! collection without deleting entries.
//!
//! The cache is fail-open: a broken L2 backend degrades to L1-only and
//! ultimately to recomputation, never to an error on the request path.

mod epoch;
mod key;
mod l1;
mod manager;
mod shared;

pub use epoch::EpochRegistry;
pub use key::QueryKey;
pub use l1::L1ResultCache;
pub use manager::CacheManager;
pub use shared::InMemoryShared;
