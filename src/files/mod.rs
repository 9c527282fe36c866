//! Static file resolution
//!
//! Maps request paths onto the served root and gathers what the response
//! writer needs: an open file or a directory's entries.

pub mod listing;
pub mod resolver;

pub use listing::ListingEntry;
pub use resolver::{ResolvedTarget, TargetKind, resolve};
