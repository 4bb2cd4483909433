//! Team client surface for the Vantage API.
//!
//! Provides team and membership models, team endpoint operations, and the
//! paged member query built on `vantage-core`.

#![deny(missing_docs)]

pub mod meta;
pub mod models;
pub mod ops;
pub mod query;

pub use meta::TeamMeta;
pub use models::{MemberRole, Team, TeamMember};
pub use ops::get_team;
pub use query::MemberQuery;

/// Convenient result alias that reuses the shared Vantage error type.
pub type Result<T> = vantage_core::Result<T>;
