//! GitHub user dashboard
//!
//! # Overview
//!
//! Given a user name, library fetches the user's repositories and recent events, then walks a bounded prefix of the repositories
//! (most recently updated first) to collect their language statistics and contributor lists.
//! Language byte counts are merged into a single mapping, repositories are ranked by the sum of their contributors' contributions,
//! and star, fork and watcher counts are summed over every fetched repository.
//!
//! Per repository requests are issued one at a time to bound the request volume.
//! A repository whose languages or contributors cannot be fetched contributes nothing to the respective aggregate, but it is never dropped from the ranking.

pub mod api;

#[cfg(feature = "aggregator")]
pub mod aggregator;
#[cfg(feature = "aggregator")]
pub mod state;

#[cfg(feature = "aggregator")]
pub use aggregator::{Dashboard, DashboardLoader, Limits};
#[cfg(feature = "aggregator")]
pub use state::{DashboardState, Phase, Theme};
