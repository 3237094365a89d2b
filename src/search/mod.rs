// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Title search: five tiers, cheapest and most precise first.
//!
//! Every tier reads from the same [`SearchIndex`](crate::index::SearchIndex)
//! snapshot. Earlier tiers claim a title first; later tiers only add titles
//! nobody has claimed yet. The merged list is ordered by tier, then
//! alphabetically without regard to case.

pub mod dedup;
pub mod tiered;

pub use dedup::ResultMerger;
pub use tiered::{search, TitleSearcher, MIN_QUERY_CHARS};
