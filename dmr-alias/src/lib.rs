//! Radio id alias resolution.
//!
//! Resolves numeric DMR network identifiers (peers, subscribers,
//! talkgroups) to human-readable aliases sourced from periodically
//! refreshed radioid.net-style datasets.
//!
//! The pieces compose in one direction: a [`dataset::Refresher`] keeps a
//! local dataset file fresh, [`dataset::build_flat`] /
//! [`dataset::build_structured`] parse that file into an in-memory index
//! once, and the index answers repeated lookups for the rest of the
//! process lifetime.

pub mod dataset;
pub mod domain;
pub mod index;
