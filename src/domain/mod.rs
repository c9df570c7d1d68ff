//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `room` - Room aggregate, language tag and room errors
//! - `autocomplete` - Pure suggestion rules keyed by language

pub mod autocomplete;
pub mod foundation;
pub mod room;
