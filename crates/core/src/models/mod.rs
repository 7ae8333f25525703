//! Domain models for the recommendation experiment
//!
//! Users and items are loaded once per run and never mutated afterwards.

pub mod corpus;
pub mod item;
pub mod parameters;
pub mod user;
