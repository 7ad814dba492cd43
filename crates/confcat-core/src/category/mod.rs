//! Category domain module.
//!
//! A category is a named, saved filter definition: an ordered list of typed
//! conditions that together select a dynamic subset of sessions.
//!
//! # Module Structure
//!
//! - `model`: `Category`, `Condition` and the closed `ConditionType` enumeration
//! - `repository`: `CategoryRepository` trait for persistence

mod model;
pub mod repository;

pub use model::{Category, CategoryId, Condition, ConditionId, ConditionType};
pub use repository::CategoryRepository;
