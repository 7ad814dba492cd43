//! Category-to-query translation engine.
//!
//! - `compile`: turns a category's conditions into a [`SessionFilter`]
//! - `filter`: the conjunctive filter and its predicate units
//! - `sort`: sort key, direction and the id tie-break
//! - `page`: page window and the [`PagedResult`] envelope
//! - `executor`: the reference filter → count → sort → paginate pipeline

pub mod compile;
pub mod executor;
pub mod filter;
pub mod page;
pub mod sort;

pub use compile::{CompiledFilter, InertCondition, InertReason, compile, parse_condition_date};
pub use executor::execute;
pub use filter::{Predicate, SessionFilter};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, PagedResult};
pub use sort::{SortField, SortSpec};
