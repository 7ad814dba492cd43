//! Session domain module.
//!
//! Sessions are the filterable entity: timed events carrying tags, speakers
//! and a location. The engine only ever reads them.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `Tag`, `Speaker`
//! - `repository`: `SessionIndex` (the read-side query capability) and
//!   `TagRepository`

mod model;
pub mod repository;

pub use model::{Session, SessionId, Speaker, SpeakerId, Tag, TagId};
pub use repository::{SessionIndex, TagRepository};
