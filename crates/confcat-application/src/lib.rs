//! Application layer for confcat.
//!
//! Use cases coordinating the category store and the session index, plus the
//! DTOs they return.

mod cancel;
pub mod category_service;
pub mod category_session_usecase;
pub mod dto;
pub mod tag_service;

pub use category_service::CategoryService;
pub use category_session_usecase::CategorySessionUseCase;
pub use dto::{CategoryDto, ConditionDto, PagedSessionsDto, SessionDto, SpeakerDto, TagDto};
pub use tag_service::TagService;
