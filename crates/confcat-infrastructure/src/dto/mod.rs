//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs are the versioned on-disk schema of the catalog snapshot. They
//! stay private to the infrastructure layer so the domain model can evolve
//! independently of the storage format.
//!
//! ### Catalog Version History
//! - **1.0.0**: Categories, tags, speakers and sessions with link id lists
//! - **1.1.0**: Added persisted id counters

mod catalog;

pub use catalog::{
    CatalogV1_0_0, CatalogV1_1_0, SessionRecordV1_0_0, create_catalog_migrator,
};
