//! Domain types and pure logic shared across the CodeSense backend.
//!
//! Everything here is independent of the HTTP layer, the database, and the
//! upstream model client: the report schema, response normalization,
//! submission validation, and the ownership check.

pub mod error;
pub mod normalize;
pub mod ownership;
pub mod report;
pub mod submission;
pub mod types;
