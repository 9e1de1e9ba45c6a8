//! EntityService integration tests.
//!
//! Drives the mutation pipeline end to end over a derived `Customer` entity:
//! - Create, find, update and delete
//! - Merge patches, including rejected ones that must leave storage untouched
//! - Store faults surfacing as typed failures with a cause
//! - Concurrent patches serialized by entity locks

mod support;
mod lifecycle;
mod concurrency;
