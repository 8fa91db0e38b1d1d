//! venuesync — in-memory synchronization of a venue's branch/reservation
//! data against a remote service.
//!
//! One process-wide [`sync::BranchStore`] holds the canonical branch list;
//! [`sync::FetchCoordinator`] populates it with single-flight semantics and
//! [`sync::MutationCoordinator`] applies single and bulk writes with a
//! consistency refresh. [`slots`] validates reservation time slots against
//! branch opening hours. Transport, auth and presentation stay outside: the
//! crate consumes a [`repository::BranchRepository`] and a
//! [`report::ErrorReporter`].

pub mod model;
pub mod observability;
pub mod report;
pub mod repository;
pub mod slots;
pub mod sync;
