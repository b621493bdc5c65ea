//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the task data access contract used by services.
//! - Isolate SQLite query details from service/controller orchestration.
//!
//! # Invariants
//! - Repository writes must validate titles before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;
