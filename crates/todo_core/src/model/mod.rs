//! Domain model for persisted to-do entries.
//!
//! # Responsibility
//! - Define the task record shared by repository, service and controller.
//! - Own title validation so every write path applies the same rule.
//!
//! # Invariants
//! - A task identifier is assigned by the store and never reused.

pub mod task;
