//! Domain models for mdtasks
//!
//! Contains the task records produced by the parser, without any I/O concerns.

mod task;

pub use task::{Task, Tasks};
