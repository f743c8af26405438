//! mdtasks - task definitions from markdown documents
//!
//! Reads the Tasks section of a markdown document (usually a README) and
//! produces an ordered list of task records: name, description, script and
//! attributes such as dependencies and environment. Running the tasks is
//! left to the consumer.

pub mod domain;
pub mod parser;
pub mod storage;
pub mod cli;

pub use domain::{Task, Tasks};
pub use parser::{is_no_tasks_title, ParseError, Parser};
