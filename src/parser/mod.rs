//! # Markdown Task Parser
//!
//! Reads a markdown document and extracts the tasks declared under its
//! Tasks section.
//!
//! ## Document Shape
//!
//! ~~~text
//! # Tasks                  <- section title, any level, any case
//!
//! ## build                 <- every later heading starts a task
//!
//! Builds the project.      <- description line
//!
//! Requires: generate       <- attribute line
//! Env: PROFILE=release
//!
//! ```sh                    <- fenced script, stored verbatim
//! cargo build
//! ```
//! ~~~
//!
//! ## Attributes
//!
//! | Field | Aliases (any case) | Repeats |
//! |-------|--------------------|---------|
//! | `env` | `env`, `environment` | accumulate |
//! | `depends_on` | `req`, `requires` | accumulate |
//! | `inputs` | `input`, `inputs` | accumulate |
//! | `dir` | `dir`, `directory` | last wins |
//!
//! ## Errors
//!
//! A document without the section title fails with
//! [`ParseError::NoTasksTitle`]. Lines that look almost like attributes are
//! treated as description text rather than rejected.

mod attribute;
mod lines;
mod markup;
mod state;

use std::io::{self, BufRead};

use thiserror::Error;

use crate::domain::{Task, Tasks};

pub use attribute::{classify, Assignment, Attribute};
pub use lines::LineSource;
pub use markup::strip_markup;
pub use state::{heading, transition, Action, Fence, State};

/// Section title used when none is configured
pub const DEFAULT_HEADING: &str = "Tasks";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no {heading} section found")]
    NoTasksTitle { heading: String },

    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Returns true if this is the missing-section error
    pub fn is_no_tasks_title(&self) -> bool {
        matches!(self, ParseError::NoTasksTitle { .. })
    }
}

/// Returns true if the missing-section error appears anywhere in the chain
pub fn is_no_tasks_title(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ParseError>()
            .is_some_and(ParseError::is_no_tasks_title)
    })
}

/// Single-pass parser over one document
pub struct Parser<R> {
    lines: LineSource<R>,
    heading: String,
    state: State,
    current: Option<Task>,
    tasks: Tasks,
}

impl<R: BufRead> Parser<R> {
    /// Creates a parser that looks for a `Tasks` section
    pub fn new(reader: R) -> Result<Self, ParseError> {
        Self::with_heading(reader, DEFAULT_HEADING)
    }

    /// Creates a parser that looks for a section with the given title
    pub fn with_heading(reader: R, heading: impl Into<String>) -> Result<Self, ParseError> {
        Ok(Self {
            lines: LineSource::new(reader)?,
            heading: heading.into(),
            state: State::default(),
            current: None,
            tasks: Tasks::new(),
        })
    }

    /// Parses the rest of the document into tasks, in heading order
    pub fn parse(mut self) -> Result<Tasks, ParseError> {
        while let Some(line) = self.lines.current() {
            let (next, action) = transition(self.state, line, &self.heading);

            match action {
                Action::Skip | Action::EnterSection => {}
                Action::StartTask(name) => {
                    let task = Task::new(name);
                    self.finish_task();
                    self.current = Some(task);
                }
                Action::Script => {
                    if let Some(task) = self.current.as_mut() {
                        task.script.push_str(line);
                    }
                }
                Action::Assign(assignment) => {
                    if let Some(task) = self.current.as_mut() {
                        assignment.apply(task);
                    }
                }
                Action::Describe(text) => {
                    if let Some(task) = self.current.as_mut() {
                        task.description.push(text.to_string());
                    }
                }
            }

            self.state = next;
            self.lines.advance()?;
        }

        if !self.state.in_section() {
            return Err(ParseError::NoTasksTitle {
                heading: self.heading,
            });
        }

        self.finish_task();
        Ok(self.tasks)
    }

    /// Moves the task in progress into the result. A task without a name
    /// only exists if attributes were probed before any heading; it is
    /// discarded.
    fn finish_task(&mut self) {
        if let Some(done) = self.current.take().filter(|t| !t.name.is_empty()) {
            self.tasks.push(done);
        }
    }

    /// Tries to read the current line as an attribute.
    ///
    /// Returns whether it matched. A match is applied to the task in
    /// progress, starting an unnamed one if no heading has been seen yet.
    /// The line is not consumed.
    pub fn parse_attribute(&mut self) -> bool {
        let Some(assignment) = self.lines.current().and_then(classify) else {
            return false;
        };

        assignment.apply(self.current.get_or_insert_with(Task::default));
        true
    }

    /// The task currently being built
    pub fn current_task(&self) -> Option<&Task> {
        self.current.as_ref()
    }
}
