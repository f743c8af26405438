//! Task domain model
//!
//! A task is one named unit of work declared under the Tasks section of a
//! markdown document. Dependencies are kept as unresolved names; resolving
//! and running them belongs to whatever consumes the parsed records.

use serde::{Deserialize, Serialize};

/// A single task definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Heading text that introduced the task (trimmed)
    pub name: String,

    /// Prose lines from the task body, in document order
    #[serde(default)]
    pub description: Vec<String>,

    /// Verbatim contents of the fenced code block, fence lines excluded
    #[serde(default)]
    pub script: String,

    /// Environment assignments, one per attribute line
    #[serde(default)]
    pub env: Vec<String>,

    /// Names of tasks that must run first
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// External inputs the task expects
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Working directory (empty when unset)
    #[serde(default)]
    pub dir: String,
}

impl Task {
    /// Creates an empty task with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns true if the task has a script to run
    pub fn has_script(&self) -> bool {
        !self.script.is_empty()
    }

    /// Returns the first description line, if any
    pub fn summary(&self) -> Option<&str> {
        self.description.first().map(String::as_str)
    }
}

/// Ordered collection of tasks, in the order their headings appear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tasks(Vec<Task>);

impl Tasks {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a finished task
    pub fn push(&mut self, task: Task) {
        self.0.push(task);
    }

    /// Finds the first task with the given name
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.0.iter().find(|t| t.name == name)
    }

    /// Task names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.name.as_str())
    }
}

impl From<Vec<Task>> for Tasks {
    fn from(tasks: Vec<Task>) -> Self {
        Self(tasks)
    }
}

impl std::ops::Deref for Tasks {
    type Target = [Task];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_empty() {
        let task = Task::new("build");
        assert_eq!(task.name, "build");
        assert!(task.description.is_empty());
        assert!(!task.has_script());
        assert!(task.dir.is_empty());
        assert_eq!(task.summary(), None);
    }

    #[test]
    fn summary_is_first_description_line() {
        let mut task = Task::new("build");
        task.description.push("Builds the project".to_string());
        task.description.push("Second line".to_string());
        assert_eq!(task.summary(), Some("Builds the project"));
    }

    #[test]
    fn tasks_preserve_order_and_lookup() {
        let tasks = Tasks::from(vec![Task::new("b"), Task::new("a"), Task::new("b")]);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks.names().collect::<Vec<_>>(), vec!["b", "a", "b"]);
        assert_eq!(tasks.get("a").map(|t| t.name.as_str()), Some("a"));
        assert!(tasks.get("missing").is_none());
    }

    #[test]
    fn serializes_as_array() {
        let mut task = Task::new("hello");
        task.depends_on.push("list".to_string());
        let tasks = Tasks::from(vec![task]);

        let json = serde_json::to_value(&tasks).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "hello");
        assert_eq!(json[0]["depends_on"][0], "list");
        assert_eq!(json[0]["script"], "");
    }
}
