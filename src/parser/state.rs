//! Line-by-line parser state machine
//!
//! [`transition`] is a pure function from the current [`State`] and one input
//! line to the next state plus an [`Action`] for the parser to apply to the
//! task under construction.

use super::attribute::{classify, Assignment};

/// An open code fence: the marker character and how many of them opened it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    /// Recognizes an opening fence (three or more backticks or tildes,
    /// optionally followed by an info string)
    pub fn open(line: &str) -> Option<Self> {
        let line = strip_indent(line)?;
        let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = line.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }

        // A backtick info string may not itself contain backticks
        let info = &line[len..];
        if marker == '`' && info.contains('`') {
            return None;
        }

        Some(Self { marker, len })
    }

    /// Returns true if the line closes this fence
    pub fn closes(&self, line: &str) -> bool {
        let Some(line) = strip_indent(line) else {
            return false;
        };
        let line = line.trim_end();
        let len = line.chars().take_while(|c| *c == self.marker).count();

        len >= self.len && len == line.chars().count()
    }
}

/// Where the parser is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Before the section heading; fenced blocks are skipped whole so a
    /// heading inside one is not mistaken for the section title
    Preamble { fence: Option<Fence> },
    /// Inside the section, before the first task heading
    OutsideTask,
    /// Inside a task body
    InTaskBody,
    /// Inside a fenced block of a task body
    InCodeFence(Fence),
}

impl Default for State {
    fn default() -> Self {
        State::Preamble { fence: None }
    }
}

impl State {
    /// Returns true once the section heading has been seen
    pub fn in_section(&self) -> bool {
        !matches!(self, State::Preamble { .. })
    }
}

/// What the parser should do with a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Nothing to record
    Skip,
    /// The section heading was found
    EnterSection,
    /// Finish the current task, if any, and start a new one with this name
    StartTask(&'a str),
    /// Append the raw line to the script
    Script,
    /// Apply an attribute to the current task
    Assign(Assignment<'a>),
    /// Add a description line to the current task
    Describe(&'a str),
}

/// Computes the next state and action for one line.
///
/// `section` is the title of the tasks section, matched without regard to case.
pub fn transition<'a>(state: State, line: &'a str, section: &str) -> (State, Action<'a>) {
    match state {
        State::Preamble { fence: Some(fence) } => {
            if fence.closes(line) {
                (State::Preamble { fence: None }, Action::Skip)
            } else {
                (state, Action::Skip)
            }
        }

        State::Preamble { fence: None } => {
            if let Some(fence) = Fence::open(line) {
                return (State::Preamble { fence: Some(fence) }, Action::Skip);
            }
            match heading(line) {
                Some(text) if text.eq_ignore_ascii_case(section) => {
                    (State::OutsideTask, Action::EnterSection)
                }
                _ => (state, Action::Skip),
            }
        }

        State::OutsideTask => match heading(line) {
            Some(name) => (State::InTaskBody, Action::StartTask(name)),
            None => (state, Action::Skip),
        },

        State::InTaskBody => {
            if let Some(name) = heading(line) {
                return (State::InTaskBody, Action::StartTask(name));
            }
            if let Some(fence) = Fence::open(line) {
                return (State::InCodeFence(fence), Action::Skip);
            }

            let text = line.trim();
            if text.is_empty() {
                return (state, Action::Skip);
            }

            match classify(text) {
                Some(assignment) => (state, Action::Assign(assignment)),
                None => (state, Action::Describe(text)),
            }
        }

        State::InCodeFence(fence) => {
            if fence.closes(line) {
                (State::InTaskBody, Action::Skip)
            } else {
                (state, Action::Script)
            }
        }
    }
}

/// Returns the text of an ATX heading (`#` to `######`), or `None` if the
/// line is not one or its text is empty
pub fn heading(line: &str) -> Option<&str> {
    let line = strip_indent(line)?;
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let text = rest.trim();
    // Optional closing sequence, as in `## build ##`
    let unclosed = text.trim_end_matches('#');
    let text = if unclosed.is_empty() || unclosed.ends_with(char::is_whitespace) {
        unclosed.trim_end()
    } else {
        text
    };

    (!text.is_empty()).then_some(text)
}

/// Strips up to three spaces of indentation; more makes an indented code line
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent <= 3).then(|| &line[indent..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::attribute::Attribute;

    const SECTION: &str = "Tasks";

    fn fence(line: &str) -> Fence {
        Fence::open(line).unwrap()
    }

    #[test]
    fn recognizes_headings() {
        assert_eq!(heading("# Tasks\n"), Some("Tasks"));
        assert_eq!(heading("### list"), Some("list"));
        assert_eq!(heading("   ## indented  \r\n"), Some("indented"));
        assert_eq!(heading("## build ##\n"), Some("build"));
        assert_eq!(heading("## C#\n"), Some("C#"));
    }

    #[test]
    fn rejects_non_headings() {
        assert_eq!(heading("#hashtag"), None);
        assert_eq!(heading("####### seven"), None);
        assert_eq!(heading("    # indented code"), None);
        assert_eq!(heading("##\n"), None);
        assert_eq!(heading("## ##\n"), None);
        assert_eq!(heading("plain text"), None);
    }

    #[test]
    fn recognizes_fences() {
        assert!(Fence::open("```\n").is_some());
        assert!(Fence::open("```sh\n").is_some());
        assert!(Fence::open("~~~~ bash\n").is_some());
        assert!(Fence::open("``\n").is_none());
        assert!(Fence::open("```a`b\n").is_none());
        assert!(Fence::open("    ```\n").is_none());
    }

    #[test]
    fn fence_closes_only_with_matching_marker() {
        let backticks = fence("````\n");
        assert!(!backticks.closes("```\n"));
        assert!(!backticks.closes("~~~~\n"));
        assert!(!backticks.closes("```` sh\n"));
        assert!(backticks.closes("````\n"));
        assert!(backticks.closes("`````  \n"));
    }

    #[test]
    fn preamble_enters_section_on_title_any_case_any_level() {
        for line in ["# Tasks\n", "## tasks\n", "###### TASKS\n"] {
            let (state, action) = transition(State::default(), line, SECTION);
            assert_eq!(state, State::OutsideTask, "line: {:?}", line);
            assert_eq!(action, Action::EnterSection);
        }
    }

    #[test]
    fn preamble_ignores_other_lines() {
        for line in ["# Readme\n", "Tasks\n", "Env: x\n", "\n"] {
            let (state, action) = transition(State::default(), line, SECTION);
            assert_eq!(state, State::default());
            assert_eq!(action, Action::Skip);
        }
    }

    #[test]
    fn preamble_skips_headings_inside_fences() {
        let (state, _) = transition(State::default(), "```md\n", SECTION);
        assert_eq!(state, State::Preamble { fence: Some(fence("```")) });

        let (state, action) = transition(state, "## Tasks\n", SECTION);
        assert_eq!(action, Action::Skip);
        assert!(!state.in_section());

        let (state, _) = transition(state, "```\n", SECTION);
        assert_eq!(state, State::default());
    }

    #[test]
    fn custom_section_title() {
        let (state, action) = transition(State::default(), "## Commands\n", "commands");
        assert_eq!(state, State::OutsideTask);
        assert_eq!(action, Action::EnterSection);
    }

    #[test]
    fn outside_task_starts_task_on_heading() {
        let (state, action) = transition(State::OutsideTask, "### build\n", SECTION);
        assert_eq!(state, State::InTaskBody);
        assert_eq!(action, Action::StartTask("build"));

        let (state, action) = transition(State::OutsideTask, "Some intro\n", SECTION);
        assert_eq!(state, State::OutsideTask);
        assert_eq!(action, Action::Skip);
    }

    #[test]
    fn body_heading_starts_next_task() {
        let (state, action) = transition(State::InTaskBody, "## next\n", SECTION);
        assert_eq!(state, State::InTaskBody);
        assert_eq!(action, Action::StartTask("next"));
    }

    #[test]
    fn body_classifies_attributes_and_description() {
        let (state, action) = transition(State::InTaskBody, "Requires: list\n", SECTION);
        assert_eq!(state, State::InTaskBody);
        match action {
            Action::Assign(a) => {
                assert_eq!(a.attribute, Attribute::DependsOn);
                assert_eq!(a.value, "list");
            }
            other => panic!("expected assignment, got {:?}", other),
        }

        let (_, action) = transition(State::InTaskBody, "  Lists files  \n", SECTION);
        assert_eq!(action, Action::Describe("Lists files"));

        let (_, action) = transition(State::InTaskBody, "env value: x\n", SECTION);
        assert_eq!(action, Action::Describe("env value: x"));
    }

    #[test]
    fn body_skips_blank_lines() {
        for line in ["\n", "   \r\n", ""] {
            let (state, action) = transition(State::InTaskBody, line, SECTION);
            assert_eq!(state, State::InTaskBody);
            assert_eq!(action, Action::Skip);
        }
    }

    #[test]
    fn body_opens_fence() {
        let (state, action) = transition(State::InTaskBody, "```bash\n", SECTION);
        assert_eq!(state, State::InCodeFence(fence("```")));
        assert_eq!(action, Action::Skip);
    }

    #[test]
    fn fence_captures_everything_until_close() {
        let open = State::InCodeFence(fence("```"));
        for line in ["## not a task\n", "Env: x\n", "\n", "~~~\n"] {
            let (state, action) = transition(open, line, SECTION);
            assert_eq!(state, open);
            assert_eq!(action, Action::Script);
        }

        let (state, action) = transition(open, "```\n", SECTION);
        assert_eq!(state, State::InTaskBody);
        assert_eq!(action, Action::Skip);
    }
}
