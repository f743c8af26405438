//! Task inspection commands (list, show)

use anyhow::Result;

use super::output::Output;
use crate::domain::{Task, Tasks};

/// List all tasks with their first description line
pub fn list(output: &Output, tasks: &Tasks) -> Result<()> {
    output.verbose_ctx("list", &format!("Listing {} tasks", tasks.len()));

    if output.is_json() {
        let items: Vec<_> = tasks
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.summary().unwrap_or_default(),
                    "depends_on": t.depends_on,
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks defined.");
        return Ok(());
    }

    let width = tasks.names().map(str::len).max().unwrap_or(0).max(4);
    println!("{:<width$}  DESCRIPTION", "NAME", width = width);
    println!("{}", "-".repeat(width + 40));
    for task in tasks.iter() {
        println!(
            "{:<width$}  {}",
            task.name,
            task.summary().unwrap_or_default(),
            width = width
        );
    }

    Ok(())
}

/// Show every field of one task
pub fn show(output: &Output, tasks: &Tasks, name: &str) -> Result<()> {
    let task = tasks
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", name))?;

    output.verbose_ctx("show", &format!("Found task '{}'", task.name));

    if output.is_json() {
        output.data(task);
    } else {
        print!("{}", render(task));
    }

    Ok(())
}

/// Renders a task as human-readable text
fn render(task: &Task) -> String {
    let mut out = format!("{}\n", task.name);

    for line in &task.description {
        out.push_str(&format!("  {}\n", line));
    }

    let fields = [
        ("Requires", task.depends_on.join(", ")),
        ("Env", task.env.join(", ")),
        ("Inputs", task.inputs.join(", ")),
        ("Dir", task.dir.clone()),
    ];
    let fields: Vec<_> = fields.iter().filter(|(_, v)| !v.is_empty()).collect();
    if !fields.is_empty() {
        out.push('\n');
        for (label, value) in fields {
            out.push_str(&format!("  {}: {}\n", label, value));
        }
    }

    if task.has_script() {
        out.push('\n');
        for line in task.script.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn render_full_task() {
        let task = Task {
            name: "hello".to_string(),
            description: vec!["Print a message".to_string()],
            script: "echo hi\necho there\n".to_string(),
            env: vec!["A=1".to_string()],
            depends_on: vec!["list".to_string(), "list2".to_string()],
            inputs: vec![],
            dir: "./sub".to_string(),
        };

        let expected = "hello\n  Print a message\n\n  Requires: list, list2\n  Env: A=1\n  Dir: ./sub\n\n    echo hi\n    echo there\n";
        assert_eq!(render(&task), expected);
    }

    #[test]
    fn render_bare_task() {
        assert_eq!(render(&Task::new("noop")), "noop\n");
    }

    #[test]
    fn show_unknown_task_fails() {
        let output = Output::new(OutputFormat::Text, false);
        let err = show(&output, &Tasks::new(), "missing").unwrap_err();
        assert_eq!(err.to_string(), "Task not found: missing");
    }
}
