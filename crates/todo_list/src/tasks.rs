//! Task list model and its flat-file encoding
//!
//! File format: one task per line, completed tasks prefixed with `[x] `.

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use deskutils_core::{read_lossy, CoreError, Result};
use tracing::debug;

/// Maximum number of tasks held at once
pub const MAX_TASKS: usize = 100;

/// Prefix marking a completed task in the file
const DONE_PREFIX: &str = "[x] ";

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub completed: bool,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
        }
    }

    fn from_line(line: &str) -> Self {
        match line.strip_prefix(DONE_PREFIX) {
            Some(rest) => Self {
                description: rest.to_string(),
                completed: true,
            },
            None => Self::new(line),
        }
    }
}

/// Ordered, bounded task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    capacity: usize,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::with_capacity(MAX_TASKS)
    }
}

impl TaskList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: Vec::new(),
            capacity,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Parse file content
    ///
    /// # Errors
    /// - `CapacityExceeded` when the text holds more lines than `capacity`
    pub fn parse(text: &str, capacity: usize) -> Result<Self> {
        let mut list = Self::with_capacity(capacity);
        for line in text.lines() {
            list.push(Task::from_line(line))?;
        }
        Ok(list)
    }

    /// Encode as file content, every line newline-terminated
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for task in &self.tasks {
            let prefix = if task.completed { DONE_PREFIX } else { "" };
            let _ = writeln!(out, "{}{}", prefix, task.description);
        }
        out
    }

    /// Load from `path`; a missing file yields an empty list
    ///
    /// Invalid UTF-8 in a description is replaced, not rejected.
    pub fn load(path: &Path, capacity: usize) -> Result<Self> {
        match read_lossy(path) {
            Ok(text) => {
                let list = Self::parse(&text, capacity)?;
                debug!("Loaded {} tasks from {}", list.len(), path.display());
                Ok(list)
            }
            Err(CoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Ok(Self::with_capacity(capacity))
            }
            Err(e) => Err(e),
        }
    }

    /// Rewrite the whole file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.serialize())?;
        debug!("Saved {} tasks to {}", self.len(), path.display());
        Ok(())
    }

    /// Append a new, not yet completed task
    pub fn add(&mut self, description: impl Into<String>) -> Result<()> {
        self.push(Task::new(description))
    }

    /// Mark task `number` (1-based) completed
    pub fn mark_done(&mut self, number: usize) -> Result<()> {
        let index = self.index_of(number)?;
        self.tasks[index].completed = true;
        Ok(())
    }

    /// Remove task `number` (1-based); later tasks shift up by one
    pub fn remove(&mut self, number: usize) -> Result<Task> {
        let index = self.index_of(number)?;
        Ok(self.tasks.remove(index))
    }

    /// Console listing
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "\nNo tasks found.\n".to_string();
        }
        let mut out = String::from("\n--- TO-DO LIST ---\n");
        for (i, task) in self.tasks().iter().enumerate() {
            let mark = if task.completed { 'x' } else { ' ' };
            let _ = writeln!(out, "{}. [{}] {}", i + 1, mark, task.description);
        }
        out
    }

    fn push(&mut self, task: Task) -> Result<()> {
        if self.tasks.len() >= self.capacity {
            return Err(CoreError::CapacityExceeded {
                what: "Task",
                max: self.capacity,
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    fn index_of(&self, number: usize) -> Result<usize> {
        if number == 0 || number > self.tasks.len() {
            return Err(CoreError::InvalidIndex {
                index: number,
                len: self.tasks.len(),
            });
        }
        Ok(number - 1)
    }
}
