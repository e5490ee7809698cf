//! To-do list menu loop

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use deskutils_core::{CoreError, Prompter, Result};
use tracing::{info, warn};

use crate::tasks::{TaskList, MAX_TASKS};

/// Default task file name
pub const DEFAULT_TASK_FILE: &str = "tasks.txt";

/// To-do list configuration
#[derive(Debug, Clone)]
pub struct TodoConfig {
    /// Task file location
    pub path: PathBuf,

    /// Maximum number of tasks
    pub capacity: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TASK_FILE),
            capacity: MAX_TASKS,
        }
    }
}

impl TodoConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

const MENU: &str = "\n--- TO-DO LIST MENU ---\n\
1. View Tasks\n\
2. Add Task\n\
3. Mark Task as Done\n\
4. Remove Task\n\
5. Save & Exit\n\
------------------------\n\
Enter your choice: ";

/// Run the menu until "Save & Exit" or end of input
///
/// Returns true when the list was saved on the way out.
pub fn run<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, tasks: &mut TaskList, path: &Path) -> Result<bool> {
    loop {
        let choice = match prompter.ask::<u32>(MENU) {
            Ok(choice) => choice,
            Err(CoreError::InvalidInput(_)) => {
                writeln!(prompter.out(), "Invalid choice. Try again.")?;
                continue;
            }
            Err(CoreError::EndOfInput) => break,
            Err(e) => return Err(e),
        };

        let outcome = match choice {
            1 => write!(prompter.out(), "{}", tasks.render()).map_err(CoreError::from),
            2 => add_task(prompter, tasks),
            3 => mark_done(prompter, tasks),
            4 => remove_task(prompter, tasks),
            5 => match tasks.save(path) {
                Ok(()) => {
                    info!("Saved {} tasks to {}", tasks.len(), path.display());
                    writeln!(prompter.out(), "Tasks saved. Goodbye!")?;
                    return Ok(true);
                }
                Err(e) => {
                    warn!("Failed to save {}: {}", path.display(), e);
                    writeln!(prompter.out(), "Error saving tasks!")?;
                    Ok(())
                }
            },
            _ => writeln!(prompter.out(), "Invalid choice. Try again.").map_err(CoreError::from),
        };

        match outcome {
            Ok(()) => {}
            Err(CoreError::EndOfInput) => break,
            Err(e) => return Err(e),
        }
    }

    warn!("Input closed before Save & Exit; {} unsaved", path.display());
    Ok(false)
}

fn add_task<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, tasks: &mut TaskList) -> Result<()> {
    if tasks.len() >= tasks.capacity() {
        writeln!(prompter.out(), "Task list full!")?;
        return Ok(());
    }

    let description = prompter.ask_line("Enter new task: ")?;
    match tasks.add(description) {
        Ok(()) => writeln!(prompter.out(), "Task added!")?,
        Err(CoreError::CapacityExceeded { .. }) => writeln!(prompter.out(), "Task list full!")?,
        Err(e) => return Err(e),
    }
    Ok(())
}

/// List tasks, then read a 1-based task number
fn ask_task_number<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    tasks: &TaskList,
    msg: &str,
) -> Result<Option<usize>> {
    write!(prompter.out(), "{}", tasks.render())?;
    match prompter.ask::<usize>(msg) {
        Ok(number) => Ok(Some(number)),
        Err(CoreError::InvalidInput(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn mark_done<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, tasks: &mut TaskList) -> Result<()> {
    let number = ask_task_number(prompter, tasks, "\nEnter task number to mark as done: ")?;
    match number.map(|n| tasks.mark_done(n)) {
        Some(Ok(())) => writeln!(prompter.out(), "Task marked as completed!")?,
        Some(Err(CoreError::InvalidIndex { .. })) | None => writeln!(prompter.out(), "Invalid task number!")?,
        Some(Err(e)) => return Err(e),
    }
    Ok(())
}

fn remove_task<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, tasks: &mut TaskList) -> Result<()> {
    let number = ask_task_number(prompter, tasks, "\nEnter task number to remove: ")?;
    match number.map(|n| tasks.remove(n)) {
        Some(Ok(_)) => writeln!(prompter.out(), "Task removed.")?,
        Some(Err(CoreError::InvalidIndex { .. })) | None => writeln!(prompter.out(), "Invalid task number!")?,
        Some(Err(e)) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn session(input: impl AsRef<[u8]>, tasks: &mut TaskList, path: &Path) -> (bool, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_ref().to_vec()), Vec::new());
        let saved = run(&mut prompter, tasks, path).unwrap();
        (saved, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn test_buy_milk_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::default();

        let (saved, out) = session("2\nbuy milk\n3\n1\n5\n", &mut tasks, &path);

        assert!(saved);
        assert!(out.contains("Task added!"));
        assert!(out.contains("Task marked as completed!"));
        assert!(out.ends_with("Tasks saved. Goodbye!\n"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[x] buy milk\n");
    }

    #[test]
    fn test_latin1_description_keeps_menu_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::default();

        let (saved, out) = session(b"2\nkeep me\n2\ncaf\xE9\n5\n", &mut tasks, &path);

        assert!(saved);
        assert_eq!(out.matches("Task added!").count(), 2);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks.tasks()[1].description, "caf\u{FFFD}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\ncaf\u{FFFD}\n");
    }

    #[test]
    fn test_view_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::parse("one\n[x] two\nthree\n", MAX_TASKS).unwrap();

        let (saved, out) = session("1\n4\n2\n5\n", &mut tasks, &path);

        assert!(saved);
        assert!(out.contains("2. [x] two"));
        assert!(out.contains("Task removed."));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\nthree\n");
    }

    #[test]
    fn test_invalid_task_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::default();
        tasks.add("solo").unwrap();

        let (_, out) = session("3\n5\n4\nzero\n3\n0\n", &mut tasks, &path);

        assert_eq!(out.matches("Invalid task number!").count(), 3);
        assert_eq!(tasks.len(), 1);
        assert!(!tasks.tasks()[0].completed);
    }

    #[test]
    fn test_full_list_rejects_add() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::with_capacity(1);
        tasks.add("first").unwrap();

        // No description is read once the list is full
        let (_, out) = session("2\n9\n", &mut tasks, &path);

        assert!(out.contains("Task list full!"));
        assert!(out.contains("Invalid choice. Try again."));
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_end_of_input_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::default();

        let (saved, _) = session("2\nunsaved\n", &mut tasks, &path);

        assert!(!saved);
        assert_eq!(tasks.len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_menu_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        let mut tasks = TaskList::default();

        let (_, out) = session("abc\n1\n", &mut tasks, &path);

        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.contains("No tasks found."));
    }
}
