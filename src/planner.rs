use crate::error::{Field, ValidationError};
use crate::task::Task;
use tracing::{debug, trace, warn};

/// Current values of the input form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub description: String,
    pub deadline: String,
    pub category: String,
}

impl TaskForm {
    pub fn clear(&mut self) {
        self.description.clear();
        self.deadline.clear();
        self.category.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.deadline.is_empty() && self.category.is_empty()
    }

    fn load(&mut self, task: &Task) {
        self.description = task.description.clone();
        self.deadline = task.deadline.clone();
        self.category = task.category_str().to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedNotice {
    Added,
    Updated,
}

impl SavedNotice {
    pub fn message(self) -> &'static str {
        match self {
            SavedNotice::Added => "Task added",
            SavedNotice::Updated => "Task updated",
        }
    }
}

/// Ordered task list plus the transient form, edit cursor and search state
/// of the planner screen.
///
/// The edit cursor is `None` or a valid index into `tasks()`; every mutation
/// below keeps it that way.
#[derive(Debug)]
pub struct Planner {
    tasks: Vec<Task>,
    form: TaskForm,
    edit_cursor: Option<usize>,
    search_query: String,
    notice: Option<SavedNotice>,
    require_category: bool,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            form: TaskForm::default(),
            edit_cursor: None,
            search_query: String::new(),
            notice: None,
            require_category: true,
        }
    }

    /// Whether a blank category rejects a submission. When it doesn't, a
    /// blank category is stored as `None`.
    pub fn category_required(mut self, required: bool) -> Self {
        self.require_category = required;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn edit_cursor(&self) -> Option<usize> {
        self.edit_cursor
    }

    pub fn is_editing(&self) -> bool {
        self.edit_cursor.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update"
        } else {
            "Add"
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn notice(&self) -> Option<SavedNotice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.form.description = value.into();
    }

    pub fn set_deadline(&mut self, value: impl Into<String>) {
        self.form.deadline = value.into();
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.form.category = value.into();
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Submits the current form values.
    pub fn submit(&mut self) -> Result<SavedNotice, ValidationError> {
        let TaskForm {
            description,
            deadline,
            category,
        } = self.form.clone();
        self.add_or_update(&description, &deadline, Some(&category))
    }

    /// Appends a new task, or replaces the one being edited in place.
    ///
    /// A blank required field leaves the list, the cursor and the form
    /// untouched.
    pub fn add_or_update(
        &mut self,
        description: &str,
        deadline: &str,
        category: Option<&str>,
    ) -> Result<SavedNotice, ValidationError> {
        if is_blank(description) {
            return Err(ValidationError::Blank(Field::Description));
        }
        if is_blank(deadline) {
            return Err(ValidationError::Blank(Field::Deadline));
        }
        let category = category.filter(|c| !is_blank(c));
        if self.require_category && category.is_none() {
            return Err(ValidationError::Blank(Field::Category));
        }

        let task = Task::new(description, deadline, category.map(str::to_string));
        let notice = match self.edit_cursor.take() {
            Some(index) => match self.tasks.get_mut(index) {
                Some(slot) => {
                    debug!(index, "task updated");
                    *slot = task;
                    SavedNotice::Updated
                }
                None => {
                    warn!(index, len = self.tasks.len(), "edit cursor out of range, appending");
                    self.tasks.push(task);
                    SavedNotice::Added
                }
            },
            None => {
                self.tasks.push(task);
                debug!(index = self.tasks.len() - 1, "task added");
                SavedNotice::Added
            }
        };

        self.form.clear();
        self.notice = Some(notice);
        Ok(notice)
    }

    /// Loads the task at `index` into the form and marks it as being edited.
    pub fn begin_edit(&mut self, index: usize) -> Option<&Task> {
        let Some(task) = self.tasks.get(index) else {
            debug!(index, len = self.tasks.len(), "edit ignored, index out of range");
            return None;
        };
        self.form.load(task);
        self.edit_cursor = Some(index);
        debug!(index, "editing task");
        Some(task)
    }

    /// Drops the edit in progress, if any, and clears the form.
    pub fn cancel_edit(&mut self) {
        if self.edit_cursor.take().is_some() {
            self.form.clear();
        }
    }

    /// Removes the task at `index`, keeping the edit cursor on the same
    /// logical task. Deleting the task under edit ends the edit.
    pub fn delete(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            debug!(index, len = self.tasks.len(), "delete ignored, index out of range");
            return None;
        }
        let removed = self.tasks.remove(index);

        match self.edit_cursor {
            Some(cursor) if cursor == index => {
                self.edit_cursor = None;
                self.form.clear();
            }
            Some(cursor) if cursor > index => self.edit_cursor = Some(cursor - 1),
            _ => {}
        }

        debug!(index, cursor = ?self.edit_cursor, "task deleted");
        Some(removed)
    }

    /// Tasks whose description, deadline or category contains `query`,
    /// ignoring case. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Task> {
        self.filter(query).map(|(_, task)| task).collect()
    }

    /// Search results for the stored query, each paired with its index in
    /// the full list.
    pub fn visible(&self) -> Vec<(usize, &Task)> {
        self.filter(&self.search_query).collect()
    }

    fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        let needle = query.to_lowercase();
        trace!(query, "filtering tasks");
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| needle.is_empty() || task.matches(&needle))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
