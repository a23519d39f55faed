use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Someone who can own tasks. Read-only from the task service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

impl Person {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A persisted task, hydrated with its owner when it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub done: bool,
    pub person: Option<Person>,
}

impl Task {
    /// Overwrite the editable fields; id and owner are left untouched.
    pub fn apply_form(&mut self, form: &TaskForm) {
        self.title.clone_from(&form.title);
        self.description.clone_from(&form.description);
        self.deadline = form.deadline;
        self.done = form.done;
    }
}

/// A task that has not been stored yet. The store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub done: bool,
    pub person: Option<Person>,
}

impl NewTask {
    pub fn new(form: TaskForm, owner: Person) -> Self {
        Self {
            title: form.title,
            description: form.description,
            deadline: form.deadline,
            done: form.done,
            person: Some(owner),
        }
    }
}

/// Reference to a person by id, as carried in a [`TaskForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonRef {
    pub id: Uuid,
}

/// Client input for create and update.
///
/// `id` is ignored on create and required on update. `person` is required on
/// create and ignored on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub deadline: NaiveDate,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonView {
    pub id: Uuid,
    pub name: String,
}

/// Outward representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub deadline: NaiveDate,
    pub done: bool,
    /// Present whenever the task has an owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonView>,
}

/// Inclusive deadline window
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeadlineRange {
    /// First day of the window (YYYY-MM-DD)
    #[param(value_type = String, format = Date, example = "2024-05-01")]
    pub start: NaiveDate,
    /// Last day of the window (YYYY-MM-DD)
    #[param(value_type = String, format = Date, example = "2024-05-31")]
    pub end: NaiveDate,
}
