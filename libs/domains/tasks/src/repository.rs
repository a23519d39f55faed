use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{NewTask, Person, Task};

/// Read access to people. The task service never writes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Person>>;
}

/// Task persistence.
///
/// Every returned [`Task`] carries its owner when it has one, and lists come
/// back in store order (creation order for both implementations).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task under a freshly assigned id
    async fn insert(&self, task: NewTask) -> TaskResult<Task>;

    /// Overwrite title, description, deadline and done of an existing task.
    /// The stored owner is kept.
    async fn save(&self, task: Task) -> TaskResult<Task>;

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// Returns `false` when nothing was deleted
    async fn delete_by_id(&self, id: Uuid) -> TaskResult<bool>;

    async fn find_by_person_id(&self, person_id: Uuid) -> TaskResult<Vec<Task>>;

    /// Tasks with `start <= deadline <= end`
    async fn find_by_deadline_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TaskResult<Vec<Task>>;

    async fn find_by_person_is_null(&self) -> TaskResult<Vec<Task>>;

    /// Tasks with `done = false` and `deadline < today`
    async fn find_unfinished_and_overdue(&self, today: NaiveDate) -> TaskResult<Vec<Task>>;
}
