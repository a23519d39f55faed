//! In-memory stores for local development and tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Person, Task};
use crate::repository::{PersonRepository, TaskRepository};

#[derive(Default)]
pub struct InMemoryPersonRepository {
    people: RwLock<Vec<Person>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        Self {
            people: RwLock::new(people.into_iter().collect()),
        }
    }

    /// Add or replace a person.
    pub async fn insert(&self, person: Person) {
        let mut people = self.people.write().await;
        match people.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => *existing = person,
            None => people.push(person),
        }
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Person>> {
        let people = self.people.read().await;
        Ok(people.iter().find(|p| p.id == id).cloned())
    }
}

/// Tasks kept in insertion order.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        tasks.iter().filter(|&t| predicate(t)).cloned().collect()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskResult<Task> {
        let task = task.into_task(Uuid::now_v7());
        self.tasks.write().await.push(task.clone());

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| TaskError::task_not_found(task.id))?;
        slot.title = task.title;
        slot.description = task.description;
        slot.deadline = task.deadline;
        slot.done = task.done;

        tracing::info!(task_id = %slot.id, "Updated task");
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        let deleted = tasks.len() < before;
        if deleted {
            tracing::info!(task_id = %id, "Deleted task");
        }
        Ok(deleted)
    }

    async fn find_by_person_id(&self, person_id: Uuid) -> TaskResult<Vec<Task>> {
        Ok(self
            .select(|t| t.person.as_ref().is_some_and(|p| p.id == person_id))
            .await)
    }

    async fn find_by_deadline_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TaskResult<Vec<Task>> {
        Ok(self
            .select(|t| start <= t.deadline && t.deadline <= end)
            .await)
    }

    async fn find_by_person_is_null(&self) -> TaskResult<Vec<Task>> {
        Ok(self.select(|t| t.person.is_none()).await)
    }

    async fn find_unfinished_and_overdue(&self, today: NaiveDate) -> TaskResult<Vec<Task>> {
        Ok(self.select(|t| !t.done && t.deadline < today).await)
    }
}
