use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, TaskForm, TaskView};
use crate::repository::{PersonRepository, TaskRepository};

/// Task use cases over a task store and a person store.
///
/// Holds no state of its own; share it behind an `Arc`.
pub struct TaskService<T: TaskRepository, P: PersonRepository> {
    tasks: Arc<T>,
    people: Arc<P>,
}

impl<T: TaskRepository, P: PersonRepository> TaskService<T, P> {
    pub fn new(tasks: T, people: P) -> Self {
        Self {
            tasks: Arc::new(tasks),
            people: Arc::new(people),
        }
    }

    /// Create a task owned by the person the form references.
    ///
    /// Nothing is stored when the form is invalid, has no person, or names an
    /// unknown person.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create(&self, form: TaskForm) -> TaskResult<TaskView> {
        form.validate()?;

        let person_id = form
            .person
            .map(|p| p.id)
            .ok_or(TaskError::MissingField("person"))?;

        let owner = self
            .people
            .find_by_id(person_id)
            .await?
            .ok_or_else(|| TaskError::person_not_found(person_id))?;

        let task = self.tasks.insert(NewTask::new(form, owner)).await?;
        Ok(task.into())
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn find_by_id(&self, id: Uuid) -> TaskResult<TaskView> {
        self.tasks
            .find_by_id(id)
            .await?
            .map(TaskView::from)
            .ok_or_else(|| TaskError::task_not_found(id))
    }

    /// Overwrite title, description, deadline and done of the task `form.id`.
    #[instrument(skip(self, form), fields(task_id = ?form.id))]
    pub async fn update(&self, form: TaskForm) -> TaskResult<()> {
        form.validate()?;

        let id = form
            .id
            .ok_or(TaskError::MissingField("id"))?;

        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::task_not_found(id))?;

        task.apply_form(&form);
        self.tasks.save(task).await?;
        Ok(())
    }

    /// Deleting an unknown id is not an error.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete(&self, id: Uuid) -> TaskResult<()> {
        if !self.tasks.delete_by_id(id).await? {
            tracing::debug!("Nothing to delete");
        }
        Ok(())
    }

    #[instrument(skip(self), fields(person_id = %person_id))]
    pub async fn find_tasks_by_person_id(&self, person_id: Uuid) -> TaskResult<Vec<TaskView>> {
        let tasks = self.tasks.find_by_person_id(person_id).await?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    /// Tasks due between `start` and `end`, both inclusive.
    #[instrument(skip(self))]
    pub async fn find_tasks_between_start_and_end_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TaskResult<Vec<TaskView>> {
        if start > end {
            return Ok(Vec::new());
        }

        let tasks = self.tasks.find_by_deadline_between(start, end).await?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn find_all_unassigned_todo_items(&self) -> TaskResult<Vec<TaskView>> {
        let tasks = self.tasks.find_by_person_is_null().await?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    /// Unfinished tasks whose deadline is before today (UTC).
    #[instrument(skip(self))]
    pub async fn find_all_unfinished_and_overdue(&self) -> TaskResult<Vec<TaskView>> {
        let today = Utc::now().date_naive();
        let tasks = self.tasks.find_unfinished_and_overdue(today).await?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, PersonRef, PersonView, Task};
    use crate::repository::{MockPersonRepository, MockTaskRepository};
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form(person: Option<Uuid>) -> TaskForm {
        TaskForm {
            id: None,
            title: "Ship report".into(),
            description: "Q2 numbers".into(),
            deadline: date(2024, 5, 1),
            done: false,
            person: person.map(|id| PersonRef { id }),
        }
    }

    fn stored(person: Option<Person>) -> Task {
        Task {
            id: Uuid::now_v7(),
            title: "Ship report".into(),
            description: "Q2 numbers".into(),
            deadline: date(2024, 5, 1),
            done: false,
            person,
        }
    }

    #[tokio::test]
    async fn test_create_attaches_owner() {
        let ada = Person::new(Uuid::now_v7(), "Ada");

        let mut people = MockPersonRepository::new();
        let found = ada.clone();
        people
            .expect_find_by_id()
            .with(eq(ada.id))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_insert()
            .withf(|new| new.title == "Ship report" && new.person.is_some())
            .times(1)
            .returning(|new| Ok(new.into_task(Uuid::now_v7())));

        let service = TaskService::new(tasks, people);
        let view = service.create(form(Some(ada.id))).await.unwrap();

        assert_eq!(view.title, "Ship report");
        assert_eq!(view.description, "Q2 numbers");
        assert_eq!(view.deadline, date(2024, 5, 1));
        assert_eq!(
            view.person,
            Some(PersonView {
                id: ada.id,
                name: "Ada".into()
            })
        );
    }

    #[tokio::test]
    async fn test_create_with_unknown_person_stores_nothing() {
        let mut people = MockPersonRepository::new();
        people.expect_find_by_id().returning(|_| Ok(None));

        let mut tasks = MockTaskRepository::new();
        tasks.expect_insert().never();

        let service = TaskService::new(tasks, people);
        let result = service.create(form(Some(Uuid::now_v7()))).await;

        assert!(matches!(
            result,
            Err(TaskError::NotFound {
                resource: crate::error::Resource::Person,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_create_requires_person_reference() {
        let mut people = MockPersonRepository::new();
        people.expect_find_by_id().never();
        let mut tasks = MockTaskRepository::new();
        tasks.expect_insert().never();

        let service = TaskService::new(tasks, people);
        let result = service.create(form(None)).await;

        assert!(matches!(result, Err(TaskError::MissingField("person"))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_insert().never();

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let mut input = form(Some(Uuid::now_v7()));
        input.title.clear();

        assert!(matches!(
            service.create(input).await,
            Err(TaskError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_includes_owner() {
        let ada = Person::new(Uuid::now_v7(), "Ada");
        let task = stored(Some(ada.clone()));
        let id = task.id;

        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(task.clone())));

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let view = service.find_by_id(id).await.unwrap();

        assert_eq!(view.id, id);
        assert_eq!(view.person.map(|p| p.name), Some("Ada".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_find_by_id().returning(|_| Ok(None));

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let result = service.find_by_id(Uuid::now_v7()).await;

        assert!(matches!(result, Err(TaskError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_overwrites_editable_fields_only() {
        let ada = Person::new(Uuid::now_v7(), "Ada");
        let task = stored(Some(ada.clone()));
        let id = task.id;

        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_id()
            .returning(move |_| Ok(Some(task.clone())));
        let owner = ada.clone();
        tasks
            .expect_save()
            .withf(move |t| {
                t.id == id
                    && t.title == "Renamed"
                    && t.done
                    && t.deadline == date(2024, 6, 1)
                    && t.person.as_ref() == Some(&owner)
            })
            .times(1)
            .returning(Ok);

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let mut input = form(Some(Uuid::now_v7()));
        input.id = Some(id);
        input.title = "Renamed".into();
        input.deadline = date(2024, 6, 1);
        input.done = true;

        service.update(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_unknown_task_saves_nothing() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_find_by_id().returning(|_| Ok(None));
        tasks.expect_save().never();

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let mut input = form(None);
        input.id = Some(Uuid::now_v7());

        assert!(matches!(
            service.update(input).await,
            Err(TaskError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_find_by_id().never();

        let service = TaskService::new(tasks, MockPersonRepository::new());

        assert!(matches!(
            service.update(form(None)).await,
            Err(TaskError::MissingField("id"))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_delete_by_id().returning(|_| Ok(false));

        let service = TaskService::new(tasks, MockPersonRepository::new());
        assert!(service.delete(Uuid::now_v7()).await.is_ok());
    }

    #[tokio::test]
    async fn test_reversed_range_skips_store() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_find_by_deadline_between().never();

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let views = service
            .find_tasks_between_start_and_end_date(date(2024, 6, 1), date(2024, 5, 1))
            .await
            .unwrap();

        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn test_overdue_uses_today() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_unfinished_and_overdue()
            .withf(|today| *today == Utc::now().date_naive())
            .returning(|_| Ok(vec![stored(None)]));

        let service = TaskService::new(tasks, MockPersonRepository::new());
        let views = service.find_all_unfinished_and_overdue().await.unwrap();

        assert_eq!(views.len(), 1);
        assert!(views[0].person.is_none());
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_person_is_null()
            .returning(|| Err(TaskError::Database(DbErr::Custom("connection reset".into()))));

        let service = TaskService::new(tasks, MockPersonRepository::new());

        assert!(matches!(
            service.find_all_unassigned_todo_items().await,
            Err(TaskError::Database(_))
        ));
    }
}
