use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Select, SelectTwo,
};
use uuid::Uuid;

use crate::{
    entity::{person, task},
    error::{TaskError, TaskResult},
    models::{NewTask, Person, Task},
    repository::{PersonRepository, TaskRepository},
};

pub struct PgPersonRepository {
    db: DatabaseConnection,
}

impl PgPersonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Person>> {
        let model = person::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Person::from))
    }
}

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Tasks joined with their owner, oldest first.
    fn hydrated(query: Select<task::Entity>) -> SelectTwo<task::Entity, person::Entity> {
        query
            .find_also_related(person::Entity)
            .order_by_asc(task::Column::Id)
    }

    async fn fetch(&self, query: Select<task::Entity>) -> TaskResult<Vec<Task>> {
        let rows = Self::hydrated(query).all(&self.db).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskResult<Task> {
        let id = Uuid::now_v7();
        task.clone().into_active_model(id).insert(&self.db).await?;

        tracing::info!(task_id = %id, "Created task");
        Ok(task.into_task(id))
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let model = task::ActiveModel::from(&task)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => TaskError::task_not_found(task.id),
                e => e.into(),
            })?;

        tracing::info!(task_id = %model.id, "Updated task");

        // The owner may have been removed since the task was read.
        let person = task.person.filter(|p| model.person_id == Some(p.id));
        Ok(Task::from((model, person)))
    }

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let row = task::Entity::find_by_id(id)
            .find_also_related(person::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(Task::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> TaskResult<bool> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_person_id(&self, person_id: Uuid) -> TaskResult<Vec<Task>> {
        self.fetch(task::Entity::find().filter(task::Column::PersonId.eq(person_id)))
            .await
    }

    async fn find_by_deadline_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TaskResult<Vec<Task>> {
        self.fetch(task::Entity::find().filter(task::Column::Deadline.between(start, end)))
            .await
    }

    async fn find_by_person_is_null(&self) -> TaskResult<Vec<Task>> {
        self.fetch(task::Entity::find().filter(task::Column::PersonId.is_null()))
            .await
    }

    async fn find_unfinished_and_overdue(&self, today: NaiveDate) -> TaskResult<Vec<Task>> {
        self.fetch(
            task::Entity::find()
                .filter(task::Column::Done.eq(false))
                .filter(task::Column::Deadline.lt(today)),
        )
        .await
    }
}
