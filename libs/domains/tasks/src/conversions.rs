//! Conversions between stored rows, domain models and views.

use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

use crate::entity::{person, task};
use crate::models::{NewTask, Person, PersonView, Task, TaskView};

impl From<person::Model> for Person {
    fn from(model: person::Model) -> Self {
        Person::new(model.id, model.name)
    }
}

impl From<(task::Model, Option<Person>)> for Task {
    fn from((model, person): (task::Model, Option<Person>)) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            deadline: model.deadline,
            done: model.done,
            person,
        }
    }
}

/// Row pair produced by `find_also_related(person::Entity)`.
impl From<(task::Model, Option<person::Model>)> for Task {
    fn from((model, person): (task::Model, Option<person::Model>)) -> Self {
        Task::from((model, person.map(Person::from)))
    }
}

/// Update model for the editable columns; `person_id` is left untouched.
impl From<&Task> for task::ActiveModel {
    fn from(task: &Task) -> Self {
        task::ActiveModel {
            id: Set(task.id),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            deadline: Set(task.deadline),
            done: Set(task.done),
            person_id: NotSet,
        }
    }
}

impl NewTask {
    pub(crate) fn into_active_model(self, id: Uuid) -> task::ActiveModel {
        task::ActiveModel {
            id: Set(id),
            title: Set(self.title),
            description: Set(self.description),
            deadline: Set(self.deadline),
            done: Set(self.done),
            person_id: Set(self.person.map(|p| p.id)),
        }
    }

    pub(crate) fn into_task(self, id: Uuid) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            deadline: self.deadline,
            done: self.done,
            person: self.person,
        }
    }
}

impl From<Person> for PersonView {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
        }
    }
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            deadline: task.deadline,
            done: task.done,
            person: task.person.map(PersonView::from),
        }
    }
}
