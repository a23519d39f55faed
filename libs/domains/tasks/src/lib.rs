//! Tasks Domain
//!
//! Todo tasks, optionally owned by a person.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum routes + OpenAPI
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← validation, owner lookup, views
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← TaskRepository / PersonRepository (Postgres or in-memory)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Models    │  ← Task, Person, forms and views
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgPersonRepository, PgTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = TaskService::new(
//!     PgTaskRepository::new(db.clone()),
//!     PgPersonRepository::new(db),
//! );
//! let app = domain_tasks::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{Resource, TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use memory::{InMemoryPersonRepository, InMemoryTaskRepository};
pub use models::{
    DeadlineRange, NewTask, Person, PersonRef, PersonView, Task, TaskForm, TaskView,
};
pub use postgres::{PgPersonRepository, PgTaskRepository};
pub use repository::{PersonRepository, TaskRepository};
pub use service::TaskService;
