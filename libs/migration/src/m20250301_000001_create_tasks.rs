use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_persons::Persons;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_uuid(Tasks::Id))
                    .col(string(Tasks::Title))
                    .col(text(Tasks::Description).default(""))
                    .col(date(Tasks::Deadline))
                    .col(boolean(Tasks::Done).default(false))
                    .col(uuid_null(Tasks::PersonId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_person_id")
                            .from(Tasks::Table, Tasks::PersonId)
                            .to(Persons::Table, Persons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_person_id")
                    .table(Tasks::Table)
                    .col(Tasks::PersonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_deadline")
                    .table(Tasks::Table)
                    .col(Tasks::Deadline)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Deadline,
    Done,
    PersonId,
}
