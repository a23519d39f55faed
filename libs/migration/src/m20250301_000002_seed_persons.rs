use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // People only; tasks are created through the API.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO persons (id, name)
            VALUES
                ('01954f2a-0000-7000-8000-000000000001', 'Ada Lovelace'),
                ('01954f2a-0000-7000-8000-000000000002', 'Grace Hopper'),
                ('01954f2a-0000-7000-8000-000000000003', 'Alan Turing')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            DELETE FROM persons WHERE id IN (
                '01954f2a-0000-7000-8000-000000000001',
                '01954f2a-0000-7000-8000-000000000002',
                '01954f2a-0000-7000-8000-000000000003'
            )
            "#,
            )
            .await?;

        Ok(())
    }
}
