use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            INSERT INTO products (id, name, quantity, price, vendor_guid)
            VALUES
                (1, 'Vortex Race 3', 4, 150, 'd406189b-01a1-404b-8147-cf9a81e1c283'),
                (2, 'Varmilo VA88M', 0, 180, '29077cea-6bdc-4dc4-b441-b325fc9a2797'),
                (3, 'Ducky One 2 Mini', 1, 139, '8b43de00-475a-4db2-be34-71a3d1ba40b1'),
                (4, 'Keychron K8', 2, 89, 'f534302c-7c1b-4954-9cb9-9576fd1c7dd8')
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .await?;

        // Explicit ids bypass the serial sequence; move it past the seed rows.
        db.execute_unprepared(
            "SELECT setval(pg_get_serial_sequence('products', 'id'), \
             GREATEST((SELECT MAX(id) FROM products), 1))",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM products WHERE id BETWEEN 1 AND 4")
            .await?;

        Ok(())
    }
}
