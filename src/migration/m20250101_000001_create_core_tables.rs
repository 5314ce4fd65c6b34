use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

use crate::entity::{categories, items, order_items, orders, tables, tenants};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        create_from_entity(manager, &schema, tenants::Entity).await?;
        create_from_entity(manager, &schema, tables::Entity).await?;
        create_from_entity(manager, &schema, categories::Entity).await?;
        create_from_entity(manager, &schema, items::Entity).await?;
        create_from_entity(manager, &schema, orders::Entity).await?;
        create_from_entity(manager, &schema, order_items::Entity).await?;

        // Serves the admin listing: tenant scope, newest first, id tie-break.
        manager
            .create_index(
                Index::create()
                    .name("idx-orders-tenant-created-id")
                    .table(orders::Entity)
                    .col(orders::Column::TenantId)
                    .col(orders::Column::CreatedAt)
                    .col(orders::Column::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(order_items::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(orders::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(items::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(categories::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tables::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tenants::Entity).if_exists().to_owned())
            .await
    }
}

async fn create_from_entity<E>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await?;
    for mut index in schema.create_index_from_entity(entity) {
        manager.create_index(index.if_not_exists().to_owned()).await?;
    }
    Ok(())
}
