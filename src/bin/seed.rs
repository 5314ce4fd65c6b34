use chrono::Utc;
use qrmenu_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        categories::ActiveModel as CategoryActive,
        items::ActiveModel as ItemActive,
        tables::ActiveModel as TableActive,
        tenants::{ActiveModel as TenantActive, Column as TenantCol, Entity as Tenants},
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

const TENANT_CODE: &str = "demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    if let Some(existing) = Tenants::find()
        .filter(TenantCol::Code.eq(TENANT_CODE))
        .one(&orm)
        .await?
    {
        println!("Tenant '{TENANT_CODE}' already seeded (id {})", existing.id);
        return Ok(());
    }

    let tenant_id = seed_tenant(&orm).await?;
    let token = seed_table(&orm, tenant_id).await?;
    seed_menu(&orm, tenant_id).await?;

    println!("Seed completed. Tenant ID: {tenant_id}, table token: {token}");
    Ok(())
}

async fn seed_tenant(orm: &DatabaseConnection) -> anyhow::Result<Uuid> {
    let tenant = TenantActive {
        id: Set(Uuid::new_v4()),
        code: Set(TENANT_CODE.into()),
        name: Set("Demo Cafe".into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;
    println!("Ensured tenant {}", tenant.code);
    Ok(tenant.id)
}

async fn seed_table(orm: &DatabaseConnection, tenant_id: Uuid) -> anyhow::Result<String> {
    let token = Uuid::new_v4().simple().to_string();
    TableActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        code: Set("T1".into()),
        name: Set("Table 1".into()),
        token: Set(token.clone()),
        is_active: Set(true),
    }
    .insert(orm)
    .await?;
    Ok(token)
}

async fn seed_menu(orm: &DatabaseConnection, tenant_id: Uuid) -> anyhow::Result<()> {
    let menu: [(&str, i32, &[(&str, i64)]); 2] = [
        ("Coffee", 1, &[("Espresso", 3500), ("Cappuccino", 4500), ("Latte", 4800)]),
        ("Pastry", 2, &[("Croissant", 3000), ("Banana Bread", 3200)]),
    ];

    for (category_name, sort, items) in menu {
        let category = CategoryActive {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant_id),
            name: Set(category_name.into()),
            sort: Set(sort),
            is_active: Set(true),
        }
        .insert(orm)
        .await?;

        for (name, price) in items {
            ItemActive {
                id: Set(Uuid::new_v4()),
                tenant_id: Set(tenant_id),
                category_id: Set(category.id),
                name: Set((*name).into()),
                description: Set(None),
                price: Set(*price),
                is_active: Set(true),
            }
            .insert(orm)
            .await?;
        }
        println!("Seeded category {category_name} with {} items", items.len());
    }
    Ok(())
}
