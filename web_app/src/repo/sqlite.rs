use crate::models;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool, sqlite::SqliteRow};
use std::str::FromStr;

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

/// Decimals are stored as TEXT to keep their exact representation
fn try_get_decimal(row: &SqliteRow, column: &str) -> sqlx::Result<Decimal> {
    let value: String = row.try_get(column)?;

    Decimal::from_str(&value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn try_get_narrowed<T: TryFrom<i64>>(row: &SqliteRow, column: &str) -> sqlx::Result<T>
where
    T::Error: std::error::Error + Send + Sync + 'static,
{
    let value: i64 = row.try_get(column)?;

    T::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl FromRow<'_, SqliteRow> for models::user_app::User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_app_id: row.try_get("user_app_id")?,
            name: row.try_get("name")?,
            species: row.try_get("species")?,
            breed: row.try_get("breed")?,
            birthday: row.try_get("birthday")?,
            weight: try_get_decimal(row, "weight")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::event::Event {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let kind = row
            .try_get::<String, &str>("kind")?
            .parse::<models::event::EventKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".into(),
                source: e.into(),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            user_app_id: row.try_get("user_app_id")?,
            kind,
            date: row.try_get("date")?,
            notes: row.try_get("notes")?,
            completed: row.try_get("completed")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::goal::Goal {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            user_app_id: row.try_get("user_app_id")?,
            description: row.try_get("description")?,
            due_date: row.try_get("due_date")?,
            progress: try_get_narrowed(row, "progress")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::shopping::ShoppingItem {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            user_app_id: row.try_get("user_app_id")?,
            description: row.try_get("description")?,
            purchased: row.try_get("purchased")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::product::Product {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            emoji: row.try_get("emoji")?,
            description: row.try_get("description")?,
            price: try_get_decimal(row, "price")?,
            stock: try_get_narrowed(row, "stock")?,
            image_url: row.try_get("image_url")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn get_user_app_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(sqlx::query_as::<_, models::user_app::User>(
            sqlite_queries::QUERY_GET_USER_APP_BY_USERNAME,
        )
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn insert_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_USER_APP)
            .bind(&app_user.username)
            .bind(&app_user.password_hash)
            .bind(app_user.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS_USER_ID)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_by_id(&self, pet_id: i64) -> anyhow::Result<Option<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.user_app_id)
            .bind(&pet.name)
            .bind(&pet.species)
            .bind(&pet.breed)
            .bind(pet.birthday)
            .bind(pet.weight.to_string())
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(pet.id)
            .bind(pet.user_app_id)
            .bind(&pet.name)
            .bind(&pet.species)
            .bind(&pet.breed)
            .bind(pet.birthday)
            .bind(pet.weight.to_string())
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_pet(&self, pet_id: i64, user_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_PET)
            .bind(pet_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_events(&self, pet_id: i64) -> anyhow::Result<Vec<models::event::Event>> {
        Ok(
            sqlx::query_as::<_, models::event::Event>(sqlite_queries::QUERY_GET_PET_EVENTS)
                .bind(pet_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_event_by_id(
        &self,
        event_id: i64,
    ) -> anyhow::Result<Option<models::event::Event>> {
        Ok(
            sqlx::query_as::<_, models::event::Event>(sqlite_queries::QUERY_GET_EVENT_BY_ID)
                .bind(event_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn insert_event(&self, event: &models::event::Event) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_EVENT)
            .bind(event.pet_id)
            .bind(event.kind.to_string())
            .bind(event.date)
            .bind(&event.notes)
            .bind(event.completed)
            .bind(event.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_event(&self, event: &models::event::Event) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_EVENT)
            .bind(event.id)
            .bind(event.user_app_id)
            .bind(event.kind.to_string())
            .bind(event.date)
            .bind(&event.notes)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn set_event_as_completed(&self, event_id: i64, user_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_SET_EVENT_COMPLETED)
            .bind(event_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_event(&self, event_id: i64, user_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_EVENT)
            .bind(event_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_goals(&self, pet_id: i64) -> anyhow::Result<Vec<models::goal::Goal>> {
        Ok(
            sqlx::query_as::<_, models::goal::Goal>(sqlite_queries::QUERY_GET_PET_GOALS)
                .bind(pet_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_goal_by_id(&self, goal_id: i64) -> anyhow::Result<Option<models::goal::Goal>> {
        Ok(
            sqlx::query_as::<_, models::goal::Goal>(sqlite_queries::QUERY_GET_GOAL_BY_ID)
                .bind(goal_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn insert_goal(&self, goal: &models::goal::Goal) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_GOAL)
            .bind(goal.pet_id)
            .bind(&goal.description)
            .bind(goal.due_date)
            .bind(goal.progress)
            .bind(goal.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn set_goal_progress(
        &self,
        goal_id: i64,
        user_id: i64,
        progress: u8,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_SET_GOAL_PROGRESS)
            .bind(goal_id)
            .bind(user_id)
            .bind(progress)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_goal(&self, goal_id: i64, user_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_GOAL)
            .bind(goal_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_shopping_items(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::shopping::ShoppingItem>> {
        Ok(sqlx::query_as::<_, models::shopping::ShoppingItem>(
            sqlite_queries::QUERY_GET_PET_SHOPPING_ITEMS,
        )
        .bind(pet_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn get_shopping_item_by_id(
        &self,
        item_id: i64,
    ) -> anyhow::Result<Option<models::shopping::ShoppingItem>> {
        Ok(sqlx::query_as::<_, models::shopping::ShoppingItem>(
            sqlite_queries::QUERY_GET_SHOPPING_ITEM_BY_ID,
        )
        .bind(item_id)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn insert_shopping_item(
        &self,
        item: &models::shopping::ShoppingItem,
    ) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_SHOPPING_ITEM)
            .bind(item.pet_id)
            .bind(&item.description)
            .bind(item.purchased)
            .bind(item.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn set_shopping_item_purchased(
        &self,
        item_id: i64,
        user_id: i64,
        purchased: bool,
    ) -> anyhow::Result<()> {
        Ok(
            sqlx::query(sqlite_queries::QUERY_SET_SHOPPING_ITEM_PURCHASED)
                .bind(item_id)
                .bind(user_id)
                .bind(purchased)
                .execute(&self.db_pool)
                .await
                .map(|_| ())?,
        )
    }

    async fn delete_shopping_item(&self, item_id: i64, user_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_SHOPPING_ITEM)
            .bind(item_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_available_products(&self) -> anyhow::Result<Vec<models::product::Product>> {
        Ok(sqlx::query_as::<_, models::product::Product>(
            sqlite_queries::QUERY_GET_AVAILABLE_PRODUCTS,
        )
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn get_product_by_id(
        &self,
        product_id: i64,
    ) -> anyhow::Result<Option<models::product::Product>> {
        Ok(
            sqlx::query_as::<_, models::product::Product>(sqlite_queries::QUERY_GET_PRODUCT_BY_ID)
                .bind(product_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_products_by_ids(
        &self,
        product_ids: &[i64],
    ) -> anyhow::Result<Vec<models::product::Product>> {
        if product_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id,name,emoji,description,price,stock,image_url FROM product WHERE id IN (",
        );
        let mut ids = query.separated(",");
        for product_id in product_ids {
            ids.push_bind(*product_id);
        }
        ids.push_unseparated(") ORDER BY name ASC;");

        Ok(query
            .build_query_as::<models::product::Product>()
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn decrement_stock(
        &self,
        lines: &[(i64, u32)],
    ) -> anyhow::Result<models::product::StockCommit> {
        let mut transaction = self.db_pool.begin().await?;

        for (product_id, quantity) in lines {
            let updated = sqlx::query(sqlite_queries::QUERY_DECREMENT_PRODUCT_STOCK)
                .bind(product_id)
                .bind(quantity)
                .execute(&mut *transaction)
                .await?
                .rows_affected();

            if updated == 0 {
                transaction.rollback().await?;
                return Ok(models::product::StockCommit::InsufficientStock(*product_id));
            }
        }

        transaction.commit().await?;

        Ok(models::product::StockCommit::Committed)
    }
}
