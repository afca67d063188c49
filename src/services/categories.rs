use crate::{
    db::DbPool,
    entities::category,
    errors::{classify_db_err, ServiceError},
};
use sea_orm::{EntityTrait, QueryOrder};
use tracing::instrument;

/// Lists all categories.
#[instrument(skip(db))]
pub async fn list_categories(db: &DbPool) -> Result<Vec<category::Model>, ServiceError> {
    category::Entity::find()
        .order_by_asc(category::Column::CategoryId)
        .all(db)
        .await
        .map_err(classify_db_err)
}

/// Gets a category by id; `NotFound` when the row is absent.
#[instrument(skip(db))]
pub async fn get_category(db: &DbPool, id: i32) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(classify_db_err)?
        .ok_or_else(|| ServiceError::NotFound(format!("Category {id} not found")))
}
