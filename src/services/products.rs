use crate::{
    db::DbPool,
    entities::product,
    errors::{classify_db_err, ServiceError},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::instrument;
use validator::Validate;

/// Lists all products.
#[instrument(skip(db))]
pub async fn list_products(db: &DbPool) -> Result<Vec<product::Model>, ServiceError> {
    product::Entity::find()
        .order_by_asc(product::Column::ProductId)
        .all(db)
        .await
        .map_err(classify_db_err)
}

/// Gets a product by id; `NotFound` when the row is absent.
#[instrument(skip(db))]
pub async fn get_product(db: &DbPool, id: i32) -> Result<product::Model, ServiceError> {
    product::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(classify_db_err)?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {id} not found")))
}

/// Creates a product; the identifier is store-generated and the row version
/// starts at zero.
#[instrument(skip(db, model), fields(product_name = %model.product_name))]
pub async fn create_product(
    db: &DbPool,
    model: product::Model,
) -> Result<product::Model, ServiceError> {
    model.validate()?;

    product::ActiveModel {
        category_id: Set(model.category_id),
        product_name: Set(model.product_name),
        unit_price: Set(model.unit_price),
        discontinued: Set(model.discontinued),
        row_version: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(classify_db_err)
}

/// Replaces a product row under optimistic concurrency.
///
/// The update only lands when the submitted `RowVersion` still matches the
/// stored one; a stale token is rejected with `ConcurrencyConflict` and the
/// stored row is left untouched. The losing writer must re-fetch and resubmit.
#[instrument(skip(db, model), fields(row_version = model.row_version))]
pub async fn update_product(
    db: &DbPool,
    id: i32,
    model: product::Model,
) -> Result<product::Model, ServiceError> {
    model.validate()?;

    let result = product::Entity::update_many()
        .col_expr(product::Column::CategoryId, Expr::value(model.category_id))
        .col_expr(
            product::Column::ProductName,
            Expr::value(model.product_name.clone()),
        )
        .col_expr(product::Column::UnitPrice, Expr::value(model.unit_price))
        .col_expr(
            product::Column::Discontinued,
            Expr::value(model.discontinued),
        )
        .col_expr(
            product::Column::RowVersion,
            Expr::value(model.row_version + 1),
        )
        .filter(product::Column::ProductId.eq(id))
        .filter(product::Column::RowVersion.eq(model.row_version))
        .exec(db)
        .await
        .map_err(classify_db_err)?;

    if result.rows_affected == 0 {
        // Zero rows means either the product vanished or the token is stale.
        return match product::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(classify_db_err)?
        {
            None => Err(ServiceError::NotFound(format!("Product {id} not found"))),
            Some(current) => Err(ServiceError::ConcurrencyConflict(format!(
                "Product {id} row version {} is stale (current version is {})",
                model.row_version, current.row_version
            ))),
        };
    }

    get_product(db, id).await
}

/// Deletes a product. Products referenced by order lines are protected by
/// the no-cascade foreign key and surface as an integrity error.
#[instrument(skip(db))]
pub async fn delete_product(db: &DbPool, id: i32) -> Result<(), ServiceError> {
    let result = product::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(classify_db_err)?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}
