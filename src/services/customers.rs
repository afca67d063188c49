use crate::{
    db::DbPool,
    entities::customer,
    errors::{classify_db_err, ServiceError},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;
use validator::Validate;

/// Lists all customers.
#[instrument(skip(db))]
pub async fn list_customers(db: &DbPool) -> Result<Vec<customer::Model>, ServiceError> {
    customer::Entity::find()
        .order_by_asc(customer::Column::CustomerId)
        .all(db)
        .await
        .map_err(classify_db_err)
}

/// Gets a customer by id; `NotFound` when the row is absent.
#[instrument(skip(db))]
pub async fn get_customer(db: &DbPool, id: &str) -> Result<customer::Model, ServiceError> {
    customer::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(classify_db_err)?
        .ok_or_else(|| ServiceError::NotFound(format!("Customer {id} not found")))
}

/// Creates a customer with its caller-supplied id.
#[instrument(skip(db, model), fields(customer_id = %model.customer_id))]
pub async fn create_customer(
    db: &DbPool,
    model: customer::Model,
) -> Result<customer::Model, ServiceError> {
    model.validate()?;

    customer::ActiveModel {
        customer_id: Set(model.customer_id),
        company_name: Set(model.company_name),
        contact_name: Set(model.contact_name),
        city: Set(model.city),
        country: Set(model.country),
    }
    .insert(db)
    .await
    .map_err(classify_db_err)
}

/// Replaces a customer row; `NotFound` when the row is absent.
#[instrument(skip(db, model))]
pub async fn update_customer(
    db: &DbPool,
    id: &str,
    model: customer::Model,
) -> Result<customer::Model, ServiceError> {
    model.validate()?;

    let existing = get_customer(db, id).await?;
    let mut row: customer::ActiveModel = existing.into();
    row.company_name = Set(model.company_name);
    row.contact_name = Set(model.contact_name);
    row.city = Set(model.city);
    row.country = Set(model.country);
    row.update(db).await.map_err(classify_db_err)
}

/// Deletes a customer. Customers with orders are protected by the
/// no-cascade foreign key and surface as an integrity error.
#[instrument(skip(db))]
pub async fn delete_customer(db: &DbPool, id: &str) -> Result<(), ServiceError> {
    let result = customer::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(classify_db_err)?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!("Customer {id} not found")));
    }
    Ok(())
}
