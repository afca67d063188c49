use crate::db::DbPool;
use crate::entities::{category, customer, order, order_detail, product};
use crate::errors::{classify_db_err, ServiceError};
use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, DatabaseTransaction, EntityTrait,
    PaginatorTrait, Set, Statement, TransactionTrait,
};
use tracing::info;

/// Populates empty tables with the fixed sample dataset.
///
/// Idempotent per table: a table that already holds rows is left alone.
/// Seed rows carry caller-supplied identifiers; afterwards the identity
/// sequences are advanced past them so normal generation resumes.
pub async fn ensure_seed_data(db: &DbPool) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(classify_db_err)?;

    if is_empty(category::Entity, &txn).await? {
        info!("Seeding categories");
        seed_categories(&txn).await?;
    }
    if is_empty(product::Entity, &txn).await? {
        info!("Seeding products");
        seed_products(&txn).await?;
    }
    if is_empty(customer::Entity, &txn).await? {
        info!("Seeding customers");
        seed_customers(&txn).await?;
    }
    if is_empty(order::Entity, &txn).await? {
        info!("Seeding orders");
        seed_orders(&txn).await?;
    }

    txn.commit().await.map_err(classify_db_err)?;

    reset_identity_sequences(db).await
}

async fn is_empty<E: EntityTrait>(
    _entity: E,
    txn: &DatabaseTransaction,
) -> Result<bool, ServiceError>
where
    E::Model: Sync,
{
    let count = E::find().count(txn).await.map_err(classify_db_err)?;
    Ok(count == 0)
}

async fn seed_categories(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    let names = [
        "Beverages",
        "Condiments",
        "Confections",
        "Dairy Products",
        "Grains/Cereals",
        "Meat/Poultry",
        "Produce",
        "Seafood",
    ];

    for (i, name) in names.iter().enumerate() {
        category::ActiveModel {
            category_id: Set(i as i32 + 1),
            category_name: Set((*name).to_string()),
        }
        .insert(txn)
        .await
        .map_err(classify_db_err)?;
    }
    Ok(())
}

async fn seed_products(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    let rows = [
        (1, 1, "Chai"),
        (2, 1, "Chang"),
        (3, 2, "Aniseed Syrup"),
        (4, 2, "Chef Anton's Cajun Seasoning"),
    ];

    for (product_id, category_id, name) in rows {
        product::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
            product_name: Set(name.to_string()),
            unit_price: Set(dec!(23)),
            discontinued: Set(false),
            row_version: Set(0),
        }
        .insert(txn)
        .await
        .map_err(classify_db_err)?;
    }
    Ok(())
}

async fn seed_customers(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    let rows = [
        ("ALFKI", "Alfreds Futterkiste", "Maria Anders", "Berlin", "Germany"),
        (
            "ANATR",
            "Ana Trujillo Emparedados y helados",
            "Ana Trujillo",
            "México D.F.",
            "Mexico",
        ),
        (
            "ANTON",
            "Antonio Moreno Taquería",
            "Antonio Moreno",
            "México D.F.",
            "Mexico",
        ),
    ];

    for (id, company, contact, city, country) in rows {
        customer::ActiveModel {
            customer_id: Set(id.to_string()),
            company_name: Set(company.to_string()),
            contact_name: Set(Some(contact.to_string())),
            city: Set(Some(city.to_string())),
            country: Set(Some(country.to_string())),
        }
        .insert(txn)
        .await
        .map_err(classify_db_err)?;
    }
    Ok(())
}

async fn seed_orders(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    // (order id, customer, [(product id, quantity, unit price)])
    let orders: [(i32, &str, &[(i32, i32, rust_decimal::Decimal)]); 4] = [
        (1, "ALFKI", &[(1, 1, dec!(10)), (2, 2, dec!(20))]),
        (2, "ALFKI", &[(3, 3, dec!(30))]),
        (3, "ANATR", &[(2, 4, dec!(20))]),
        (4, "ANTON", &[(3, 5, dec!(30))]),
    ];

    let today = Utc::now();

    for (order_id, customer_id, lines) in orders {
        order::ActiveModel {
            order_id: Set(order_id),
            customer_id: Set(customer_id.to_string()),
            order_date: Set(Some(today)),
            shipped_date: Set(Some(today)),
            freight: Set(Some(dec!(41.34))),
        }
        .insert(txn)
        .await
        .map_err(classify_db_err)?;

        for (product_id, quantity, unit_price) in lines {
            order_detail::ActiveModel {
                order_id: Set(order_id),
                product_id: Set(*product_id),
                quantity: Set(*quantity),
                unit_price: Set(*unit_price),
            }
            .insert(txn)
            .await
            .map_err(classify_db_err)?;
        }
    }
    Ok(())
}

/// Advances PostgreSQL identity sequences past the seeded ids. SQLite keys
/// off the stored maximum on its own, so there is nothing to do there.
async fn reset_identity_sequences(db: &DbPool) -> Result<(), ServiceError> {
    if db.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }

    for (table, column) in [
        ("category", "category_id"),
        ("product", "product_id"),
        ("order", "order_id"),
        ("employee", "employee_id"),
    ] {
        let sql = format!(
            "SELECT setval(pg_get_serial_sequence('\"{table}\"', '{column}'), \
             (SELECT COALESCE(MAX(\"{column}\"), 0) + 1 FROM \"{table}\"), false)"
        );
        db.execute(Statement::from_string(DatabaseBackend::Postgres, sql))
            .await
            .map_err(classify_db_err)?;
    }
    Ok(())
}
