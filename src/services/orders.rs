use crate::{
    changes::{ChangeOp, Tracked},
    db::DbPool,
    entities::{customer, order, order_detail, product},
    errors::{classify_db_err, ServiceError},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

/// One order line inside a submitted or reloaded graph.
///
/// The nested `Product` node is reference data: it is populated on responses
/// and never written through the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct OrderDetailNode {
    #[serde(default)]
    pub order_id: i32,
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<product::Model>,
}

/// A full order graph as submitted by clients and returned by the API.
///
/// Each detail node carries its own [`ChangeOp`]; the operation for the root
/// order travels separately (it is implied by the HTTP verb at the edge).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct OrderGraph {
    #[serde(default)]
    pub order_id: i32,
    #[validate(length(
        min = 1,
        max = 5,
        message = "Customer id must be between 1 and 5 characters"
    ))]
    pub customer_id: String,
    pub order_date: Option<DateTime<Utc>>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub freight: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<customer::Model>,
    #[serde(default)]
    pub order_details: Vec<Tracked<OrderDetailNode>>,
}

/// Service reconciling submitted order graphs against the store.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
}

impl OrderService {
    /// Creates a new order service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists every order as a fully populated graph.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderGraph>, ServiceError> {
        let db = &*self.db_pool;
        let orders = order::Entity::find()
            .order_by_asc(order::Column::OrderId)
            .all(db)
            .await
            .map_err(classify_db_err)?;

        let mut graphs = Vec::with_capacity(orders.len());
        for row in orders {
            graphs.push(Self::load_graph(db, row).await?);
        }
        Ok(graphs)
    }

    /// Lists the orders belonging to one customer.
    #[instrument(skip(self))]
    pub async fn list_orders_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<OrderGraph>, ServiceError> {
        let db = &*self.db_pool;
        let orders = order::Entity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_asc(order::Column::OrderId)
            .all(db)
            .await
            .map_err(classify_db_err)?;

        let mut graphs = Vec::with_capacity(orders.len());
        for row in orders {
            graphs.push(Self::load_graph(db, row).await?);
        }
        Ok(graphs)
    }

    /// Loads a single order graph; `NotFound` when the row is absent.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: i32) -> Result<OrderGraph, ServiceError> {
        let db = &*self.db_pool;
        let row = order::Entity::find_by_id(order_id)
            .one(db)
            .await
            .map_err(classify_db_err)?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id} not found")))?;
        Self::load_graph(db, row).await
    }

    /// Applies a submitted order graph in a single transaction.
    ///
    /// Parent rows are written before child rows on insert; children are
    /// removed before their parent on delete. After a successful commit the
    /// full graph is reloaded with reference data populated and every node
    /// reset to `Noop`; a root delete yields `None`.
    #[instrument(skip(self, graph), fields(order_id = graph.order_id, customer_id = %graph.customer_id))]
    pub async fn apply_changes(
        &self,
        op: ChangeOp,
        graph: OrderGraph,
    ) -> Result<Option<OrderGraph>, ServiceError> {
        if op == ChangeOp::Noop {
            return Err(ServiceError::BadRequest(
                "No change operation supplied for the order".into(),
            ));
        }

        graph.validate()?;
        for node in &graph.order_details {
            node.data.validate()?;
        }

        let db = &*self.db_pool;
        let txn = db.begin().await.map_err(classify_db_err)?;

        let reload = match op {
            ChangeOp::Insert => Some(Self::insert_graph(&txn, &graph).await?),
            ChangeOp::Update => Some(Self::update_graph(&txn, &graph).await?),
            ChangeOp::Delete | ChangeOp::Noop => {
                Self::delete_graph(&txn, graph.order_id).await?;
                None
            }
        };

        txn.commit().await.map_err(classify_db_err)?;

        match reload {
            Some(order_id) => self.get_order(order_id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Root insert: the submitted graph becomes a new order with all of its lines.
    pub async fn create_order(&self, graph: OrderGraph) -> Result<OrderGraph, ServiceError> {
        self.apply_changes(ChangeOp::Insert, graph)
            .await?
            .ok_or_else(Self::missing_reload)
    }

    /// Root update: the order row is rewritten and each line follows its own op.
    pub async fn update_order(&self, graph: OrderGraph) -> Result<OrderGraph, ServiceError> {
        self.apply_changes(ChangeOp::Update, graph)
            .await?
            .ok_or_else(Self::missing_reload)
    }

    /// Root delete by id; lines go first so no orphans remain.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await.map_err(classify_db_err)?;
        Self::delete_graph(&txn, order_id).await?;
        txn.commit().await.map_err(classify_db_err)?;
        Ok(())
    }

    fn missing_reload() -> ServiceError {
        ServiceError::InternalError("write committed but the graph could not be reloaded".into())
    }

    async fn insert_graph<C: ConnectionTrait>(
        conn: &C,
        graph: &OrderGraph,
    ) -> Result<i32, ServiceError> {
        let inserted = order::ActiveModel {
            customer_id: Set(graph.customer_id.clone()),
            order_date: Set(graph.order_date),
            shipped_date: Set(graph.shipped_date),
            freight: Set(graph.freight),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(classify_db_err)?;

        // The whole subtree is new; per-node ops are ignored on a root insert.
        for node in &graph.order_details {
            Self::insert_detail(conn, inserted.order_id, &node.data).await?;
        }

        Ok(inserted.order_id)
    }

    async fn update_graph<C: ConnectionTrait>(
        conn: &C,
        graph: &OrderGraph,
    ) -> Result<i32, ServiceError> {
        let order_id = graph.order_id;
        let existing = order::Entity::find_by_id(order_id)
            .one(conn)
            .await
            .map_err(classify_db_err)?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id} not found")))?;

        let mut row: order::ActiveModel = existing.into();
        row.customer_id = Set(graph.customer_id.clone());
        row.order_date = Set(graph.order_date);
        row.shipped_date = Set(graph.shipped_date);
        row.freight = Set(graph.freight);
        row.update(conn).await.map_err(classify_db_err)?;

        // Deletes go first so a replaced line on the same key cannot collide.
        for node in &graph.order_details {
            if node.change_op == ChangeOp::Delete {
                Self::delete_detail(conn, order_id, node.data.product_id).await?;
            }
        }

        for node in &graph.order_details {
            match node.change_op {
                ChangeOp::Insert => Self::insert_detail(conn, order_id, &node.data).await?,
                ChangeOp::Update => Self::update_detail(conn, order_id, &node.data).await?,
                ChangeOp::Delete | ChangeOp::Noop => {}
            }
        }

        Ok(order_id)
    }

    async fn delete_graph<C: ConnectionTrait>(conn: &C, order_id: i32) -> Result<(), ServiceError> {
        order_detail::Entity::delete_many()
            .filter(order_detail::Column::OrderId.eq(order_id))
            .exec(conn)
            .await
            .map_err(classify_db_err)?;

        let result = order::Entity::delete_by_id(order_id)
            .exec(conn)
            .await
            .map_err(classify_db_err)?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Order {order_id} not found")));
        }
        Ok(())
    }

    async fn insert_detail<C: ConnectionTrait>(
        conn: &C,
        order_id: i32,
        node: &OrderDetailNode,
    ) -> Result<(), ServiceError> {
        order_detail::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(node.product_id),
            quantity: Set(node.quantity),
            unit_price: Set(node.unit_price),
        }
        .insert(conn)
        .await
        .map_err(classify_db_err)?;
        Ok(())
    }

    async fn update_detail<C: ConnectionTrait>(
        conn: &C,
        order_id: i32,
        node: &OrderDetailNode,
    ) -> Result<(), ServiceError> {
        let result = order_detail::Entity::update_many()
            .col_expr(order_detail::Column::Quantity, Expr::value(node.quantity))
            .col_expr(
                order_detail::Column::UnitPrice,
                Expr::value(node.unit_price),
            )
            .filter(order_detail::Column::OrderId.eq(order_id))
            .filter(order_detail::Column::ProductId.eq(node.product_id))
            .exec(conn)
            .await
            .map_err(classify_db_err)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Order detail ({order_id}, {}) not found",
                node.product_id
            )));
        }
        Ok(())
    }

    async fn delete_detail<C: ConnectionTrait>(
        conn: &C,
        order_id: i32,
        product_id: i32,
    ) -> Result<(), ServiceError> {
        let result = order_detail::Entity::delete_by_id((order_id, product_id))
            .exec(conn)
            .await
            .map_err(classify_db_err)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Order detail ({order_id}, {product_id}) not found"
            )));
        }
        Ok(())
    }

    /// Rebuilds the response graph: customer and per-line product references
    /// populated, every node reported as untouched.
    async fn load_graph<C: ConnectionTrait>(
        conn: &C,
        row: order::Model,
    ) -> Result<OrderGraph, ServiceError> {
        let customer = customer::Entity::find_by_id(row.customer_id.clone())
            .one(conn)
            .await
            .map_err(classify_db_err)?;

        let details = order_detail::Entity::find()
            .filter(order_detail::Column::OrderId.eq(row.order_id))
            .find_also_related(product::Entity)
            .order_by_asc(order_detail::Column::ProductId)
            .all(conn)
            .await
            .map_err(classify_db_err)?;

        let order_details = details
            .into_iter()
            .map(|(detail, product)| {
                Tracked::noop(OrderDetailNode {
                    order_id: detail.order_id,
                    product_id: detail.product_id,
                    quantity: detail.quantity,
                    unit_price: detail.unit_price,
                    product,
                })
            })
            .collect();

        Ok(OrderGraph {
            order_id: row.order_id,
            customer_id: row.customer_id,
            order_date: row.order_date,
            shipped_date: row.shipped_date,
            freight: row.freight,
            customer,
            order_details,
        })
    }
}
