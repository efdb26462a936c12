use diesel::pg::PgRowByRowLoadingMode;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::config::DbConfig;
use crate::db::{create_pool, DbPool};
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;
use crate::schema::{order_lines, orders};

use super::fold::fold_one_to_many;
use super::models::{AccountOrderRow, NewOrderLineRow, NewOrderRow};

/// Rows per multi-row `INSERT` into `order_lines`. Three bind parameters per
/// row keeps a full batch well below PostgreSQL's 65535 parameter limit.
const LINES_PER_INSERT: usize = 10_000;

// ── Error conversions (infrastructure concern only) ──────────────────────────

// Only the write path runs inside a transaction, so begin/commit failures
// surface as write errors.
impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::write(e)
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Connection(e.to_string())
    }
}

fn header_insert_error(order_id: Uuid, e: diesel::result::Error) -> DomainError {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DomainError::DuplicateOrder(order_id)
        }
        other => DomainError::write(other),
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Build a pool for `config` and check that the database answers.
    pub fn open(config: &DbConfig) -> Result<Self, DomainError> {
        let pool = create_pool(config)?;
        {
            let mut conn = pool.get()?;
            diesel::sql_query("SELECT 1")
                .execute(&mut conn)
                .map_err(|e| DomainError::Connection(e.to_string()))?;
        }
        log::info!(
            "Order store connected (pool size {})",
            config.max_pool_size
        );
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Release the pool. Connections still checked out are closed when they
    /// are returned.
    pub fn close(self) {
        let state = self.pool.state();
        log::info!(
            "Closing order store ({} connections, {} idle)",
            state.connections,
            state.idle_connections
        );
        drop(self.pool);
    }
}

impl OrderRepository for DieselOrderRepository {
    fn put(&self, order: &Order) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let result = conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the header row
            diesel::insert_into(orders::table)
                .values(&NewOrderRow::from(order))
                .execute(conn)
                .map_err(|e| header_insert_error(order.id, e))?;

            // 2. Bulk insert the line items, one statement per batch
            let lines: Vec<NewOrderLineRow> = order
                .items
                .iter()
                .map(|item| NewOrderLineRow {
                    order_id: order.id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect();
            for batch in lines.chunks(LINES_PER_INSERT) {
                diesel::insert_into(order_lines::table)
                    .values(batch)
                    .execute(conn)?;
            }

            Ok(())
        });

        match &result {
            Ok(()) => log::debug!(
                "Stored order {} with {} items",
                order.id,
                order.items.len()
            ),
            Err(e) => log::warn!("Rolled back order {}: {}", order.id, e),
        }
        result
    }

    fn list_for_account(&self, account_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut rows = orders::table
            .left_join(order_lines::table)
            .filter(orders::account_id.eq(account_id))
            .order((orders::id.asc(), order_lines::id.nullable().asc()))
            .select((
                orders::id,
                orders::account_id,
                orders::created_at,
                orders::total_price,
                order_lines::product_id.nullable(),
                order_lines::quantity.nullable(),
            ))
            .load_iter::<AccountOrderRow, PgRowByRowLoadingMode>(&mut *conn)
            .map_err(DomainError::read)?;

        let folded = fold_one_to_many(
            rows.by_ref(),
            |row| row.order_id,
            AccountOrderRow::header,
            |order, row| order.items.extend(row.line_item()),
        );

        match folded {
            Ok(orders) => {
                log::debug!("Loaded {} orders for account {}", orders.len(), account_id);
                Ok(orders)
            }
            Err(e) => {
                // Drain the rest of the stream so the connection goes back
                // to the pool without a pending result.
                rows.for_each(drop);
                log::warn!("Listing orders for account {} failed: {}", account_id, e);
                Err(DomainError::read(e))
            }
        }
    }
}
