use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::RunQueryDsl;

use crate::config::DbConfig;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Session settings applied to every connection the pool opens.
#[derive(Debug, Clone, Copy)]
struct SessionSettings {
    statement_timeout: Option<Duration>,
}

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SessionSettings {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        if let Some(timeout) = self.statement_timeout {
            diesel::sql_query(format!("SET statement_timeout = {}", timeout.as_millis()))
                .execute(conn)
                .map_err(diesel::r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

/// Build the pool. Fails if the initial connections cannot be opened within
/// `connect_timeout`.
pub fn create_pool(config: &DbConfig) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    Pool::builder()
        .max_size(config.max_pool_size)
        .connection_timeout(config.connect_timeout)
        .connection_customizer(Box::new(SessionSettings {
            statement_timeout: config.statement_timeout,
        }))
        .build(manager)
}
