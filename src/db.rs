use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgPool};
use tracing::{error, info, warn};

use crate::config::DbConfig;

/// Builds the pool without touching the network; connections open on demand.
pub fn build_pool(cfg: &DbConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.name);

    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .idle_timeout(cfg.idle_timeout())
        .acquire_timeout(cfg.connect_timeout())
        // idle connections are pinged here; a failed ping is logged and the connection dropped
        .test_before_acquire(false)
        .before_acquire(|conn, meta| {
            Box::pin(async move {
                match conn.ping().await {
                    Ok(()) => Ok(true),
                    Err(e) => {
                        warn!(error = %e, idle_for = ?meta.idle_for, "idle connection failed liveness check; discarding");
                        Ok(false)
                    }
                }
            })
        })
        .connect_lazy_with(options)
}

/// One acquisition to report reachability. Failure is logged only; requests
/// will fail individually until the database comes back.
pub async fn check_reachable(db: &PgPool) -> bool {
    match db.acquire().await {
        Ok(conn) => {
            drop(conn);
            info!("connected to PostgreSQL");
            true
        }
        Err(e) => {
            error!(error = %e, "error connecting to PostgreSQL");
            false
        }
    }
}
