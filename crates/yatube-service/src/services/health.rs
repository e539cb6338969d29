//! Readiness probes

use tracing::warn;

use crate::dto::ReadinessResponse;

use super::context::ServiceContext;

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Probe the database (when PostgreSQL backs the repositories) and the page cache
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.pool() {
            Some(pool) => match yatube_db::ping(pool).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Database health check failed");
                    false
                }
            },
            None => true,
        };

        let cache = match self.ctx.page_cache().health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cache health check failed");
                false
            }
        };

        ReadinessResponse::ready(database, cache)
    }
}
