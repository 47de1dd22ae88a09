//! Builders wiring the Diesel adapters into the domain services.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use mockable::DefaultClock;
use tracing::warn;

use feedeyes::domain::{FeedReportService, UserDirectoryService};
use feedeyes::inbound::http::health::DependencyCheck;
use feedeyes::inbound::http::state::HttpState;
use feedeyes::outbound::persistence::{DbPool, DieselFeedReportRepository, DieselUserRepository};

/// Readiness check that round-trips a statement through the pool.
pub struct PoolHealth(pub DbPool);

#[async_trait]
impl DependencyCheck for PoolHealth {
    async fn healthy(&self) -> bool {
        match self.0.ping().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "database ping failed");
                false
            }
        }
    }
}

/// Construct the handler state over PostgreSQL-backed repositories.
pub fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let directory = UserDirectoryService::new(Arc::new(DieselUserRepository::new(pool.clone())));
    let reports = FeedReportService::new(
        Arc::new(DieselFeedReportRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::from_services(
        Arc::new(directory),
        Arc::new(reports),
    ))
}
