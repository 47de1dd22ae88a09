//! Health endpoints: liveness and readiness checks for orchestration and load
//! balancers.
//!
//! Readiness additionally asks an optional [`DependencyCheck`] (the database
//! pool in production) so traffic is withheld while PostgreSQL is unreachable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use async_trait::async_trait;
use tracing::warn;

/// A downstream dependency the readiness check must see healthy.
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    /// Whether the dependency currently answers.
    async fn healthy(&self) -> bool;
}

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    dependency: Option<Arc<dyn DependencyCheck>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            dependency: None,
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate readiness on the given dependency as well as the ready flag.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Arc<dyn DependencyCheck>) -> Self {
        self.dependency = Some(dependency);
        self
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn dependency_healthy(&self) -> bool {
        match &self.dependency {
            Some(dependency) => dependency.healthy().await,
            None => true,
        }
    }

    fn status_response(healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness check: 200 once started and the dependency answers, 503 otherwise.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ok = state.is_ready() && {
        let healthy = state.dependency_healthy().await;
        if !healthy {
            warn!("readiness dependency check failed");
        }
        healthy
    };
    HealthState::status_response(ok)
}

/// Liveness check: 200 while the process is marked alive, 503 once draining.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_alive())
}
