//! Service wiring: record stores, sessions, the mock user directory.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use stonedesk_auth::{InMemorySessionStore, SessionStore, SessionToken, UserDirectory};
use stonedesk_core::DomainResult;
use stonedesk_infra::{Repositories, seed_demo_data};

use crate::config::ApiConfig;

pub struct AppServices {
    repos: Repositories,
    sessions: Arc<InMemorySessionStore>,
    users: UserDirectory,
    submit_delay: Duration,
    low_stock_threshold: u32,
}

pub fn build_services(config: &ApiConfig) -> DomainResult<AppServices> {
    let repos = Repositories::new();
    if config.seed_demo_data {
        seed_demo_data(&repos, today())?;
    }

    Ok(AppServices {
        repos,
        sessions: Arc::new(InMemorySessionStore::new()),
        users: UserDirectory::demo(),
        submit_delay: config.submit_delay,
        low_stock_threshold: config.low_stock_threshold,
    })
}

/// Local calendar date; reports have no timezone handling beyond this.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl AppServices {
    pub fn repos(&self) -> &Repositories {
        &self.repos
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn sessions(&self) -> Arc<InMemorySessionStore> {
        self.sessions.clone()
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }

    pub fn end_session(&self, token: &SessionToken) -> bool {
        self.sessions.remove(token)
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    /// Simulated round trip for login and form submissions.
    pub async fn simulate_latency(&self) {
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
    }
}
