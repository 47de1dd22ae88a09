//! In-memory repository adapters mirroring the PostgreSQL constraints:
//! unique usernames and emails, owner foreign keys and cascade deletion.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use feedeyes::domain::ports::{
    FeedReportPersistenceError, FeedReportRepository, NewUser, UserCredentials,
    UserPersistenceError, UserRepository,
};
use feedeyes::domain::{
    EmailAddress, FeedReport, NewFeedReport, ReportId, User, UserId, Username,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<UserCredentials>>,
}

impl InMemoryUsers {
    pub fn contains(&self, id: &UserId) -> bool {
        lock(&self.rows).iter().any(|row| row.user.id() == id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        lock(&self.rows)
            .iter()
            .find(|row| row.user.username().as_ref() == username)
            .map(|row| row.user.clone())
    }

    fn stored(user: &NewUser) -> UserCredentials {
        UserCredentials {
            user: User::new(
                user.id,
                user.username.clone(),
                user.email.clone(),
                user.role,
                Utc::now(),
            ),
            password_hash: user.password_hash.clone(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|row| row.user.username() == &user.username || row.user.email() == &user.email)
        {
            return Err(UserPersistenceError::conflict("users_username_key"));
        }
        let stored = Self::stored(user);
        rows.push(stored.clone());
        Ok(stored.user)
    }

    async fn upsert_by_username(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut rows = lock(&self.rows);
        match rows
            .iter_mut()
            .find(|row| row.user.username() == &user.username)
        {
            Some(row) => {
                row.user = User::new(
                    *row.user.id(),
                    user.username.clone(),
                    user.email.clone(),
                    user.role,
                    row.user.created_at(),
                );
                row.password_hash = user.password_hash.clone();
                Ok(row.user.clone())
            }
            None => {
                let stored = Self::stored(user);
                rows.push(stored.clone());
                Ok(stored.user)
            }
        }
    }

    async fn username_or_email_taken(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError> {
        Ok(lock(&self.rows)
            .iter()
            .any(|row| row.user.username() == username || row.user.email() == email))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.user.id() == id)
            .map(|row| row.user.clone()))
    }

    async fn find_credentials(
        &self,
        identifier: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let rows = lock(&self.rows);
        let by_username = rows
            .iter()
            .find(|row| row.user.username().as_ref() == identifier);
        let by_email = || {
            rows.iter()
                .find(|row| row.user.email().as_ref() == identifier)
        };
        Ok(by_username.or_else(by_email).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = lock(&self.rows).iter().map(|row| row.user.clone()).collect();
        users.reverse();
        users.truncate(limit);
        Ok(users)
    }

    async fn delete_by_username(
        &self,
        username: &Username,
    ) -> Result<bool, UserPersistenceError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.user.username() != username);
        Ok(rows.len() < before)
    }
}

/// Reports whose owners must exist in the paired user store. Reports of a
/// deleted owner disappear, as with `ON DELETE CASCADE`.
pub struct InMemoryFeedReports {
    users: Arc<InMemoryUsers>,
    rows: Mutex<Vec<FeedReport>>,
}

impl InMemoryFeedReports {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self {
            users,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn all(&self) -> Vec<FeedReport> {
        self.live()
    }

    fn live(&self) -> Vec<FeedReport> {
        let mut rows = lock(&self.rows);
        rows.retain(|report| self.users.contains(report.owner()));
        let mut reports = rows.clone();
        // Newest date first, then newest insertion.
        reports.reverse();
        reports.sort_by(|a, b| b.report_date().cmp(&a.report_date()));
        reports
    }
}

#[async_trait]
impl FeedReportRepository for InMemoryFeedReports {
    async fn insert(
        &self,
        report: &NewFeedReport,
    ) -> Result<FeedReport, FeedReportPersistenceError> {
        if !self.users.contains(&report.owner) {
            return Err(FeedReportPersistenceError::unknown_owner(
                report.owner.to_string(),
            ));
        }
        let stored = FeedReport::from_new(report.clone(), Utc::now());
        lock(&self.rows).push(stored.clone());
        Ok(stored)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<FeedReport>, FeedReportPersistenceError> {
        let mut reports: Vec<FeedReport> = self
            .live()
            .into_iter()
            .filter(|report| report.owner() == owner)
            .collect();
        if let Some(limit) = limit {
            reports.truncate(limit);
        }
        Ok(reports)
    }

    async fn list_all(&self) -> Result<Vec<FeedReport>, FeedReportPersistenceError> {
        Ok(self.live())
    }

    async fn find_by_id(
        &self,
        id: &ReportId,
    ) -> Result<Option<FeedReport>, FeedReportPersistenceError> {
        Ok(self.live().into_iter().find(|report| report.id() == id))
    }
}
