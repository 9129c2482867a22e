use log::warn;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::cache::DashboardCache;
use crate::db::models::UserId;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Session {
    pub db_pool: SqlitePool,
    caller: Option<UserId>,
    dashboard: Arc<DashboardCache>,
}

impl Session {
    pub fn new(db_pool: SqlitePool, caller: Option<UserId>, dashboard: Arc<DashboardCache>) -> Self {
        Self {
            db_pool,
            caller,
            dashboard,
        }
    }

    /// A session acting for `user` with a private dashboard cache.
    pub fn for_user(db_pool: SqlitePool, user: UserId) -> Self {
        Self::new(db_pool, Some(user), Arc::new(DashboardCache::new()))
    }

    pub fn anonymous(db_pool: SqlitePool) -> Self {
        Self::new(db_pool, None, Arc::new(DashboardCache::new()))
    }

    pub fn caller(&self) -> Option<&UserId> {
        self.caller.as_ref()
    }

    pub fn dashboard(&self) -> &DashboardCache {
        &self.dashboard
    }

    pub(crate) fn require_caller(&self) -> Result<&UserId> {
        self.caller.as_ref().ok_or(Error::Unauthenticated)
    }

    /// Called after every successful mutation.
    pub(crate) async fn mutated(&self) {
        self.dashboard.invalidate().await;
    }

    /// Accept `resolved` only when it is the caller. Someone else's row and a
    /// missing row produce the same error.
    pub(crate) fn check_owner(
        &self,
        caller: &UserId,
        resolved: Option<UserId>,
        entity: &'static str,
        id: i64,
    ) -> Result<()> {
        match resolved {
            Some(owner) if &owner == caller => Ok(()),
            Some(owner) => {
                warn!(
                    "{} {} belongs to {}, rejecting request from {}",
                    entity, id, owner, caller
                );
                Err(Error::not_found(entity, id))
            }
            None => Err(Error::not_found(entity, id)),
        }
    }
}

pub(crate) fn require_positive_id(entity: &str, id: i64) -> Result<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(Error::validation(format!("{} id must be positive", entity)))
    }
}
