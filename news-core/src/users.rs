use chrono::Utc;
use tracing::{debug, info};

use crate::article::Category;
use crate::error::NewsError;
use crate::store::Store;
use crate::user::{NewUser, User};

#[derive(Debug, Clone)]
pub struct UserService {
    users: Store<User>,
}

impl UserService {
    pub fn new(users: Store<User>) -> Self {
        Self { users }
    }

    pub async fn all_users(&self) -> Vec<User> {
        info!("listing all users");
        let mut all = self.users.values().await;
        all.sort_by_key(|user| user.id);
        all
    }

    /// Looks up one user and marks them active now.
    pub async fn user_by_id(&self, id: u64) -> Result<User, NewsError> {
        info!(id, "fetching user");
        let user = self
            .users
            .update(id, |user| user.last_active_at = Utc::now())
            .await
            .ok_or(NewsError::UserNotFound(id))?;
        debug!(id, username = %user.username, "user fetched");
        Ok(user)
    }

    pub async fn create_user(&self, draft: NewUser) -> User {
        info!(username = %draft.username, "creating user");
        let user = self
            .users
            .insert_with(|id| draft.into_user(id, Utc::now()))
            .await;
        info!(id = user.id, username = %user.username, "user created");
        user
    }

    /// Preferred categories of a user; unknown users default to `[TECH]`.
    pub async fn preferences(&self, id: u64) -> Vec<Category> {
        info!(id, "fetching user preferences");
        match self.user_by_id(id).await {
            Ok(user) => user.preferred_categories,
            Err(err) => {
                debug!(error = %err, "falling back to default preferences");
                vec![Category::Tech]
            }
        }
    }
}
