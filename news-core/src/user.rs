use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::article::Category;
use crate::store::Keyed;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub preferred_categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Keyed for User {
    fn key(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub preferred_categories: Vec<Category>,
}

impl NewUser {
    pub fn into_user(self, id: u64, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            preferred_categories: self.preferred_categories,
            created_at: now,
            last_active_at: now,
        }
    }
}
