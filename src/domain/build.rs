use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::component::Component;
use crate::domain::types::{BuildId, BuildName, UserId};

/// A persisted build snapshot.
///
/// Totals are frozen at save time; components are referenced by id, so later
/// catalog price changes do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBuild {
    pub id: BuildId,
    pub user_id: UserId,
    pub name: BuildName,
    pub total_price: f64,
    pub total_tdp: i32,
    pub created_at: NaiveDateTime,
    pub components: Vec<Component>,
}

/// Data required to insert a new [`SavedBuild`] header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSavedBuild {
    pub user_id: UserId,
    pub name: BuildName,
    pub total_price: f64,
    pub total_tdp: i32,
    pub created_at: NaiveDateTime,
}
