use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, CategorySlug};

/// A catalog partition record.
///
/// Categories are immutable reference data: the seven slugs are fixed and
/// `sort_order` drives display ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub name: CategoryName,
    pub sort_order: i32,
}
