use crate::db::{DbConnection, DbPool};
use crate::domain::build::{NewSavedBuild, SavedBuild};
use crate::domain::category::Category;
use crate::domain::component::Component;
use crate::domain::types::{BuildId, CategorySlug, ComponentId, UserId};

pub mod build;
pub mod category;
pub mod component;
pub mod errors;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for catalog components.
pub trait ComponentReader {
    /// List all components of one category, ascending by price.
    fn list_components_by_category(&self, slug: CategorySlug) -> RepositoryResult<Vec<Component>>;
    /// Retrieve a component by its identifier.
    fn get_component_by_id(&self, id: ComponentId) -> RepositoryResult<Option<Component>>;
    /// Resolve a set of identifiers; ids without a matching row are skipped.
    fn get_components_by_ids(&self, ids: &[ComponentId]) -> RepositoryResult<Vec<Component>>;
}

/// Read-only operations for category reference data.
pub trait CategoryReader {
    /// List all categories ordered by `sort_order`.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations for saved builds.
pub trait BuildReader {
    /// List a user's saved builds, newest first, components resolved.
    fn list_builds_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<SavedBuild>>;
    /// Retrieve one saved build with its components.
    fn get_build_by_id(&self, id: BuildId) -> RepositoryResult<Option<SavedBuild>>;
}

/// Write operations for saved builds.
pub trait BuildWriter {
    /// Persist a build header together with its component references.
    /// The header and items are written in a single transaction.
    fn create_build(
        &self,
        build: &NewSavedBuild,
        component_ids: &[ComponentId],
    ) -> RepositoryResult<BuildId>;
    /// Delete a build owned by `user_id`; returns the number of rows removed.
    fn delete_build(&self, id: BuildId, user_id: UserId) -> RepositoryResult<usize>;
}
