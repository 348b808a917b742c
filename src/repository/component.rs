use diesel::prelude::*;

use crate::domain::component::Component;
use crate::domain::types::{CategorySlug, ComponentId};
use crate::models::component::Component as DbComponent;
use crate::repository::{ComponentReader, DieselRepository, RepositoryResult};

fn into_domain(rows: Vec<(DbComponent, String)>) -> RepositoryResult<Vec<Component>> {
    rows.into_iter()
        .map(|(row, slug)| row.into_domain(&slug).map_err(Into::into))
        .collect()
}

impl ComponentReader for DieselRepository {
    fn list_components_by_category(&self, slug: CategorySlug) -> RepositoryResult<Vec<Component>> {
        use crate::schema::{categories, components};

        let mut conn = self.conn()?;

        let rows: Vec<(DbComponent, String)> = components::table
            .inner_join(categories::table)
            .filter(categories::slug.eq(slug.as_str()))
            .order(components::price.asc())
            .select((components::all_columns, categories::slug))
            .load(&mut conn)?;

        into_domain(rows)
    }

    fn get_component_by_id(&self, id: ComponentId) -> RepositoryResult<Option<Component>> {
        use crate::schema::{categories, components};

        let mut conn = self.conn()?;

        let row: Option<(DbComponent, String)> = components::table
            .inner_join(categories::table)
            .filter(components::id.eq(id.get()))
            .select((components::all_columns, categories::slug))
            .first(&mut conn)
            .optional()?;

        row.map(|(row, slug)| row.into_domain(&slug).map_err(Into::into))
            .transpose()
    }

    fn get_components_by_ids(&self, ids: &[ComponentId]) -> RepositoryResult<Vec<Component>> {
        use crate::schema::{categories, components};

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let rows: Vec<(DbComponent, String)> = components::table
            .inner_join(categories::table)
            .filter(components::id.eq_any(raw_ids))
            .select((components::all_columns, categories::slug))
            .load(&mut conn)?;

        into_domain(rows)
    }
}
