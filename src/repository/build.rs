use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::build::{NewSavedBuild, SavedBuild};
use crate::domain::component::Component;
use crate::domain::types::{BuildId, ComponentId, UserId};
use crate::models::build::{NewBuildItem, NewSavedBuild as DbNewSavedBuild};
use crate::models::component::Component as DbComponent;
use crate::repository::{BuildReader, BuildWriter, DieselRepository, RepositoryResult};

impl DieselRepository {
    /// Components referenced by one build, in category display order.
    fn components_for_build(
        &self,
        conn: &mut DbConnection,
        build_id: i32,
    ) -> RepositoryResult<Vec<Component>> {
        use crate::schema::{build_items, categories, components};

        let rows: Vec<(DbComponent, String)> = build_items::table
            .inner_join(components::table.inner_join(categories::table))
            .filter(build_items::build_id.eq(build_id))
            .order(categories::sort_order.asc())
            .select((components::all_columns, categories::slug))
            .load(conn)?;

        rows.into_iter()
            .map(|(row, slug)| row.into_domain(&slug).map_err(Into::into))
            .collect()
    }
}

impl BuildReader for DieselRepository {
    fn list_builds_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<SavedBuild>> {
        use crate::schema::saved_builds;

        let mut conn = self.conn()?;

        let headers = saved_builds::table
            .filter(saved_builds::user_id.eq(user_id.get()))
            .order(saved_builds::created_at.desc())
            .load::<crate::models::build::SavedBuild>(&mut conn)?;

        let mut builds = Vec::with_capacity(headers.len());
        for header in headers {
            let components = self.components_for_build(&mut conn, header.id)?;
            builds.push(header.into_domain(components)?);
        }

        Ok(builds)
    }

    fn get_build_by_id(&self, id: BuildId) -> RepositoryResult<Option<SavedBuild>> {
        use crate::schema::saved_builds;

        let mut conn = self.conn()?;

        let header = saved_builds::table
            .filter(saved_builds::id.eq(id.get()))
            .first::<crate::models::build::SavedBuild>(&mut conn)
            .optional()?;

        let Some(header) = header else {
            return Ok(None);
        };

        let components = self.components_for_build(&mut conn, header.id)?;
        Ok(Some(header.into_domain(components)?))
    }
}

impl BuildWriter for DieselRepository {
    fn create_build(
        &self,
        build: &NewSavedBuild,
        component_ids: &[ComponentId],
    ) -> RepositoryResult<BuildId> {
        use crate::schema::{build_items, saved_builds};

        let mut conn = self.conn()?;
        let db_build: DbNewSavedBuild = build.clone().into();

        let build_id = conn.transaction(|conn| {
            let id: i32 = diesel::insert_into(saved_builds::table)
                .values(&db_build)
                .returning(saved_builds::id)
                .get_result(conn)?;

            let items: Vec<NewBuildItem> = component_ids
                .iter()
                .map(|component_id| NewBuildItem {
                    build_id: id,
                    component_id: component_id.get(),
                    quantity: 1,
                })
                .collect();

            diesel::insert_into(build_items::table)
                .values(&items)
                .execute(conn)?;

            Ok::<i32, diesel::result::Error>(id)
        })?;

        Ok(BuildId::new(build_id)?)
    }

    fn delete_build(&self, id: BuildId, user_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::{build_items, saved_builds};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            // Scope the item delete through ownership so a foreign build id
            // cannot shed its items.
            diesel::delete(
                build_items::table.filter(
                    build_items::build_id.eq_any(
                        saved_builds::table
                            .filter(saved_builds::id.eq(id.get()))
                            .filter(saved_builds::user_id.eq(user_id.get()))
                            .select(saved_builds::id),
                    ),
                ),
            )
            .execute(conn)?;

            diesel::delete(
                saved_builds::table
                    .filter(saved_builds::id.eq(id.get()))
                    .filter(saved_builds::user_id.eq(user_id.get())),
            )
            .execute(conn)
        })?;

        Ok(affected)
    }
}
