use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::build::{NewSavedBuild as DomainNewSavedBuild, SavedBuild as DomainSavedBuild};
use crate::domain::component::Component as DomainComponent;
use crate::domain::types::{BuildName, TypeConstraintError};

/// Diesel model representing the `saved_builds` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::saved_builds)]
pub struct SavedBuild {
    pub id: i32,
    pub user_id: i32,
    pub build_name: String,
    pub total_price: f64,
    pub total_tdp: i32,
    pub created_at: NaiveDateTime,
}

impl SavedBuild {
    /// Convert a header row plus its resolved components.
    pub fn into_domain(
        self,
        components: Vec<DomainComponent>,
    ) -> Result<DomainSavedBuild, TypeConstraintError> {
        Ok(DomainSavedBuild {
            id: self.id.try_into()?,
            user_id: self.user_id.try_into()?,
            name: BuildName::new(self.build_name)?,
            total_price: self.total_price,
            total_tdp: self.total_tdp,
            created_at: self.created_at,
            components,
        })
    }
}

/// Insertable form of [`SavedBuild`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::saved_builds)]
pub struct NewSavedBuild {
    pub user_id: i32,
    pub build_name: String,
    pub total_price: f64,
    pub total_tdp: i32,
    pub created_at: NaiveDateTime,
}

impl From<DomainNewSavedBuild> for NewSavedBuild {
    fn from(build: DomainNewSavedBuild) -> Self {
        Self {
            user_id: build.user_id.get(),
            build_name: build.name.into_inner(),
            total_price: build.total_price,
            total_tdp: build.total_tdp,
            created_at: build.created_at,
        }
    }
}

/// Insertable row linking a saved build to one component.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::build_items)]
pub struct NewBuildItem {
    pub build_id: i32,
    pub component_id: i32,
    pub quantity: i32,
}
