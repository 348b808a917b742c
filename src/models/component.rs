use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::component::{Component as DomainComponent, ComponentSpecs};
use crate::domain::types::{
    CategorySlug, ComponentName, ComponentPrice, RamType, Socket, TypeConstraintError, Watts,
};

/// Diesel model representing the `components` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::components)]
pub struct Component {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub socket: Option<String>,
    pub ram_type: Option<String>,
    pub tdp: Option<i32>,
    pub psu_wattage: Option<i32>,
    pub specs_json: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Empty or whitespace-only text columns count as "not populated".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Component {
    /// Convert a row into a domain component, attaching the category slug
    /// delivered by the join against `categories`.
    pub fn into_domain(self, slug: &str) -> Result<DomainComponent, TypeConstraintError> {
        Ok(DomainComponent {
            id: self.id.try_into()?,
            category_id: self.category_id.try_into()?,
            category: CategorySlug::try_from(slug)?,
            name: ComponentName::new(self.name)?,
            price: ComponentPrice::new(self.price)?,
            image: non_blank(self.image),
            socket: non_blank(self.socket).map(Socket::new).transpose()?,
            ram_type: non_blank(self.ram_type).map(RamType::new).transpose()?,
            tdp: self.tdp.map(Watts::new).transpose()?,
            psu_wattage: self.psu_wattage.map(Watts::new).transpose()?,
            specs: ComponentSpecs::parse(self.specs_json.as_deref()),
        })
    }
}
