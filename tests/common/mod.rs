//! Helpers for integration tests.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::NamedTempFile;

use rigforge::db::{DbPool, establish_connection_pool};
use rigforge::schema::{categories, components};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// The seeded category id for a slug.
    pub fn category_id(&self, slug: &str) -> i32 {
        let mut conn = self.pool.get().expect("connection");
        categories::table
            .filter(categories::slug.eq(slug))
            .select(categories::id)
            .first(&mut conn)
            .expect("seeded category should exist")
    }

    /// Insert a catalog component, returning its id.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_component(
        &self,
        slug: &str,
        name: &str,
        price: f64,
        socket: Option<&str>,
        ram_type: Option<&str>,
        tdp: Option<i32>,
        psu_wattage: Option<i32>,
        specs_json: Option<&str>,
    ) -> i32 {
        let mut conn = self.pool.get().expect("connection");
        let category_id = self.category_id(slug);

        diesel::insert_into(components::table)
            .values((
                components::category_id.eq(category_id),
                components::name.eq(name),
                components::price.eq(price),
                components::socket.eq(socket),
                components::ram_type.eq(ram_type),
                components::tdp.eq(tdp),
                components::psu_wattage.eq(psu_wattage),
                components::specs_json.eq(specs_json),
            ))
            .returning(components::id)
            .get_result(&mut conn)
            .expect("should insert component")
    }
}
