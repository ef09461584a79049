//! Diesel model for the per-tenant demo dataset marker.

use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::demo_seeds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DemoSeed {
    pub owner_id: String,
    pub seeded_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::demo_seeds)]
pub struct NewDemoSeed<'a> {
    pub owner_id: &'a str,
}
