use crate::db::{self, DbPool};
use crate::dto::CreateRestraintDto;
use crate::run_migrations;
use proptest::prelude::*;
use std::sync::Arc;

/// Sets up a test database with migrations applied
///
/// ### Returns
///
/// An Arc-wrapped database connection pool connected to a fresh in-memory database
pub fn setup_test_db() -> Arc<DbPool> {
    // Plain ":memory:" gives each pooled connection its own database, so
    // migrations would not be visible on the others. A uniquely named
    // shared-cache database is shared by the pool and isolated per test.
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");

    Arc::new(pool)
}

/// Builds a restraint payload with the numbers used throughout the tests
pub fn restraint_payload(user_id: Option<&str>, name: &str) -> CreateRestraintDto {
    CreateRestraintDto {
        user_id: user_id.map(str::to_string),
        name: name.to_string(),
        level: 1,
        cost: "3k".to_string(),
        coin_min: 10.0,
        icon: "icon.png".to_string(),
        quote: "Keep going.".to_string(),
    }
}

/// Generates a cost string of whole thousands, in either suffix case
pub fn arb_cost() -> impl Strategy<Value = String> {
    (1u32..10_000, prop::bool::ANY).prop_map(|(thousands, upper)| {
        format!("{}{}", thousands, if upper { "K" } else { "k" })
    })
}

/// Generates a per-minute rate in whole tenths, from 0.1 to 1000.0
pub fn arb_coin_min() -> impl Strategy<Value = f64> {
    (1u32..=10_000).prop_map(|tenths| f64::from(tenths) / 10.0)
}

/// Generates an arbitrary restraint payload with an owner
pub fn arb_restraint_payload() -> impl Strategy<Value = CreateRestraintDto> {
    (
        "[a-zA-Z ]{1,24}",
        0i32..100,
        arb_cost(),
        arb_coin_min(),
        "\\PC{0,16}",
        "\\PC{0,64}",
    )
        .prop_map(|(name, level, cost, coin_min, icon, quote)| CreateRestraintDto {
            user_id: Some(uuid::Uuid::new_v4().to_string()),
            name,
            level,
            cost,
            coin_min,
            icon,
            quote,
        })
}
