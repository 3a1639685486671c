use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A player, with their spendable balance and passive income rate
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user (UUID v4 as string)
    id: String,

    /// Coins earned per minute
    coins_per_minute: f64,

    /// Spendable balance
    signup_coin: f64,

    /// When this user was created
    created_at: NaiveDateTime,
}

impl User {
    /// Creates a new user with the given balance and income rate
    pub fn new(signup_coin: f64, coins_per_minute: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            coins_per_minute,
            signup_coin,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_coins_per_minute(&self) -> f64 {
        self.coins_per_minute
    }

    pub fn set_coins_per_minute(&mut self, coins_per_minute: f64) {
        self.coins_per_minute = coins_per_minute;
    }

    pub fn get_signup_coin(&self) -> f64 {
        self.signup_coin
    }

    /// Whether the balance covers `amount`
    pub fn can_afford(&self, amount: f64) -> bool {
        self.signup_coin >= amount
    }

    /// Removes `amount` from the balance
    ///
    /// The caller is responsible for checking [`User::can_afford`] first; the
    /// balance is allowed to go negative.
    pub fn debit(&mut self, amount: f64) {
        self.signup_coin -= amount;
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}
