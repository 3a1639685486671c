use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::cost::{self, CostError};
use super::UpgradeSetRecord;

/// Share of the current rate added to `coin_min` by each upgrade
pub const RATE_GROWTH: f64 = 0.2;

/// Factor applied to the cost by each upgrade
pub const COST_GROWTH: f64 = 2.0;

/// An upgrade item owned by a player, embedded in an upgrade set
///
/// `upgrade_set_id` and `position` only tie the row to its place in the
/// parent document and are not part of the JSON representation.
#[derive(
    Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = crate::schema::restraints)]
#[diesel(belongs_to(UpgradeSetRecord, foreign_key = upgrade_set_id))]
#[diesel(treat_none_as_default_value = false)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Restraint {
    id: String,

    #[serde(skip)]
    upgrade_set_id: String,

    #[serde(skip)]
    position: i32,

    /// The player this restraint belongs to, if any
    user_id: Option<String>,

    name: String,

    level: i32,

    /// Cost in the `"<number>k"` form, see [`cost`]
    cost: String,

    /// Coins per minute this restraint contributes
    coin_min: f64,

    icon: String,

    quote: String,
}

/// Why a restraint cannot be priced for its next level
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error("Restraint is already at the maximum level")]
    MaxLevel,
}

/// The outcome of pricing a level-up, before anything is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeQuote {
    /// The restraint's current cost as a number
    pub cost: f64,

    /// The level the restraint reaches
    pub new_level: i32,

    /// The restraint's rate after the upgrade, which is also the price charged
    pub new_coin_min: f64,
}

impl Restraint {
    /// Creates a restraint that is not yet attached to an upgrade set
    pub fn new(
        user_id: Option<String>,
        name: String,
        level: i32,
        cost: String,
        coin_min: f64,
        icon: String,
        quote: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            upgrade_set_id: String::new(),
            position: 0,
            user_id,
            name,
            level,
            cost,
            coin_min,
            icon,
            quote,
        }
    }

    /// Places this restraint at `position` within the upgrade set `upgrade_set_id`
    pub(crate) fn attach(&mut self, upgrade_set_id: &str, position: i32) {
        self.upgrade_set_id = upgrade_set_id.to_string();
        self.position = position;
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_upgrade_set_id(&self) -> String {
        self.upgrade_set_id.clone()
    }

    pub fn get_position(&self) -> i32 {
        self.position
    }

    pub fn get_user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_level(&self) -> i32 {
        self.level
    }

    pub fn get_cost(&self) -> String {
        self.cost.clone()
    }

    pub fn get_coin_min(&self) -> f64 {
        self.coin_min
    }

    pub fn get_icon(&self) -> String {
        self.icon.clone()
    }

    pub fn get_quote(&self) -> String {
        self.quote.clone()
    }

    /// Prices the next level of this restraint
    ///
    /// ### Errors
    ///
    /// Returns [`UpgradeError::Cost`] if the stored cost cannot be parsed and
    /// [`UpgradeError::MaxLevel`] if the level cannot go any higher.
    pub fn upgrade_quote(&self) -> Result<UpgradeQuote, UpgradeError> {
        let cost = cost::parse_cost(&self.cost)?;
        let new_level = self.level.checked_add(1).ok_or(UpgradeError::MaxLevel)?;

        Ok(UpgradeQuote {
            cost,
            new_level,
            new_coin_min: self.coin_min + self.coin_min * RATE_GROWTH,
        })
    }

    /// Levels this restraint up according to `quote`
    pub fn apply_upgrade(&mut self, quote: &UpgradeQuote) {
        self.level = quote.new_level;
        self.cost = cost::format_cost(quote.cost * COST_GROWTH);
        self.coin_min = quote.new_coin_min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cost: &str, coin_min: f64, level: i32) -> Restraint {
        Restraint::new(
            Some("user-1".to_string()),
            "Iron Cuffs".to_string(),
            level,
            cost.to_string(),
            coin_min,
            "cuffs.png".to_string(),
            "Heavy, but honest.".to_string(),
        )
    }

    #[test]
    fn test_restraint_new() {
        let restraint = sample("3k", 10.0, 1);

        assert!(Uuid::parse_str(&restraint.get_id()).is_ok());
        assert_eq!(restraint.get_user_id(), Some("user-1"));
        assert_eq!(restraint.get_name(), "Iron Cuffs");
        assert_eq!(restraint.get_upgrade_set_id(), "");
        assert_eq!(restraint.get_position(), 0);
    }

    #[test]
    fn test_upgrade_quote() {
        let quote = sample("3k", 10.0, 1).upgrade_quote().unwrap();

        assert_eq!(quote.cost, 3000.0);
        assert_eq!(quote.new_coin_min, 12.0);
    }

    #[test]
    fn test_upgrade_quote_bad_cost() {
        let result = sample("three", 10.0, 1).upgrade_quote();

        assert_eq!(result, Err(UpgradeError::Cost(CostError::NotANumber("three".to_string()))));
    }

    #[test]
    fn test_upgrade_quote_at_max_level() {
        let restraint = sample("3k", 10.0, i32::MAX);

        assert_eq!(restraint.upgrade_quote(), Err(UpgradeError::MaxLevel));
    }

    #[test]
    fn test_upgrade_quote_negative_level() {
        let quote = sample("3k", 10.0, -1).upgrade_quote().unwrap();

        assert_eq!(quote.new_level, 0);
    }

    #[test]
    fn test_apply_upgrade() {
        let mut restraint = sample("3k", 10.0, 1);
        let quote = restraint.upgrade_quote().unwrap();
        restraint.apply_upgrade(&quote);

        assert_eq!(restraint.get_level(), 2);
        assert_eq!(restraint.get_cost(), "6k");
        assert_eq!(restraint.get_coin_min(), 12.0);
    }

    #[test]
    fn test_apply_upgrade_twice() {
        let mut restraint = sample("1.5K", 5.0, 4);
        for _ in 0..2 {
            let quote = restraint.upgrade_quote().unwrap();
            restraint.apply_upgrade(&quote);
        }

        assert_eq!(restraint.get_level(), 6);
        assert_eq!(restraint.get_cost(), "6k");
        assert!((restraint.get_coin_min() - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_shape() {
        let mut restraint = sample("3k", 10.0, 1);
        restraint.attach("set-1", 3);
        let json = serde_json::to_value(&restraint).unwrap();

        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["coinMin"], 10.0);
        assert_eq!(json["cost"], "3k");
        assert!(json.get("upgradeSetId").is_none());
        assert!(json.get("position").is_none());
    }
}
