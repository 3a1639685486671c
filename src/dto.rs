use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Restraint;

/// Data transfer object for creating a new restraint
///
/// Every field is optional in the request body; missing fields take their
/// default value.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateRestraintDto {
    /// The player the restraint belongs to
    pub user_id: Option<String>,

    pub name: String,

    /// The starting level
    pub level: i32,

    /// The cost in `"<number>k"` form
    pub cost: String,

    /// Coins per minute the restraint contributes
    pub coin_min: f64,

    pub icon: String,

    pub quote: String,
}

impl CreateRestraintDto {
    /// Builds the restraint this payload describes
    pub fn into_restraint(self) -> Restraint {
        Restraint::new(
            self.user_id,
            self.name,
            self.level,
            self.cost,
            self.coin_min,
            self.icon,
            self.quote,
        )
    }
}

/// Data transfer object for adding to a user's coins-per-minute rate
///
/// Both fields are required; they are optional here so that the handler can
/// answer a missing field with its own error.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCoinsPerMinuteDto {
    pub user_id: Option<String>,

    /// The amount to add to the current rate
    ///
    /// `None` when the field is absent, `Some(None)` for an explicit `null`,
    /// which adds nothing.
    #[serde(deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub coin_min: Option<Option<f64>>,
}

/// Marks a field that is present in the body, even when its value is `null`
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Data transfer object for creating a new user
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserDto {
    /// Starting balance
    pub signup_coin: f64,

    /// Starting passive income rate
    pub coins_per_minute: f64,
}

/// A plain confirmation message
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
