use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Restraint;

/// The `upgrade_sets` row backing an [`UpgradeSet`] document
#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::upgrade_sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UpgradeSetRecord {
    pub(crate) id: String,
    pub(crate) created_at: NaiveDateTime,
    pub(crate) updated_at: NaiveDateTime,
}

/// A document grouping an ordered list of restraints
///
/// Restraints keep the order in which they were pushed; their `position`
/// always equals their index in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSet {
    id: String,

    created_at: NaiveDateTime,

    updated_at: NaiveDateTime,

    #[serde(rename = "RESTRAINTS")]
    restraints: Vec<Restraint>,
}

impl UpgradeSet {
    /// Creates an empty upgrade set
    pub fn new() -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            restraints: Vec::new(),
        }
    }

    /// Assembles a document from its row and its restraints, already ordered by position
    pub(crate) fn from_parts(record: UpgradeSetRecord, restraints: Vec<Restraint>) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            restraints,
        }
    }

    /// The row to persist for this document
    pub(crate) fn record(&self) -> UpgradeSetRecord {
        UpgradeSetRecord {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().naive_utc();
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    pub fn get_updated_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.updated_at, Utc)
    }

    pub fn restraints(&self) -> &[Restraint] {
        &self.restraints
    }

    /// Appends a restraint to the end of the list
    pub fn push_restraint(&mut self, mut restraint: Restraint) {
        let position = self.restraints.len() as i32;
        restraint.attach(&self.id, position);
        self.restraints.push(restraint);
    }

    pub fn restraint(&self, restraint_id: &str) -> Option<&Restraint> {
        self.restraints.iter().find(|r| r.get_id() == restraint_id)
    }

    pub fn restraint_mut(&mut self, restraint_id: &str) -> Option<&mut Restraint> {
        self.restraints.iter_mut().find(|r| r.get_id() == restraint_id)
    }

    /// The user charged for upgrades in this set
    ///
    /// This is the `user_id` of the first restraint in the list that has one,
    /// regardless of which restraint is being upgraded.
    pub fn owner_id(&self) -> Option<&str> {
        self.restraints
            .iter()
            .filter_map(Restraint::get_user_id)
            .find(|id| !id.is_empty())
    }
}

impl Default for UpgradeSet {
    fn default() -> Self {
        Self::new()
    }
}
