use crate::db::{DbPool, retry_on_busy};
use crate::models::{Restraint, UpgradeSet, UpgradeSetRecord};
use crate::schema::{restraints, upgrade_sets};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use anyhow::{Result, anyhow};
use tracing::{instrument, debug, info};

/// Loads the restraints of each record and assembles the documents, in record order
fn assemble(conn: &mut SqliteConnection, records: Vec<UpgradeSetRecord>) -> QueryResult<Vec<UpgradeSet>> {
    let children = Restraint::belonging_to(&records)
        .select(Restraint::as_select())
        .order(restraints::position.asc())
        .load::<Restraint>(conn)?;

    let documents = children
        .grouped_by(&records)
        .into_iter()
        .zip(records)
        .map(|(list, record)| UpgradeSet::from_parts(record, list))
        .collect();

    Ok(documents)
}


/// Retrieves the oldest upgrade set
///
/// Upgrade sets are not unique; callers that treat them as a singleton work
/// with this one.
///
/// ### Returns
///
/// A Result containing an Option with the UpgradeSet, or None if there are none
#[instrument(skip(pool))]
pub fn get_first_upgrade_set(pool: &DbPool) -> Result<Option<UpgradeSet>> {
    debug!("Retrieving first upgrade set");

    let conn = &mut pool.get()?;

    let record = upgrade_sets::table
        .order((upgrade_sets::created_at.asc(), upgrade_sets::id.asc()))
        .select(UpgradeSetRecord::as_select())
        .first::<UpgradeSetRecord>(conn)
        .optional()?;

    let Some(record) = record else {
        debug!("No upgrade set found");
        return Ok(None);
    };

    Ok(assemble(conn, vec![record])?.pop())
}


/// Retrieves an upgrade set with its restraints by ID
///
/// ### Returns
///
/// A Result containing an Option with the UpgradeSet if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool), fields(upgrade_set_id = %id))]
pub fn get_upgrade_set(pool: &DbPool, id: &str) -> Result<Option<UpgradeSet>> {
    debug!("Retrieving upgrade set");

    let conn = &mut pool.get()?;

    let record = upgrade_sets::table
        .find(id)
        .select(UpgradeSetRecord::as_select())
        .first::<UpgradeSetRecord>(conn)
        .optional()?;

    let Some(record) = record else {
        debug!("Upgrade set not found");
        return Ok(None);
    };

    Ok(assemble(conn, vec![record])?.pop())
}


/// Retrieves every upgrade set with its restraints, oldest first
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_upgrade_sets(pool: &DbPool) -> Result<Vec<UpgradeSet>> {
    debug!("Listing all upgrade sets");

    let conn = &mut pool.get()?;

    let records = upgrade_sets::table
        .order((upgrade_sets::created_at.asc(), upgrade_sets::id.asc()))
        .select(UpgradeSetRecord::as_select())
        .load::<UpgradeSetRecord>(conn)?;

    let result = assemble(conn, records)?;

    info!("Retrieved {} upgrade sets", result.len());

    Ok(result)
}


/// Saves an upgrade set document, inserting it if it does not exist yet
///
/// The set row and its full list of restraints are written in one
/// transaction, so the stored list always matches the document.
///
/// ### Returns
///
/// A Result containing the document as stored
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - Any statement of the transaction fails
#[instrument(skip(pool, upgrade_set), fields(upgrade_set_id = %upgrade_set.get_id(), restraints = upgrade_set.restraints().len()))]
pub async fn save_upgrade_set(pool: &DbPool, upgrade_set: &UpgradeSet) -> Result<UpgradeSet> {
    debug!("Saving upgrade set");

    let mut document = upgrade_set.clone();
    document.touch();
    let record = document.record();

    let mut conn = pool.get()?;

    retry_on_busy(|| {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(upgrade_sets::table)
                .values(&record)
                .on_conflict(upgrade_sets::id)
                .do_update()
                .set(upgrade_sets::updated_at.eq(record.updated_at))
                .execute(conn)?;

            diesel::delete(restraints::table.filter(restraints::upgrade_set_id.eq(&record.id)))
                .execute(conn)?;

            if !document.restraints().is_empty() {
                diesel::insert_into(restraints::table)
                    .values(document.restraints())
                    .execute(conn)?;
            }

            Ok(())
        })
    })
    .await?;

    drop(conn);

    let saved = get_upgrade_set(pool, &record.id)?
        .ok_or_else(|| anyhow!("Upgrade set with id {} not found after save", record.id))?;

    info!("Saved upgrade set with {} restraints", saved.restraints().len());

    Ok(saved)
}


#[cfg(test)]
mod tests;
