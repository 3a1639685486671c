use super::*;
use crate::test_utils::setup_test_db;

fn restraint(user_id: Option<&str>, name: &str, cost: &str) -> Restraint {
    Restraint::new(
        user_id.map(str::to_string),
        name.to_string(),
        1,
        cost.to_string(),
        10.0,
        "icon.png".to_string(),
        "Keep going.".to_string(),
    )
}

#[tokio::test]
async fn test_get_first_upgrade_set_empty() {
    let pool = setup_test_db();

    assert!(get_first_upgrade_set(&pool).unwrap().is_none());
}

#[tokio::test]
async fn test_save_new_upgrade_set() {
    let pool = setup_test_db();

    let mut set = UpgradeSet::new();
    set.push_restraint(restraint(Some("alice"), "Cuffs", "3k"));

    let saved = save_upgrade_set(&pool, &set).await.unwrap();

    assert_eq!(saved.get_id(), set.get_id());
    assert_eq!(saved.restraints().len(), 1);
    assert_eq!(saved.restraints()[0].get_name(), "Cuffs");
    assert_eq!(saved.restraints()[0].get_user_id(), Some("alice"));
    assert_eq!(saved.restraints()[0].get_cost(), "3k");
}

#[tokio::test]
async fn test_save_empty_upgrade_set() {
    let pool = setup_test_db();

    let saved = save_upgrade_set(&pool, &UpgradeSet::new()).await.unwrap();

    assert!(saved.restraints().is_empty());
    assert_eq!(list_upgrade_sets(&pool).unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_appended_restraint_keeps_order() {
    let pool = setup_test_db();

    let mut set = UpgradeSet::new();
    set.push_restraint(restraint(Some("alice"), "First", "1k"));
    let saved = save_upgrade_set(&pool, &set).await.unwrap();

    let mut reloaded = get_upgrade_set(&pool, &saved.get_id()).unwrap().unwrap();
    reloaded.push_restraint(restraint(Some("alice"), "Second", "2k"));
    reloaded.push_restraint(restraint(None, "Third", "3k"));
    save_upgrade_set(&pool, &reloaded).await.unwrap();

    let stored = get_upgrade_set(&pool, &saved.get_id()).unwrap().unwrap();
    let names: Vec<String> = stored.restraints().iter().map(|r| r.get_name()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert_eq!(stored.restraints()[0].get_id(), saved.restraints()[0].get_id());
}

#[tokio::test]
async fn test_save_updates_restraint_in_place() {
    let pool = setup_test_db();

    let mut set = UpgradeSet::new();
    let target = restraint(Some("alice"), "Cuffs", "3k");
    let target_id = target.get_id();
    set.push_restraint(restraint(Some("alice"), "Chain", "1k"));
    set.push_restraint(target);
    save_upgrade_set(&pool, &set).await.unwrap();

    let mut loaded = get_upgrade_set(&pool, &set.get_id()).unwrap().unwrap();
    let item = loaded.restraint_mut(&target_id).unwrap();
    let quote = item.upgrade_quote().unwrap();
    item.apply_upgrade(&quote);
    save_upgrade_set(&pool, &loaded).await.unwrap();

    let stored = get_upgrade_set(&pool, &set.get_id()).unwrap().unwrap();
    assert_eq!(stored.restraints().len(), 2);
    assert_eq!(stored.restraints()[0].get_cost(), "1k");
    let upgraded = stored.restraint(&target_id).unwrap();
    assert_eq!(upgraded.get_level(), 2);
    assert_eq!(upgraded.get_cost(), "6k");
    assert_eq!(upgraded.get_coin_min(), 12.0);
    assert_eq!(upgraded.get_position(), 1);
}

#[tokio::test]
async fn test_get_upgrade_set_not_found() {
    let pool = setup_test_db();

    let result = get_upgrade_set(&pool, &uuid::Uuid::new_v4().to_string()).unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_upgrade_sets_groups_restraints() {
    let pool = setup_test_db();

    let mut first = UpgradeSet::new();
    first.push_restraint(restraint(Some("alice"), "A1", "1k"));
    first.push_restraint(restraint(Some("alice"), "A2", "2k"));
    save_upgrade_set(&pool, &first).await.unwrap();

    let mut second = UpgradeSet::new();
    second.push_restraint(restraint(Some("bob"), "B1", "5k"));
    save_upgrade_set(&pool, &second).await.unwrap();

    let all = list_upgrade_sets(&pool).unwrap();
    assert_eq!(all.len(), 2);

    let stored_first = all.iter().find(|s| s.get_id() == first.get_id()).unwrap();
    let stored_second = all.iter().find(|s| s.get_id() == second.get_id()).unwrap();
    assert_eq!(stored_first.restraints().len(), 2);
    assert_eq!(stored_first.restraints()[1].get_name(), "A2");
    assert_eq!(stored_second.restraints().len(), 1);
    assert_eq!(stored_second.restraints()[0].get_user_id(), Some("bob"));
}

#[tokio::test]
async fn test_get_first_upgrade_set_is_oldest() {
    let pool = setup_test_db();

    let older = UpgradeSet::new();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = UpgradeSet::new();

    // saved newest first, so insertion order does not decide
    save_upgrade_set(&pool, &newer).await.unwrap();
    save_upgrade_set(&pool, &older).await.unwrap();

    let first = get_first_upgrade_set(&pool).unwrap().unwrap();
    assert_eq!(first.get_id(), older.get_id());
}
