//! Records written through a file-backed store survive reopening it.

use chrono::{TimeZone, Utc};
use house_core::calculations::{AdvisorSelections, SmartAdvisor};
use house_core::storage::records;
use house_core::{LocalStore, Wizard, WizardConfig};
use house_store_sqlite::SqliteStore;
use pretty_assertions::assert_eq;

async fn open(path: &str) -> SqliteStore {
    let store = SqliteStore::new(path).await.expect("open sqlite store");
    store.run_migrations().await.expect("run migrations");
    store
}

#[tokio::test]
async fn wizard_snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("igethouse.db");
    let path = path.to_str().unwrap();

    let saved = {
        let store = open(path).await;
        let mut wizard = Wizard::headless(WizardConfig::default());
        wizard.select_chip(house_core::models::Field::Location, "yaba");
        wizard.next();
        wizard.set_bedrooms(4);
        wizard
            .save(&store, Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap())
            .await
            .unwrap()
    };

    let store = open(path).await;
    let restored = Wizard::load(WizardConfig::default(), house_core::wizard::NullView, &store).await;

    assert_eq!(restored.state(), &saved.state);
    assert_eq!(store.keys().await.unwrap(), vec![records::SNAPSHOT_KEY]);
}

#[tokio::test]
async fn saved_reports_and_checklist_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    let path = path.to_str().unwrap();

    let selections = AdvisorSelections {
        salary: Some("mid".into()),
        location: Some("lekki".into()),
        lifestyle: Some("moderate".into()),
    };
    let predictions = SmartAdvisor::predict(&selections).unwrap();

    let report_id = {
        let store = open(path).await;
        records::toggle_checklist_item(&store, "financial", "down-payment")
            .await
            .unwrap();
        let report = records::save_report(
            &store,
            &selections,
            &predictions,
            Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap(),
        )
        .await
        .unwrap();
        report.id
    };

    let store = open(path).await;
    let found = records::find_report(&store, report_id).await.unwrap().unwrap();
    let checklist = records::load_checklist(&store).await.unwrap().unwrap();

    assert_eq!(found.title, "Home Assessment - 04/05/2026");
    assert_eq!(found.predictions, predictions);
    assert!(checklist.is_checked("financial", "down-payment"));
}
