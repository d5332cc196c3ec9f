//! On-disk persistence through the full `AppCore` stack.

use solace_core::{SettingsUpdate, VoiceMode};
use solace_db::{RepoFactory, setup_database};
use tempfile::tempdir;

#[tokio::test]
async fn settings_and_phrases_survive_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("solace.db");

    {
        let pool = setup_database(&db_path).await.unwrap();
        let core = RepoFactory::build_app_core(pool.clone());

        core.settings()
            .update(SettingsUpdate {
                voice_mode: Some(VoiceMode::Motivating),
                use_custom_phrases: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let added = core
            .phrases()
            .import(&["hi", "Keep pushing forward.", "keep pushing FORWARD."])
            .await
            .unwrap();
        assert_eq!(added, 1);

        pool.close().await;
    }

    let pool = setup_database(&db_path).await.unwrap();
    let core = RepoFactory::build_app_core(pool);

    let settings = core.settings().get().await.unwrap();
    assert_eq!(settings.voice_mode, VoiceMode::Motivating);
    assert!(settings.use_custom_phrases);

    let exported = core.phrases().export().await.unwrap();
    assert_eq!(exported, "Keep pushing forward.");
}

#[tokio::test]
async fn invalid_update_is_rejected_and_not_stored() {
    let pool = solace_db::setup_test_database().await.unwrap();
    let core = RepoFactory::build_app_core(pool);

    let result = core
        .settings()
        .update(SettingsUpdate {
            background_volume: Some(2.0),
            ..Default::default()
        })
        .await;
    assert!(result.is_err());
    assert_eq!(core.settings().get().await.unwrap().background_volume, 0.5);
}
