// SPDX-License-Identifier: MPL-2.0
use iced_preview::config::{self, Config};
use iced_preview::domain::cursor::{EffectKind, HexColor, Intensity};
use iced_preview::i18n::fluent::I18n;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("preview-retry"), "Retry");

    // 2. Change config to fr
    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("preview-retry"), "Réessayer");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn cursor_and_preview_sections_survive_a_round_trip_on_disk() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut cfg = Config::default();
    cfg.cursor_effects.enabled = true;
    cfg.cursor_effects.effects = cfg.cursor_effects.effects.toggled(EffectKind::Hearts);
    cfg.cursor_effects.intensity = Intensity::Low;
    cfg.cursor_effects.custom_colors = vec![HexColor::parse("#12ab34").expect("valid color")];
    cfg.preview.volume = Some(0.35);
    cfg.preview.muted = Some(true);

    config::save_with_override(&cfg, Some(dir.path().to_path_buf())).expect("save");
    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert!(warning.is_none());
    assert_eq!(loaded, cfg);
}

#[test]
fn corrupt_settings_fall_back_to_defaults_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[general\nlanguage = ")
        .expect("write corrupt file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(loaded, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}

#[test]
fn out_of_range_volume_is_clamped_on_load() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[preview]\nvolume = 3.5\n").expect("write");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded.preview.volume, Some(1.0));
}

#[test]
fn every_locale_translates_the_preview_status_notes() {
    for locale in ["en-US", "fr"] {
        let i18n = I18n::new(Some(locale.to_string()), &Config::default());
        for key in [
            "preview-status-pdf-truncated",
            "preview-status-docx-images",
            "preview-status-docx-frame",
            "preview-status-docx-html",
            "preview-status-docx-basic",
            "preview-page-indicator",
        ] {
            let text = i18n.tr_with_args(
                key,
                &[
                    ("shown", 5.into()),
                    ("total", 7.into()),
                    ("pages", 3.into()),
                    ("current", 1.into()),
                ],
            );
            assert!(!text.starts_with("MISSING"), "{locale}: {key}");
        }
    }
}
