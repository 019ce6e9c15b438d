//! Config persistence round trips

use overpanels::PanelsConfig;

#[test]
fn config_round_trips_through_a_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panels.yaml");

    let mut config = PanelsConfig::default();
    config.scroll_slop_px = 10.0;
    config.min_fling_px_per_second = 600.0;
    config.max_side_panel_width_px = Some(320.0);
    config.save(&path).unwrap();

    let loaded = PanelsConfig::load(&path).unwrap();
    assert_eq!(loaded.scroll_slop_px, 10.0);
    assert_eq!(loaded.min_fling_px_per_second, 600.0);
    assert_eq!(loaded.max_side_panel_width_px, Some(320.0));
    assert_eq!(loaded.open_duration_ms, 250);
}

#[test]
fn loading_a_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");
    assert!(PanelsConfig::load(&path).is_err());
}

#[test]
fn garbage_yaml_is_a_parse_error_not_a_panic() {
    assert!(PanelsConfig::from_yaml_str("scroll_slop_px: [not a number]").is_err());
}
