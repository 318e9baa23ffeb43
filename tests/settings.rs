use std::io::Write;

use moving_bar_monitor::settings::{AppConfig, SettingsError, SourceKind};
use moving_bar_monitor::{ConfigError, MovingBarGraph, Raster};

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r##"
        [plot]
        width = 40
        height = 10
        title_bar_height = 2

        [bar]
        incremental_values = true

        [source]
        kind = "serial"
        baud_rate = 9600
        "##
    )
    .unwrap();

    let cfg = AppConfig::load(file.path()).unwrap();
    assert_eq!(cfg.graph.plot.width, Some(40.0));
    assert!(cfg.graph.bar.incremental_values);
    assert_eq!(cfg.graph.bar.width, 5.0);
    assert_eq!(cfg.source.kind, SourceKind::Serial);
    assert_eq!(cfg.source.baud_rate, 9600);
    assert_eq!(cfg.source.serial_port, "/dev/ttyACM0");
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Read { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[plot\nwidth = ").unwrap();
    assert!(matches!(
        AppConfig::load(file.path()),
        Err(SettingsError::Parse(_))
    ));
}

#[test]
fn demo_settings_drive_a_working_graph() {
    let cfg = AppConfig::demo().unwrap();
    assert_eq!(cfg.graph.validate().map(|g| g.width), Ok(60.0));
    let graph = MovingBarGraph::new(
        moving_bar_monitor::render::MovingBarChart::new(cfg.graph.clone()),
        Raster::new(80, 18),
        cfg.graph.update_period(),
    );
    graph.add(7.0);
    graph.tick();
    graph.with(|c| {
        assert!(c.is_enabled());
        assert_eq!(c.drawable.window().len(), 30);
        assert_eq!(c.drawable.window().latest(), Some(7.0));
        assert_eq!(c.drawable.frames(), 1);
    });
}

#[test]
fn missing_plot_table_fails_validation_only() {
    let cfg = AppConfig::from_toml_str("[general]\ntitle = \"x\"").unwrap();
    assert_eq!(cfg.graph.validate(), Err(ConfigError::Missing("plot.width")));
}
