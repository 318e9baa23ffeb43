//! src/app.rs
//!
//! Live message-rate monitor.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Loads settings, installs logging, attaches a moving bar graph to an
//! in-memory raster, starts the ingestion source, and runs the terminal UI
//! loop that blits the raster every frame.
//!
//! ## Overview
//! The application:
//! - Counts events (serial lines or simulated bursts) between render ticks.
//! - Commits one bar per tick (`bar.update_frequency_ms`, default 500 ms)
//!   into a window that always fills the chart panel.
//! - Rescales the y axis to the visible window.
//!
//! # Building and Running
//!
//! ```text
//! cargo run --release                       # built-in demo settings
//! cargo run --release -- monitor.toml       # your own settings
//! RUST_LOG=debug cargo run --release        # override the log level
//! ```
//!
//! Logs go to `moving_bar_monitor.log` unless `[log] file` says otherwise;
//! the terminal itself belongs to the UI.
//!
//! # Keyboard Controls
//!
//! - **+** / **-**: add or remove one count.
//! - **Space**: pause/resume the render schedule. Counts keep accumulating
//!   while paused and land in the first bar after resuming.
//! - **q**: quit and restore the terminal.
//!
//! # Settings
//!
//! See `demos/terminal.toml` for every key. The plot width and height there
//! only size the first frame: the chart panel refits the plot to the terminal
//! whenever it is resized.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};

use moving_bar_monitor::render::moving::AXIS_MARGIN;
use moving_bar_monitor::settings::{AppConfig, LogConfig, SourceKind};
use moving_bar_monitor::{BarGraphConfig, MovingBarGraph, Raster, source};

use crate::panels::{ChartPanel, ControlsPanel, InfoPanel, SharedMovingChart, TitlePanel};
use crate::ui::Panel;

/// UI refresh interval; independent of the chart's render period.
const FRAME_TIME: Duration = Duration::from_millis(100);

pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let settings = match &config_path {
        Some(path) => {
            AppConfig::load(path).wrap_err_with(|| format!("loading settings from {}", path.display()))?
        }
        None => AppConfig::demo().wrap_err("loading built-in demo settings")?,
    };
    init_logging(&settings.log)?;
    log::info!(
        "starting with {}",
        config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in demo settings".to_string())
    );

    let mut graph = MovingBarGraph::initialize(initial_surface(&settings.graph), settings.graph.clone());

    let running = Arc::new(AtomicBool::new(true));
    let source_thread = source::spawn(&settings.source, graph.ingest(), Arc::clone(&running))
        .wrap_err("starting ingestion source")?;

    let source_label = match settings.source.kind {
        SourceKind::Simulated => "simulated".to_string(),
        SourceKind::Serial => format!(
            "{} @ {} baud",
            settings.source.serial_port, settings.source.baud_rate
        ),
    };
    let title = TitlePanel::new(&settings.graph.general.title, &source_label);

    let mut terminal = ratatui::init();
    let result = ui_loop(&mut terminal, &mut graph, &title);
    ratatui::restore();

    running.store(false, Ordering::Relaxed);
    if source_thread.join().is_err() {
        log::error!("ingestion thread panicked");
    }
    graph.stop();
    log::info!("bye");
    result
}

fn ui_loop(
    terminal: &mut DefaultTerminal,
    graph: &mut MovingBarGraph<Raster>,
    title: &TitlePanel,
) -> Result<()> {
    let shared = graph.shared();
    loop {
        let frame_start = Instant::now();
        let schedule_running = graph.is_running();

        terminal.draw(|f| draw_ui(f, title, &shared, schedule_running))?;

        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('+') => graph.increment(),
                KeyCode::Char('-') => graph.decrement(),
                KeyCode::Char(' ') => {
                    if graph.is_running() {
                        graph.stop();
                    } else {
                        graph.start().wrap_err("restarting render schedule")?;
                    }
                }
                _ => {}
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}

fn draw_ui(f: &mut Frame<'_>, title: &TitlePanel, shared: &SharedMovingChart, schedule_running: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(rows[1]);

    title.draw(f, rows[0]);
    ChartPanel::new(shared.clone()).draw(f, body[0]);
    InfoPanel::new(shared.clone(), schedule_running).draw(f, body[1]);
    ControlsPanel.draw(f, rows[2]);
}

/// First-frame raster: the configured plot plus room for the axis labels.
/// The chart panel resizes it to the terminal on the first draw.
fn initial_surface(cfg: &BarGraphConfig) -> Raster {
    let cells = |v: f64| v.clamp(0.0, u16::MAX as f64) as u16;
    let title = cfg.axis.title.chars().count() as f64;
    let width = cfg.plot.width.unwrap_or(0.0) + cfg.plot.origin_x + 2.0 * title + 2.0 * AXIS_MARGIN;
    let height = cfg.plot.height.unwrap_or(0.0) + cfg.plot.title_bar_height.unwrap_or(0.0);
    Raster::new(cells(width), cells(height))
}

fn init_logging(cfg: &LogConfig) -> Result<()> {
    let level: log::LevelFilter = cfg
        .level
        .parse()
        .wrap_err_with(|| format!("invalid log level {:?}", cfg.level))?;
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if let Some(path) = &cfg.file {
        let file = File::create(path).wrap_err_with(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().wrap_err("installing logger")?;
    Ok(())
}
