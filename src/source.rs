//! src/source.rs
//!
//! Ingestion threads feeding a moving chart.
//!
//! - `simulated`: bursty random counts whose level drifts slowly, so the
//!   auto-scale has something to follow.
//! - `serial`: one count per non-empty line read from a serial port (e.g. a
//!   radio receiver printing one line per packet).
//!
//! Both loops exit once `running` is cleared.

use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::engine::Ingest;
use crate::settings::{SourceConfig, SourceKind};

/// How long a serial read may block before `running` is checked again.
const SERIAL_READ_TIMEOUT: Duration = Duration::from_millis(250);

pub fn spawn<S>(cfg: &SourceConfig, ingest: Ingest<S>, running: Arc<AtomicBool>) -> io::Result<JoinHandle<()>>
where
    S: Send + Sync + 'static,
{
    let cfg = cfg.clone();
    let name = match cfg.kind {
        SourceKind::Simulated => "simulated-source",
        SourceKind::Serial => "serial-source",
    };
    thread::Builder::new().name(name.into()).spawn(move || match cfg.kind {
        SourceKind::Simulated => run_simulated(cfg.simulated_rate_hz, &ingest, &running),
        SourceKind::Serial => run_serial(&cfg.serial_port, cfg.baud_rate, &ingest, &running),
    })
}

/// Burst size for one simulated event at `elapsed` seconds: a slow sine
/// sets the level, noise rides on top, and one event in ten is a removal.
pub fn simulated_delta(rng: &mut impl Rng, elapsed: f64) -> f64 {
    let level = 1.0 + 6.0 * (elapsed / 15.0).sin().abs();
    if rng.random_bool(0.1) {
        -1.0
    } else {
        rng.random_range(0.0..level * 2.0).floor()
    }
}

fn run_simulated<S>(rate_hz: f64, ingest: &Ingest<S>, running: &AtomicBool) {
    let rate_hz = if rate_hz.is_finite() && rate_hz > 0.0 {
        rate_hz
    } else {
        20.0
    };
    let pause = Duration::from_secs_f64(1.0 / rate_hz);
    let mut rng = rand::rng();
    let started = Instant::now();
    log::info!("simulated source started at {rate_hz} Hz");
    while running.load(Ordering::Relaxed) {
        let delta = simulated_delta(&mut rng, started.elapsed().as_secs_f64());
        if delta < 0.0 {
            ingest.remove(-delta);
        } else {
            ingest.add(delta);
        }
        thread::sleep(pause);
    }
    log::info!("simulated source exiting");
}

fn run_serial<S>(port_name: &str, baud_rate: u32, ingest: &Ingest<S>, running: &AtomicBool) {
    log::info!("opening serial port {port_name} @ {baud_rate} baud");
    let port = match serialport::new(port_name, baud_rate)
        .timeout(SERIAL_READ_TIMEOUT)
        .open()
    {
        Ok(p) => p,
        Err(e) => {
            log::error!("failed to open serial port {port_name}: {e}");
            return;
        }
    };
    let mut reader = BufReader::new(port);
    let lines = count_lines(&mut reader, running, || ingest.increment());
    log::info!("serial source exiting after {lines} line(s)");
}

/// Call `on_line` for every non-empty line until EOF, a hard read error, or
/// `running` is cleared. Read timeouts are not errors. Returns the number of
/// lines counted.
pub fn count_lines<R: BufRead>(reader: &mut R, running: &AtomicBool, mut on_line: impl FnMut()) -> u64 {
    let mut line = String::new();
    let mut counted = 0;
    while running.load(Ordering::Relaxed) {
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if !line.trim().is_empty() {
                    on_line();
                    counted += 1;
                }
                line.clear();
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                log::warn!("dropping undecodable line: {e}");
                line.clear();
            }
            Err(e) => {
                log::error!("error reading serial data: {e}");
                break;
            }
        }
    }
    counted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn counts_non_empty_lines() {
        let running = AtomicBool::new(true);
        let mut input = io::Cursor::new("MSG 1\n\n   \nMSG 2\nMSG 3");
        let mut seen = 0;
        let counted = count_lines(&mut input, &running, || seen += 1);
        assert_eq!(counted, 3);
        assert_eq!(seen, 3);
    }

    #[test]
    fn stops_when_not_running() {
        let running = AtomicBool::new(false);
        let mut input = io::Cursor::new("a\nb\n");
        assert_eq!(count_lines(&mut input, &running, || {}), 0);
    }

    #[test]
    fn simulated_source_exits_when_running_is_cleared() {
        use crate::engine::MovingBarGraph;
        use crate::graph::BarGraphConfig;
        use crate::render::MovingBarChart;
        use crate::surface::Raster;

        let graph = MovingBarGraph::new(
            MovingBarChart::new(BarGraphConfig::default()),
            Raster::new(4, 4),
            Duration::from_secs(60),
        );
        let cfg = SourceConfig {
            simulated_rate_hz: 200.0,
            ..SourceConfig::default()
        };
        let running = Arc::new(AtomicBool::new(true));
        let handle = spawn(&cfg, graph.ingest(), Arc::clone(&running)).unwrap();
        thread::sleep(Duration::from_millis(30));
        running.store(false, Ordering::Relaxed);
        assert!(handle.join().is_ok());
    }

    #[test]
    fn simulated_deltas_are_whole_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..200 {
            let d = simulated_delta(&mut rng, i as f64 * 0.5);
            assert_eq!(d, d.floor());
            assert!((-1.0..14.0).contains(&d), "{d}");
        }
    }
}
