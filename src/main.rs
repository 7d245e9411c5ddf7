use anyhow::Context;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::Path;

use thz_signal_parameters::TransmitterConfig;
use thz_signal_parameters::simulation::{load_scene, run_broadcast};

const DEMO_PAYLOAD_SIZE: usize = 32;

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("thz_signal_parameters"), LevelFilter::Debug)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().context("usage: thz-signal-parameters <transmitter.toml> <scene.json>")?;
    let scene_path = args.next().context("missing scene file argument")?;

    let config = TransmitterConfig::load(Path::new(&config_path)).map_err(anyhow::Error::msg)?;
    let scene = load_scene(&scene_path)?;

    info!("Starting broadcast from node {}", scene.transmitter);

    for report in run_broadcast(&config, &scene, vec![0xA5; DEMO_PAYLOAD_SIZE]) {
        match report.receptions.first() {
            Some(reception) => info!(
                "Node {} ({}): {:.3e} W over {} us",
                report.node_id,
                report.technology,
                reception.rx_power,
                reception.duration.as_micros()
            ),
            None => info!("Node {} ({}): nothing accepted, {} ignored", report.node_id, report.technology, report.ignored),
        }
    }

    Ok(())
}
