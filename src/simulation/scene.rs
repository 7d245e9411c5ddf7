//! Demo scene: which nodes exist and how strongly each receiver hears the
//! transmitter.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;

/// Root structure of a scene file.
#[derive(Debug, Deserialize)]
pub struct Scene {
    /// Node ID of the transmitting node.
    pub transmitter: u32,
    pub receivers: Vec<ReceiverNode>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReceiverNode {
    pub node_id: u32,
    /// Fixed gain of the link from the transmitter (dB, usually negative).
    pub link_gain_db: f64,
    /// Technology the receiver accepts. Defaults to pulse-based THz.
    #[serde(default = "default_technology")]
    pub technology: String,
}

fn default_technology() -> String {
    crate::pulse::PULSE_TECHNOLOGY.to_string()
}

/// Validate scene configuration to reject malformed inputs.
///
/// Checks for:
/// - Empty receiver list
/// - Duplicate node IDs (the transmitter included)
/// - Positive link gains (a passive link cannot amplify)
pub fn validate_scene(scene: &Scene) -> Result<(), String> {
    if scene.receivers.is_empty() {
        return Err("Scene must contain at least one receiver".to_string());
    }

    let mut node_ids = HashSet::new();
    node_ids.insert(scene.transmitter);
    for receiver in &scene.receivers {
        if !node_ids.insert(receiver.node_id) {
            return Err(format!("Duplicate node_id found: {}", receiver.node_id));
        }
        if !(receiver.link_gain_db <= 0.0) {
            return Err(format!(
                "Node {} link_gain_db {} must be zero or negative",
                receiver.node_id, receiver.link_gain_db
            ));
        }
    }

    Ok(())
}

pub fn parse_scene(data: &str) -> anyhow::Result<Scene> {
    let scene = serde_json::from_str::<Scene>(data).context("Invalid JSON format")?;
    validate_scene(&scene).map_err(|e| anyhow::anyhow!("Invalid scene configuration: {e}"))?;
    Ok(scene)
}

pub fn load_scene(scene_file_path: &str) -> anyhow::Result<Scene> {
    let data = fs::read_to_string(scene_file_path).with_context(|| format!("Failed to read file: {scene_file_path}"))?;
    let scene = parse_scene(&data)?;
    log::info!("Loaded scene {:?} with {} receivers", scene_file_path, scene.receivers.len());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_with_default_technology() {
        let scene = parse_scene(
            r#"{
                "transmitter": 1,
                "receivers": [
                    { "node_id": 2, "link_gain_db": -60.0 },
                    { "node_id": 3, "link_gain_db": -75.5, "technology": "acoustic" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scene.transmitter, 1);
        assert_eq!(scene.receivers[0].technology, crate::pulse::PULSE_TECHNOLOGY);
        assert_eq!(scene.receivers[1].technology, "acoustic");
    }

    #[test]
    fn rejects_duplicate_and_amplifying_links() {
        let dup = r#"{ "transmitter": 1, "receivers": [ { "node_id": 1, "link_gain_db": -1.0 } ] }"#;
        assert!(parse_scene(dup).is_err());

        let gain = r#"{ "transmitter": 1, "receivers": [ { "node_id": 2, "link_gain_db": 3.0 } ] }"#;
        assert!(parse_scene(gain).is_err());

        let empty = r#"{ "transmitter": 1, "receivers": [] }"#;
        assert!(parse_scene(empty).is_err());
    }

    #[test]
    fn reports_unreadable_file() {
        let err = load_scene("/nonexistent/scene.json").unwrap_err();
        assert!(format!("{err}").starts_with("Failed to read file"));
    }
}
