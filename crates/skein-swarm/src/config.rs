//! Static swarm description: the construction-time input of a session.
//!
//! A description is an ordered list of `(node, parent)` links plus
//! positionally aligned rod and flap arrays, with an optional radio
//! section overriding the default URI scheme. It is the only on-disk
//! input this crate depends on.

use std::path::Path;

use serde::{Deserialize, Serialize};

use skein_link::RadioUri;
use skein_topology::{Flap, NodeId, Rod, Topology};

use crate::error::Result;

/// One parent link in the description.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinkSpec {
    pub node: u8,
    pub parent: u8,
}

/// Radio URI scheme overrides. Fields fall back to the fleet defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioSpec {
    pub interface: Option<u8>,
    pub channel: Option<u8>,
    pub datarate: Option<String>,
    pub prefix: Option<String>,
}

impl RadioSpec {
    /// Resolve against the default scheme.
    pub fn to_uri(&self) -> RadioUri {
        let defaults = RadioUri::default();
        RadioUri {
            interface: self.interface.unwrap_or(defaults.interface),
            channel: self.channel.unwrap_or(defaults.channel),
            datarate: self.datarate.clone().unwrap_or(defaults.datarate),
            prefix: self.prefix.clone().unwrap_or(defaults.prefix),
        }
    }
}

/// The static description a swarm session is constructed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmDescription {
    pub links: Vec<LinkSpec>,
    pub rods: Vec<[i32; 3]>,
    pub flaps: Vec<(f32, f32, f32)>,
    #[serde(default)]
    pub radio: RadioSpec,
}

impl SwarmDescription {
    /// Load a description from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Build the validated topology this description defines.
    pub fn to_topology(&self) -> Result<Topology> {
        let links: Vec<(NodeId, NodeId)> = self
            .links
            .iter()
            .map(|l| (NodeId(l.node), NodeId(l.parent)))
            .collect();
        let rods: Vec<Rod> = self.rods.iter().map(|&r| Rod::from(r)).collect();
        let flaps: Vec<Flap> = self.flaps.iter().map(|&f| Flap::from(f)).collect();
        Ok(Topology::from_links(&links, &rods, &flaps)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn example_json() -> &'static str {
        r#"{
            "links": [
                {"node": 1, "parent": 1},
                {"node": 2, "parent": 1},
                {"node": 3, "parent": 2}
            ],
            "rods": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
            "flaps": [[0.0, 0.0, 0.0], [1.0, 0.2, 0.0], [1.0, 0.3, 0.0]]
        }"#
    }

    #[test]
    fn parses_and_builds_topology() {
        let description: SwarmDescription = serde_json::from_str(example_json()).unwrap();
        let topology = description.to_topology().unwrap();

        assert_eq!(topology.leader().unwrap(), NodeId(1));
        assert_eq!(topology.rod_of(NodeId(2)).unwrap(), Rod::new(1, 0, 0));
        assert_eq!(
            topology.flap_of(NodeId(3)).unwrap(),
            Flap::new(1.0, 0.3, 0.0)
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(example_json().as_bytes()).unwrap();

        let description = SwarmDescription::from_path(file.path()).unwrap();
        assert_eq!(description.links.len(), 3);
    }

    #[test]
    fn radio_defaults_apply_when_absent() {
        let description: SwarmDescription = serde_json::from_str(example_json()).unwrap();
        let uri = description.radio.to_uri();

        assert_eq!(uri.channel, 80);
        assert_eq!(uri.datarate, "2M");
        assert_eq!(
            uri.address_for(NodeId(1)).as_str(),
            "radio://0/80/2M/E7E7E7E701"
        );
    }

    #[test]
    fn radio_overrides_are_partial() {
        let description: SwarmDescription = serde_json::from_str(
            r#"{
                "links": [{"node": 1, "parent": 1}],
                "rods": [[0, 0, 0]],
                "flaps": [[0.0, 0.0, 0.0]],
                "radio": {"channel": 42}
            }"#,
        )
        .unwrap();
        let uri = description.radio.to_uri();

        assert_eq!(uri.channel, 42);
        assert_eq!(uri.datarate, "2M");
    }

    #[test]
    fn misaligned_description_is_rejected() {
        let description: SwarmDescription = serde_json::from_str(
            r#"{
                "links": [{"node": 1, "parent": 1}],
                "rods": [],
                "flaps": [[0.0, 0.0, 0.0]]
            }"#,
        )
        .unwrap();

        assert!(description.to_topology().is_err());
    }
}
