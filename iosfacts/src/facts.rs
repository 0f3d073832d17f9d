//! The facts document gathered from a device.
//!
//! Serialized field names follow the established document shape
//! (`IP`, `AS`, `vlanid`, ...) so the output can be consumed by existing
//! tooling unchanged.

use indexmap::IndexMap;
use serde::Serialize;

/// One interface from `show interfaces`.
///
/// Only `name` and `status` are always present; every other field is set
/// only when its marker line appeared in the interface block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub name: String,

    /// `"<line-state>/<protocol-state>"`, e.g. `"up/up"`.
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,

    #[serde(rename = "IP", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encapsulation: Option<String>,

    #[serde(rename = "vlanid", skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<String>,
}

/// A BGP peer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNeighbor {
    #[serde(rename = "neighbor")]
    pub address: String,

    #[serde(rename = "AS")]
    pub remote_as: String,

    pub version: String,
}

/// BGP process state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BgpSummary {
    #[serde(rename = "identifier")]
    pub router_id: String,

    #[serde(rename = "AS")]
    pub local_as: String,

    #[serde(rename = "neighbor")]
    pub neighbors: IndexMap<String, BgpNeighbor>,

    /// Route distinguishers in report order; duplicates are kept.
    #[serde(rename = "rd")]
    pub route_distinguishers: Vec<String>,
}

/// One VRF from `show ip vrf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VrfDefinition {
    pub name: String,

    #[serde(rename = "rd")]
    pub route_distinguisher: String,

    /// Interface short names (`Gi0/0.101`, `Lo101`) in report order.
    pub interfaces: Vec<String>,
}

/// Software version information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub image: String,
}

/// The complete facts document.
///
/// Built fresh by each gather; there is no partially populated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facts {
    pub version: VersionInfo,
    pub hostname: String,
    pub interfaces: IndexMap<String, Interface>,
    pub bgp: BgpSummary,
    pub vrf: IndexMap<String, VrfDefinition>,
}

impl Facts {
    /// Look up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }
}
