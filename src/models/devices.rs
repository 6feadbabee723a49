use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Device class as reported by telemetry. Drives the icon/color on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    #[serde(rename = "router")]
    Router,
    #[serde(rename = "switch")]
    Switch,
    #[serde(rename = "firewall")]
    Firewall,
    #[serde(rename = "wap", alias = "wireless-access-point")]
    WirelessAccessPoint,
    #[serde(rename = "server")]
    Server,
    #[serde(rename = "loadbalancer", alias = "load-balancer")]
    LoadBalancer,
    #[serde(rename = "cloud", alias = "cloud-gateway")]
    CloudGateway,
}

impl DeviceClass {
    /// Icon key handed to the renderer
    pub fn icon(&self) -> &'static str {
        match self {
            DeviceClass::Router => "router",
            DeviceClass::Switch => "network",
            DeviceClass::Firewall => "shield",
            DeviceClass::WirelessAccessPoint => "wifi",
            DeviceClass::Server | DeviceClass::LoadBalancer => "server",
            DeviceClass::CloudGateway => "cloud",
        }
    }

    /// External networks (ISPs, cloud on-ramps) sit at the top of the hierarchy
    pub fn is_external(&self) -> bool {
        matches!(self, DeviceClass::CloudGateway)
    }
}

/// Position of a device in the campus hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSubClass {
    Core,
    Distribution,
    Access,
    Edge,
    Branch,
}

/// Canonical device health values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Active,
    Warning,
    Critical,
    Maintenance,
    #[default]
    Unknown,
}

/// Administrative / operational state of an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Up,
    #[default]
    Down,
}

impl LinkState {
    pub fn is_up(&self) -> bool {
        matches!(self, LinkState::Up)
    }
}

/// Interface represents one port of a device as seen in an SNMP/LLDP snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(rename = "ifIndex")]
    pub index: u32,
    #[serde(rename = "ifName")]
    pub name: String,
    #[serde(rename = "ifDescr", default)]
    pub description: String,
    #[serde(rename = "ifType", default)]
    pub link_type: String,
    /// Nominal speed in bits/sec
    #[serde(rename = "ifSpeed", default)]
    pub speed: u64,
    #[serde(rename = "ifAdminStatus", default)]
    pub admin_status: LinkState,
    #[serde(rename = "ifOperStatus", default)]
    pub oper_status: LinkState,
    #[serde(rename = "ifPhysAddress", default, skip_serializing_if = "Option::is_none")]
    pub phys_address: Option<String>,
    /// LLDP neighbor device ID
    #[serde(rename = "ifConnectedTo", default, skip_serializing_if = "Option::is_none")]
    pub connected_to: Option<String>,
    /// LLDP neighbor port
    #[serde(rename = "ifConnectedInterface", default, skip_serializing_if = "Option::is_none")]
    pub connected_interface: Option<String>,
}

/// Neighbor declared by a single interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborRef<'a> {
    pub device_id: &'a str,
    pub interface: &'a str,
}

impl Interface {
    /// The declared neighbor, if any. A missing neighbor port reads as empty.
    pub fn neighbor(&self) -> Option<NeighborRef<'_>> {
        let device_id = self.connected_to.as_deref().filter(|id| !id.is_empty())?;
        Some(NeighborRef {
            device_id,
            interface: self.connected_interface.as_deref().unwrap_or(""),
        })
    }
}

/// Device represents one polled network element and the interfaces it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub sys_name: String,
    #[serde(default)]
    pub sys_descr: String,
    #[serde(default)]
    pub sys_location: String,
    /// Seconds since the device came up
    #[serde(default)]
    pub sys_up_time: u64,
    #[serde(default)]
    pub sys_contact: String,
    pub ip_address: String,
    pub device_type: DeviceClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_sub_type: Option<DeviceSubClass>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub status: HealthState,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Device {
    /// Find the interface on this device that points back at `device_id:interface`
    pub fn reciprocal_interface(&self, device_id: &str, interface: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| {
            i.connected_to.as_deref() == Some(device_id)
                && i.connected_interface.as_deref() == Some(interface)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_decodes_telemetry_field_names() {
        let json = r#"{
            "id": "isp-a",
            "sysName": "ISP-A",
            "ipAddress": "203.0.113.1",
            "deviceType": "cloud",
            "status": "active",
            "interfaces": [{
                "ifIndex": 1,
                "ifName": "Port 1/1",
                "ifSpeed": 1000000000,
                "ifAdminStatus": "up",
                "ifOperStatus": "up",
                "ifConnectedTo": "core-rtr-01",
                "ifConnectedInterface": "GE0/0/0"
            }],
            "lastUpdated": "2024-05-01T12:00:00Z"
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.device_type, DeviceClass::CloudGateway);
        assert_eq!(device.status, HealthState::Active);
        assert_eq!(device.device_sub_type, None);

        let neighbor = device.interfaces[0].neighbor().unwrap();
        assert_eq!(neighbor.device_id, "core-rtr-01");
        assert_eq!(neighbor.interface, "GE0/0/0");
    }

    #[test]
    fn test_device_class_aliases() {
        let wap: DeviceClass = serde_json::from_str(r#""wireless-access-point""#).unwrap();
        assert_eq!(wap, DeviceClass::WirelessAccessPoint);
        let lb: DeviceClass = serde_json::from_str(r#""load-balancer""#).unwrap();
        assert_eq!(lb, DeviceClass::LoadBalancer);
        assert_eq!(serde_json::to_string(&lb).unwrap(), r#""loadbalancer""#);
        assert_eq!(DeviceClass::Switch.icon(), "network");
    }

    #[test]
    fn test_empty_neighbor_id_is_no_neighbor() {
        let iface = Interface {
            index: 1,
            name: "eth0".into(),
            description: String::new(),
            link_type: "ethernet".into(),
            speed: 0,
            admin_status: LinkState::Up,
            oper_status: LinkState::Up,
            phys_address: None,
            connected_to: Some(String::new()),
            connected_interface: Some("eth1".into()),
        };
        assert!(iface.neighbor().is_none());
    }
}
