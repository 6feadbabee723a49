//! Fixture builders shared by the topology tests.

use chrono::Utc;

use crate::models::*;

pub fn iface(index: u32, name: &str, neighbor: Option<(&str, &str)>) -> Interface {
    Interface {
        index,
        name: name.to_string(),
        description: String::new(),
        link_type: "ethernet".to_string(),
        speed: 1_000_000_000,
        admin_status: LinkState::Up,
        oper_status: LinkState::Up,
        phys_address: None,
        connected_to: neighbor.map(|(d, _)| d.to_string()),
        connected_interface: neighbor.map(|(_, i)| i.to_string()),
    }
}

pub fn device(id: &str, interfaces: Vec<Interface>) -> Device {
    Device {
        id: id.to_string(),
        sys_name: id.to_string(),
        sys_descr: String::new(),
        sys_location: String::new(),
        sys_up_time: 0,
        sys_contact: String::new(),
        ip_address: "10.0.0.1".to_string(),
        device_type: DeviceClass::Switch,
        device_sub_type: None,
        interfaces,
        status: HealthState::Active,
        last_updated: Utc::now(),
    }
}

/// Core -> Dist -> Access, each side declaring its neighbor
pub fn chain() -> Vec<Device> {
    vec![
        device("Core", vec![iface(1, "up0", Some(("Dist", "up0")))]),
        device(
            "Dist",
            vec![
                iface(1, "up0", Some(("Core", "up0"))),
                iface(2, "down0", Some(("Access", "up0"))),
            ],
        ),
        device("Access", vec![iface(1, "up0", Some(("Dist", "down0")))]),
    ]
}
