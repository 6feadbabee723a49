use chrono::Utc;

use crate::models::*;

const GIG: u64 = 1_000_000_000;
const TEN_GIG: u64 = 10_000_000_000;

/// (ifIndex, ifName, ifDescr, ifSpeed, neighbor device, neighbor port)
type InterfaceSeed = (u32, &'static str, &'static str, u64, &'static str, &'static str);

struct DeviceSeed {
    id: &'static str,
    name: &'static str,
    descr: &'static str,
    location: &'static str,
    uptime: u64,
    contact: &'static str,
    ip: &'static str,
    class: DeviceClass,
    sub_class: Option<DeviceSubClass>,
    interfaces: Vec<InterfaceSeed>,
}

const NETOPS: &str = "network-ops@example.com";

fn seeds() -> Vec<DeviceSeed> {
    use DeviceClass::*;
    use DeviceSubClass::*;

    vec![
        // ISP connections
        DeviceSeed {
            id: "isp-a", name: "ISP-A", descr: "External ISP Provider A", location: "External",
            uptime: 15_552_000, contact: "support@isp-a.com", ip: "203.0.113.1",
            class: CloudGateway, sub_class: None,
            interfaces: vec![(1, "Port 1/1", "Link to CORE-RTR-01", GIG, "core-rtr-01", "GE0/0/0")],
        },
        DeviceSeed {
            id: "isp-b", name: "ISP-B", descr: "External ISP Provider B", location: "External",
            uptime: 15_379_200, contact: "support@isp-b.com", ip: "198.51.100.1",
            class: CloudGateway, sub_class: None,
            interfaces: vec![(1, "Port 1/1", "Link to CORE-RTR-02", GIG, "core-rtr-02", "GE0/0/0")],
        },
        // Core routers, both uplinked to the core switch
        DeviceSeed {
            id: "core-rtr-01", name: "CORE-RTR-01", descr: "Cisco ASR1001-X Router",
            location: "Datacenter Rack A1", uptime: 7_948_800, contact: NETOPS, ip: "10.0.0.1",
            class: Router, sub_class: Some(Core),
            interfaces: vec![
                (1, "GE0/0/0", "Uplink to ISP-A", GIG, "isp-a", "Port 1/1"),
                (2, "GE0/0/1", "Link to CORE-SW-01", TEN_GIG, "core-sw-01", "Ten1/0/1"),
            ],
        },
        DeviceSeed {
            id: "core-rtr-02", name: "CORE-RTR-02", descr: "Cisco ASR1001-X Router",
            location: "Datacenter Rack A2", uptime: 7_689_600, contact: NETOPS, ip: "10.0.0.2",
            class: Router, sub_class: Some(Core),
            interfaces: vec![
                (1, "GE0/0/0", "Uplink to ISP-B", GIG, "isp-b", "Port 1/1"),
                (2, "GE0/0/1", "Link to CORE-SW-01", TEN_GIG, "core-sw-01", "Ten1/0/2"),
            ],
        },
        DeviceSeed {
            id: "core-sw-01", name: "CORE-SW-01", descr: "Cisco Catalyst 9600 Switch",
            location: "Datacenter Rack B1", uptime: 8_035_200, contact: NETOPS, ip: "10.0.1.1",
            class: Switch, sub_class: Some(Core),
            interfaces: vec![
                (1, "Ten1/0/1", "Link to CORE-RTR-01", TEN_GIG, "core-rtr-01", "GE0/0/1"),
                (2, "Ten1/0/2", "Link to CORE-RTR-02", TEN_GIG, "core-rtr-02", "GE0/0/1"),
                (3, "Ten1/0/3", "Link to DIST-SW-01", TEN_GIG, "dist-sw-01", "Ten1/0/1"),
                (4, "Ten1/0/4", "Link to DIST-SW-02", TEN_GIG, "dist-sw-02", "Ten1/0/1"),
                (5, "Ten1/0/5", "Link to CORE-FW-01", TEN_GIG, "core-fw-01", "eth1/1"),
                (6, "Ten1/0/6", "Link to WAN-RTR-01", TEN_GIG, "wan-rtr-01", "GE0/0/1"),
            ],
        },
        // Distribution
        DeviceSeed {
            id: "dist-sw-01", name: "DIST-SW-01", descr: "Cisco Catalyst 9300 Switch",
            location: "Datacenter Rack C1", uptime: 7_603_200, contact: NETOPS, ip: "10.0.2.1",
            class: Switch, sub_class: Some(Distribution),
            interfaces: vec![
                (1, "Ten1/0/1", "Uplink to CORE-SW-01", TEN_GIG, "core-sw-01", "Ten1/0/3"),
                (2, "Gi1/0/1", "Link to ACCESS-SW-01", GIG, "access-sw-01", "Gi0/1"),
                (3, "Gi1/0/2", "Link to ACCESS-SW-02", GIG, "access-sw-02", "Gi0/1"),
            ],
        },
        DeviceSeed {
            id: "dist-sw-02", name: "DIST-SW-02", descr: "Cisco Catalyst 9300 Switch",
            location: "Datacenter Rack C2", uptime: 7_430_400, contact: NETOPS, ip: "10.0.2.2",
            class: Switch, sub_class: Some(Distribution),
            interfaces: vec![
                (1, "Ten1/0/1", "Uplink to CORE-SW-01", TEN_GIG, "core-sw-01", "Ten1/0/4"),
                (2, "Gi1/0/1", "Link to ACCESS-SW-03", GIG, "access-sw-03", "Gi0/1"),
                (3, "Gi1/0/2", "Link to ACCESS-SW-04", GIG, "access-sw-04", "Gi0/1"),
            ],
        },
        // Access
        DeviceSeed {
            id: "access-sw-01", name: "ACCESS-SW-01", descr: "Cisco Catalyst 2960X Switch",
            location: "Floor 1 IDF", uptime: 6_912_000, contact: NETOPS, ip: "10.0.3.1",
            class: Switch, sub_class: Some(Access),
            interfaces: vec![
                (1, "Gi0/1", "Uplink to DIST-SW-01", GIG, "dist-sw-01", "Gi1/0/1"),
                (2, "Gi0/2", "Link to WAP-01", GIG, "wap-01", "Gi0/1"),
            ],
        },
        DeviceSeed {
            id: "access-sw-02", name: "ACCESS-SW-02", descr: "Cisco Catalyst 2960X Switch",
            location: "Floor 2 IDF", uptime: 6_739_200, contact: NETOPS, ip: "10.0.3.2",
            class: Switch, sub_class: Some(Access),
            interfaces: vec![(1, "Gi0/1", "Uplink to DIST-SW-01", GIG, "dist-sw-01", "Gi1/0/2")],
        },
        DeviceSeed {
            id: "access-sw-03", name: "ACCESS-SW-03", descr: "Cisco Catalyst 2960X Switch",
            location: "Floor 3 IDF", uptime: 6_566_400, contact: NETOPS, ip: "10.0.3.3",
            class: Switch, sub_class: Some(Access),
            interfaces: vec![
                (1, "Gi0/1", "Uplink to DIST-SW-02", GIG, "dist-sw-02", "Gi1/0/1"),
                (2, "Gi0/2", "Link to WAP-02", GIG, "wap-02", "Gi0/1"),
            ],
        },
        DeviceSeed {
            id: "access-sw-04", name: "ACCESS-SW-04", descr: "Cisco Catalyst 2960X Switch",
            location: "Floor 4 IDF", uptime: 6_393_600, contact: NETOPS, ip: "10.0.3.4",
            class: Switch, sub_class: Some(Access),
            interfaces: vec![(1, "Gi0/1", "Uplink to DIST-SW-02", GIG, "dist-sw-02", "Gi1/0/2")],
        },
        // Wireless
        DeviceSeed {
            id: "wap-01", name: "WAP-01", descr: "Cisco Catalyst 9130 Access Point",
            location: "Floor 1 East Wing", uptime: 6_048_000, contact: NETOPS, ip: "10.0.4.1",
            class: WirelessAccessPoint, sub_class: None,
            interfaces: vec![(1, "Gi0/1", "Link to ACCESS-SW-01", GIG, "access-sw-01", "Gi0/2")],
        },
        DeviceSeed {
            id: "wap-02", name: "WAP-02", descr: "Cisco Catalyst 9130 Access Point",
            location: "Floor 3 West Wing", uptime: 5_875_200, contact: NETOPS, ip: "10.0.4.2",
            class: WirelessAccessPoint, sub_class: None,
            interfaces: vec![(1, "Gi0/1", "Link to ACCESS-SW-03", GIG, "access-sw-03", "Gi0/2")],
        },
        // Security and DMZ
        DeviceSeed {
            id: "core-fw-01", name: "CORE-FW-01", descr: "Palo Alto PA-5260 Firewall",
            location: "Datacenter Rack D1", uptime: 6_220_800, contact: "security@example.com",
            ip: "10.0.5.1", class: Firewall, sub_class: None,
            interfaces: vec![
                (1, "eth1/1", "Link to CORE-SW-01", TEN_GIG, "core-sw-01", "Ten1/0/5"),
                (2, "eth1/2", "Link to DMZ-SW-01", TEN_GIG, "dmz-sw-01", "Ten1/0/1"),
            ],
        },
        DeviceSeed {
            id: "dmz-sw-01", name: "DMZ-SW-01", descr: "Cisco Catalyst 9300 Switch",
            location: "Datacenter Rack D2", uptime: 6_048_000, contact: NETOPS, ip: "10.0.10.1",
            class: Switch, sub_class: Some(Distribution),
            interfaces: vec![
                (1, "Ten1/0/1", "Link to CORE-FW-01", TEN_GIG, "core-fw-01", "eth1/2"),
                (2, "Gi1/0/1", "Link to WEB-SRV-01", GIG, "web-srv-01", "eth0"),
                (3, "Gi1/0/2", "Link to WEB-SRV-02", GIG, "web-srv-02", "eth0"),
            ],
        },
        DeviceSeed {
            id: "web-srv-01", name: "WEB-SRV-01", descr: "Dell PowerEdge R750 Server",
            location: "Datacenter Rack E1", uptime: 5_184_000, contact: "sysadmin@example.com",
            ip: "10.0.20.1", class: Server, sub_class: None,
            interfaces: vec![(1, "eth0", "Link to DMZ-SW-01", GIG, "dmz-sw-01", "Gi1/0/1")],
        },
        DeviceSeed {
            id: "web-srv-02", name: "WEB-SRV-02", descr: "Dell PowerEdge R750 Server",
            location: "Datacenter Rack E1", uptime: 5_011_200, contact: "sysadmin@example.com",
            ip: "10.0.20.2", class: Server, sub_class: None,
            interfaces: vec![(1, "eth0", "Link to DMZ-SW-01", GIG, "dmz-sw-01", "Gi1/0/2")],
        },
        // WAN
        DeviceSeed {
            id: "wan-rtr-01", name: "WAN-RTR-01", descr: "Cisco ISR 4431 Router",
            location: "Datacenter Rack F1", uptime: 5_702_400, contact: NETOPS, ip: "10.0.6.1",
            class: Router, sub_class: Some(Branch),
            interfaces: vec![(1, "GE0/0/1", "Link to CORE-SW-01", TEN_GIG, "core-sw-01", "Ten1/0/6")],
        },
    ]
}

/// Demo campus network served when no telemetry collaborator is configured
pub fn sample_devices() -> Vec<Device> {
    let now = Utc::now();
    seeds()
        .into_iter()
        .map(|seed| Device {
            id: seed.id.to_string(),
            sys_name: seed.name.to_string(),
            sys_descr: seed.descr.to_string(),
            sys_location: seed.location.to_string(),
            sys_up_time: seed.uptime,
            sys_contact: seed.contact.to_string(),
            ip_address: seed.ip.to_string(),
            device_type: seed.class,
            device_sub_type: seed.sub_class,
            interfaces: seed
                .interfaces
                .into_iter()
                .map(|(index, name, descr, speed, peer, peer_if)| Interface {
                    index,
                    name: name.to_string(),
                    description: descr.to_string(),
                    link_type: "ethernet".to_string(),
                    speed,
                    admin_status: LinkState::Up,
                    oper_status: LinkState::Up,
                    phys_address: None,
                    connected_to: Some(peer.to_string()),
                    connected_interface: Some(peer_if.to_string()),
                })
                .collect(),
            status: HealthState::Active,
            last_updated: now,
        })
        .collect()
}
