//! Shared builders for the behavior tests.

use std::net::Ipv4Addr;

use crate::nic::{NicConfig, NicIdentity, NicSim};
use crate::packet::{DATA_BLOCK_SIZE, LinkSegment, NetworkSegment, PayloadSegment};

pub const NIC_MAC: &str = "aa:bb:cc:dd:ee:ff";

/// NIC at 10.0.0.1/24.
pub fn identity() -> NicIdentity {
    NicIdentity {
        mac: NIC_MAC.parse().expect("nic mac"),
        ip: Ipv4Addr::new(10, 0, 0, 1),
        prefix_len: 24,
    }
}

pub fn sim_with_ports(ports: &[(u16, u16)]) -> NicSim {
    NicSim::new(NicConfig {
        identity: identity(),
        ports: ports.to_vec(),
    })
}

/// Payload whose data block is the byte ramp 0x00..0x1f.
pub fn payload(src_port: u16, dst_port: u16, offset: u32) -> PayloadSegment {
    let mut data = [0u8; DATA_BLOCK_SIZE];
    for (i, b) in data.iter_mut().enumerate() {
        *b = i as u8;
    }
    PayloadSegment {
        src_port,
        dst_port,
        offset,
        data,
    }
}

/// Network segment with its stored checksum already sealed.
pub fn sealed_network(
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    ttl: u32,
    payload: PayloadSegment,
) -> NetworkSegment {
    let mut network = NetworkSegment {
        src_ip,
        dst_ip,
        ttl,
        checksum: 0,
        payload,
    };
    network.checksum = network.computed_checksum();
    network
}

/// Link segment sealed over an already-sealed network segment.
pub fn sealed_link(src_mac: &str, dst_mac: &str, network: NetworkSegment) -> LinkSegment {
    let mut link = LinkSegment {
        src_mac: src_mac.parse().expect("src mac"),
        dst_mac: dst_mac.parse().expect("dst mac"),
        checksum: 0,
        network,
    };
    link.checksum = link.computed_checksum();
    link
}
