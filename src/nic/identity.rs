//! NIC 自身标识
//!
//! MAC、IPv4 地址与子网前缀长度。进程级配置，加载一次后不再变化。

use std::net::Ipv4Addr;

use crate::packet::{MacAddr, in_local_net};

/// NIC 的硬件地址、逻辑地址与子网前缀长度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NicIdentity {
    pub mac: MacAddr,
    pub ip: Ipv4Addr,
    /// 子网前缀长度（0..=32）
    pub prefix_len: u8,
}

impl NicIdentity {
    /// 给定地址与 NIC 地址是否同属本地网段。
    pub fn in_local_net(&self, addr: Ipv4Addr) -> bool {
        in_local_net(self.ip, addr, self.prefix_len)
    }
}
