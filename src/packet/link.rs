//! Link 段（L2）
//!
//! 最外层：硬件地址与显式校验和。校验和覆盖内层“存储的”校验和字段，
//! 所以内层校验和必须先定下来。

use std::fmt;

use super::addr::MacAddr;
use super::checksum::sum_bytes;
use super::network::NetworkSegment;
use super::segment::{Destination, ParseError, parse_num};
use crate::nic::{NicIdentity, PortTable};

/// L2 段：MAC 对 + 存储的校验和，内含一个 network 段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSegment {
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
    pub checksum: u32,
    pub network: NetworkSegment,
}

impl LinkSegment {
    /// 内层 network 的重算值 + 两个 MAC 的字节和 + 内层存储的校验和
    /// 字段的字节和。覆盖的是传输中的校验和字节本身，不是重算值。
    pub fn computed_checksum(&self) -> u32 {
        self.network.computed_checksum()
            + self.src_mac.byte_sum()
            + self.dst_mac.byte_sum()
            + sum_bytes(self.network.checksum)
    }

    /// 目的 MAC 必须是本 NIC 的，且校验和一致。
    pub fn validate(&self, identity: &NicIdentity) -> bool {
        self.dst_mac == identity.mac && self.checksum == self.computed_checksum()
    }

    /// 先校验内层 network，通过后交给它处理。
    /// 自身存储的校验和不随内层改动刷新。
    pub fn process(
        &mut self,
        identity: &NicIdentity,
        ports: &mut PortTable,
    ) -> Option<Destination> {
        if !self.network.validate() {
            return None;
        }
        self.network.process(identity, ports)
    }

    /// 解析 "srcmac|dstmac|<network>|cs" 的十一个字段。
    /// 注意 link 校验和是最后一个字段，位于内层序列化之后。
    pub(super) fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        if fields.len() != 11 {
            return Err(ParseError::FieldCount {
                expected: 11,
                got: fields.len(),
            });
        }
        Ok(LinkSegment {
            src_mac: fields[0].parse()?,
            dst_mac: fields[1].parse()?,
            checksum: parse_num("link checksum", fields[10])?,
            network: NetworkSegment::from_fields(&fields[2..10])?,
        })
    }
}

impl fmt::Display for LinkSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.src_mac, self.dst_mac, self.network, self.checksum
        )
    }
}
