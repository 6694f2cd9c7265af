//! Network 段（L3）
//!
//! 中间层：逻辑地址、TTL 与显式校验和；承担转发/投递决策。

use std::fmt;
use std::net::Ipv4Addr;

use tracing::{debug, trace};

use super::addr::ip_byte_sum;
use super::checksum::sum_bytes;
use super::payload::PayloadSegment;
use super::segment::{Destination, ParseError, parse_num};
use crate::nic::{NicIdentity, PortTable};

/// L3 段：地址对 + TTL + 存储的校验和，内含一个 payload 段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSegment {
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub ttl: u32,
    pub checksum: u32,
    pub payload: PayloadSegment,
}

impl NetworkSegment {
    /// 内层 payload 的重算值 + 两个地址的字节和 + TTL 的字节和。
    /// 自身存储的校验和字段不参与求和。
    pub fn computed_checksum(&self) -> u32 {
        self.payload.computed_checksum()
            + ip_byte_sum(self.src_ip)
            + ip_byte_sum(self.dst_ip)
            + sum_bytes(self.ttl)
    }

    /// TTL 未耗尽且存储的校验和与重算值一致。
    pub fn validate(&self) -> bool {
        self.ttl > 0 && self.checksum == self.computed_checksum()
    }

    /// 逐包转发决策。
    ///
    /// 本地投递判断先于 TTL 递减：目的地址就是本 NIC 时不消耗跳数、
    /// 不改动任何字段。其余路径先消耗一跳并刷新校验和，再按源/目的
    /// 地址的子网归属决定丢弃、收队列或发队列。
    pub fn process(
        &mut self,
        identity: &NicIdentity,
        ports: &mut PortTable,
    ) -> Option<Destination> {
        if self.dst_ip == identity.ip {
            if self.ttl > 0 && self.payload.validate(ports) && self.payload.process(ports) {
                debug!("本地投递到端口缓冲区");
                return Some(Destination::LocalMemory);
            }
            return None;
        }

        // TTL 变了，存储的校验和必须跟着刷新。
        self.ttl = self.ttl.saturating_sub(1);
        self.checksum = self.computed_checksum();
        if self.ttl == 0 {
            trace!("TTL 耗尽，丢弃");
            return None;
        }

        let src_local = identity.in_local_net(self.src_ip);
        let dst_local = identity.in_local_net(self.dst_ip);
        match (src_local, dst_local) {
            // 源与目的都在本地网段：本地已送达，无需转发。
            (true, true) => None,
            // 从外部进入本地网段：收队列。
            (false, true) => Some(Destination::ReceiveQueue),
            // 本地流出：源地址改写成 NIC 地址（出口地址转换），再刷新校验和。
            (true, false) => {
                self.src_ip = identity.ip;
                self.checksum = self.computed_checksum();
                Some(Destination::TransmitQueue)
            }
            // 纯中转。
            (false, false) => Some(Destination::TransmitQueue),
        }
    }

    /// 解析 "srcip|dstip|ttl|cs|<payload>" 的八个字段。
    pub(super) fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        if fields.len() != 8 {
            return Err(ParseError::FieldCount {
                expected: 8,
                got: fields.len(),
            });
        }
        let src_ip: Ipv4Addr = fields[0]
            .parse()
            .map_err(|_| ParseError::BadIp(fields[0].to_string()))?;
        let dst_ip: Ipv4Addr = fields[1]
            .parse()
            .map_err(|_| ParseError::BadIp(fields[1].to_string()))?;
        Ok(NetworkSegment {
            src_ip,
            dst_ip,
            ttl: parse_num("ttl", fields[2])?,
            checksum: parse_num("network checksum", fields[3])?,
            payload: PayloadSegment::from_fields(&fields[4..])?,
        })
    }
}

impl fmt::Display for NetworkSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.src_ip, self.dst_ip, self.ttl, self.checksum, self.payload
        )
    }
}
