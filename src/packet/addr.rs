//! 地址类型
//!
//! 定义硬件（MAC）地址，以及 IPv4 地址的字节求和与子网匹配辅助。

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::segment::ParseError;

/// MAC 地址长度（字节）
pub const MAC_SIZE: usize = 6;

/// 硬件地址：6 字节，按 "aa:bb:cc:dd:ee:ff" 读写。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr(pub [u8; MAC_SIZE]);

impl MacAddr {
    /// 所有字节之和（校验和用）
    pub fn byte_sum(&self) -> u32 {
        self.0.iter().map(|&b| u32::from(b)).sum()
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for MacAddr {
    type Err = ParseError;

    /// 只接受恰好 6 组、每组恰好 2 个十六进制字符的形式。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; MAC_SIZE];
        let mut groups = s.split(':');
        for slot in bytes.iter_mut() {
            let group = groups
                .next()
                .filter(|g| g.len() == 2)
                .ok_or_else(|| ParseError::BadMac(s.to_string()))?;
            *slot =
                u8::from_str_radix(group, 16).map_err(|_| ParseError::BadMac(s.to_string()))?;
        }
        if groups.next().is_some() {
            return Err(ParseError::BadMac(s.to_string()));
        }
        Ok(MacAddr(bytes))
    }
}

/// IPv4 地址全部字节之和（校验和用）
pub(crate) fn ip_byte_sum(ip: Ipv4Addr) -> u32 {
    ip.octets().iter().map(|&b| u32::from(b)).sum()
}

/// 两个地址在 `prefix_len` 前缀下是否属于同一本地网段：
/// 比较 32 bit 地址的前 `prefix_len` 位。前缀为 0 时任何两个地址都算本地。
pub fn in_local_net(a: Ipv4Addr, b: Ipv4Addr, prefix_len: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    let shift = 32 - u32::from(prefix_len.min(32));
    (a.to_bits() >> shift) == (b.to_bits() >> shift)
}
