//! Payload 段（L4）
//!
//! 最内层：端口对、目标偏移与定长数据块。没有自己的校验和字段。

use std::fmt;

use tracing::trace;

use super::checksum::sum_bytes;
use super::segment::{ParseError, parse_num};
use crate::nic::{PORT_BUFFER_SIZE, PortTable};

/// 数据块长度（字节）
pub const DATA_BLOCK_SIZE: usize = 32;

/// L4 段：端口对 + 目标偏移 + 32 字节数据块。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSegment {
    pub src_port: u16,
    pub dst_port: u16,
    pub offset: u32,
    pub data: [u8; DATA_BLOCK_SIZE],
}

impl PayloadSegment {
    /// 端口、偏移按字节拆组求和，再加上数据块所有字节。
    pub fn computed_checksum(&self) -> u32 {
        let data_sum: u32 = self.data.iter().map(|&b| u32::from(b)).sum();
        sum_bytes(u32::from(self.src_port))
            + sum_bytes(u32::from(self.dst_port))
            + sum_bytes(self.offset)
            + data_sum
    }

    /// 端口对必须在开放端口表里，且数据块要能完整放进端口缓冲区。
    /// 边界 `offset + 32 == 缓冲区大小` 合法。
    pub fn validate(&self, ports: &PortTable) -> bool {
        ports.find(self.src_port, self.dst_port).is_some()
            && u64::from(self.offset) + DATA_BLOCK_SIZE as u64 <= PORT_BUFFER_SIZE as u64
    }

    /// 把数据块写进匹配端口的缓冲区 `offset` 处。validate 通过后必定成功。
    pub fn process(&self, ports: &mut PortTable) -> bool {
        let Some(port) = ports.find_mut(self.src_port, self.dst_port) else {
            return false;
        };
        let start = self.offset as usize;
        port.buffer[start..start + DATA_BLOCK_SIZE].copy_from_slice(&self.data);
        trace!(
            src_port = self.src_port,
            dst_port = self.dst_port,
            offset = start,
            "数据块写入端口缓冲区"
        );
        true
    }

    /// 解析 "srcport|dstport|offset|hex-data" 的四个字段。
    pub(super) fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        if fields.len() != 4 {
            return Err(ParseError::FieldCount {
                expected: 4,
                got: fields.len(),
            });
        }
        Ok(PayloadSegment {
            src_port: parse_num("source port", fields[0])?,
            dst_port: parse_num("destination port", fields[1])?,
            offset: parse_num("offset", fields[2])?,
            data: parse_data_block(fields[3])?,
        })
    }
}

/// 解析空格分隔的 32 个两位十六进制字节。
fn parse_data_block(s: &str) -> Result<[u8; DATA_BLOCK_SIZE], ParseError> {
    let mut data = [0u8; DATA_BLOCK_SIZE];
    let mut count = 0;
    for chunk in s.split(' ') {
        if count < DATA_BLOCK_SIZE {
            if chunk.len() != 2 {
                return Err(ParseError::BadNumber {
                    field: "data byte",
                    value: chunk.to_string(),
                });
            }
            data[count] = u8::from_str_radix(chunk, 16).map_err(|_| ParseError::BadNumber {
                field: "data byte",
                value: chunk.to_string(),
            })?;
        }
        count += 1;
    }
    if count != DATA_BLOCK_SIZE {
        return Err(ParseError::BadDataBlock {
            expected: DATA_BLOCK_SIZE,
            got: count,
        });
    }
    Ok(data)
}

impl fmt::Display for PayloadSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|", self.src_port, self.dst_port, self.offset)?;
        for (i, b) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
