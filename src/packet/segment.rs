//! 段分类与顶层调度
//!
//! 按行文本判定最外层是哪种段，自外向内解析，
//! 并提供统一的 validate/process 入口。

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::link::LinkSegment;
use super::network::NetworkSegment;
use super::payload::PayloadSegment;
use crate::nic::{NicIdentity, PortTable};

/// 处理成功后结果应落入的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// 端口自带的本地缓冲区（写入已在处理中完成，不进队列）
    LocalMemory,
    /// 接收队列
    ReceiveQueue,
    /// 发送队列
    TransmitQueue,
}

/// 逐包可恢复的解析错误：调用方丢弃该行并继续。
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected {expected} `|`-separated fields, got {got}")]
    FieldCount { expected: usize, got: usize },
    #[error("invalid {field} value `{value}`")]
    BadNumber { field: &'static str, value: String },
    #[error("invalid hardware address `{0}`")]
    BadMac(String),
    #[error("invalid network address `{0}`")]
    BadIp(String),
    #[error("data block must be {expected} hex bytes, got {got}")]
    BadDataBlock { expected: usize, got: usize },
}

/// 解析一个十进制字段，失败时带上字段名。
pub(super) fn parse_num<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::BadNumber {
        field,
        value: value.to_string(),
    })
}

/// 分层数据包：封闭的三变体和类型，按最外层种类打标签。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Link(LinkSegment),
    Network(NetworkSegment),
    Payload(PayloadSegment),
}

impl Segment {
    /// 纯语法分类，固定优先级：
    /// 1. 第 3 个字符是 ':' → 最外层为硬件层（MAC 记法每组定长）；
    /// 2. 否则前 4 个字符内出现 '.' → 最外层为地址层（点分十进制，
    ///    每段最多 3 位）；
    /// 3. 否则为端口/数据层。
    ///
    /// 之后自外向内解析：按 `|` 切分，先取本层字段，剩余部分交给内层。
    pub fn parse(line: &str) -> Result<Segment, ParseError> {
        let fields: Vec<&str> = line.split('|').collect();
        let bytes = line.as_bytes();

        if bytes.get(2) == Some(&b':') {
            return LinkSegment::from_fields(&fields).map(Segment::Link);
        }
        if bytes.iter().take(4).any(|&b| b == b'.') {
            return NetworkSegment::from_fields(&fields).map(Segment::Network);
        }
        PayloadSegment::from_fields(&fields).map(Segment::Payload)
    }

    /// 最外层的重算校验和。
    pub fn computed_checksum(&self) -> u32 {
        match self {
            Segment::Link(link) => link.computed_checksum(),
            Segment::Network(network) => network.computed_checksum(),
            Segment::Payload(payload) => payload.computed_checksum(),
        }
    }

    /// 最外层校验；通过后才允许调用 [`Segment::process`]。
    pub fn validate(&self, identity: &NicIdentity, ports: &PortTable) -> bool {
        match self {
            Segment::Link(link) => link.validate(identity),
            Segment::Network(network) => network.validate(),
            Segment::Payload(payload) => payload.validate(ports),
        }
    }

    /// 逐层处理，内层递归；失败（丢弃）时返回 None。
    pub fn process(
        &mut self,
        identity: &NicIdentity,
        ports: &mut PortTable,
    ) -> Option<Destination> {
        match self {
            Segment::Link(link) => link.process(identity, ports),
            Segment::Network(network) => network.process(identity, ports),
            Segment::Payload(payload) => payload
                .process(ports)
                .then_some(Destination::LocalMemory),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Link(link) => link.fmt(f),
            Segment::Network(network) => network.fmt(f),
            Segment::Payload(payload) => payload.fmt(f),
        }
    }
}

impl FromStr for Segment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segment::parse(s)
    }
}
