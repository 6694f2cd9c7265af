//! 分层数据包模型
//!
//! 此模块包含 L2/L3/L4 三层段的数据模型、链式校验和、
//! 校验/处理状态机，以及按行文本的分类与解析。

// 子模块声明
mod addr;
mod checksum;
mod link;
mod network;
mod payload;
mod segment;

// 重新导出公共接口
pub use addr::{MacAddr, in_local_net};
pub use checksum::sum_bytes;
pub use link::LinkSegment;
pub use network::NetworkSegment;
pub use payload::{DATA_BLOCK_SIZE, PayloadSegment};
pub use segment::{Destination, ParseError, Segment};
