//! NIC 仿真模块
//!
//! 此模块包含 NIC 标识与配置、开放端口表、逐行仿真驱动与结果输出。

// 子模块声明
mod config;
mod identity;
mod ports;
mod report;
mod simulator;

// 重新导出公共接口
pub use config::{ConfigError, NicConfig};
pub use identity::NicIdentity;
pub use ports::{OpenPort, PORT_BUFFER_SIZE, PortTable};
pub use report::{PortSummary, ResultsSummary, hex_bytes};
pub use simulator::NicSim;
