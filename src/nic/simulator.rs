//! 接口仿真器
//!
//! 持有 NIC 标识、开放端口表与两个输出队列，逐行驱动校验-处理流程。
//! 单线程：每个数据包完整走完校验、处理、序列化之后才读下一行。

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace, warn};

use super::config::{ConfigError, NicConfig};
use super::identity::NicIdentity;
use super::ports::PortTable;
use super::report::{PortSummary, ResultsSummary, hex_bytes};
use crate::packet::{Destination, Segment};

/// NIC 仿真器：标识 + 端口表 + 收/发队列。
#[derive(Debug)]
pub struct NicSim {
    identity: NicIdentity,
    ports: PortTable,
    rq: Vec<String>,
    tq: Vec<String>,
}

impl NicSim {
    pub fn new(config: NicConfig) -> Self {
        Self {
            identity: config.identity,
            ports: PortTable::new(config.ports),
            rq: Vec::new(),
            tq: Vec::new(),
        }
    }

    pub fn identity(&self) -> &NicIdentity {
        &self.identity
    }

    pub fn ports(&self) -> &PortTable {
        &self.ports
    }

    pub fn receive_queue(&self) -> &[String] {
        &self.rq
    }

    pub fn transmit_queue(&self) -> &[String] {
        &self.tq
    }

    /// 处理一行数据包文本，返回成功时的投递位置。
    ///
    /// 解析失败按可恢复错误处理：丢弃该行继续。校验或处理失败
    /// 同样只是丢弃，不分配投递位置。
    #[tracing::instrument(skip(self, line))]
    pub fn handle_line(&mut self, line: &str) -> Option<Destination> {
        let mut segment = match Segment::parse(line) {
            Ok(segment) => segment,
            Err(err) => {
                warn!(%err, "丢弃无法解析的行");
                return None;
            }
        };

        if !segment.validate(&self.identity, &self.ports) {
            debug!("校验失败，丢弃");
            return None;
        }

        let dest = segment.process(&self.identity, &mut self.ports)?;
        match dest {
            // 本地投递已经写进端口缓冲区，不进队列。
            Destination::LocalMemory => {}
            Destination::ReceiveQueue => self.rq.push(segment.to_string()),
            Destination::TransmitQueue => self.tq.push(segment.to_string()),
        }
        trace!(?dest, "数据包已投递");
        Some(dest)
    }

    /// 逐行处理整个输入流，空行跳过。
    pub fn run<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            self.handle_line(&line);
        }
        Ok(())
    }

    /// 打开数据包文件并处理全部行。文件打不开属于致命配置错误。
    pub fn run_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.run(BufReader::new(file))
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// 汇总当前全部结果。
    pub fn results(&self) -> ResultsSummary {
        ResultsSummary {
            ports: self
                .ports
                .iter()
                .map(|p| PortSummary {
                    src_port: p.src_port,
                    dst_port: p.dst_port,
                    buffer: hex_bytes(&p.buffer),
                })
                .collect(),
            rq: self.rq.clone(),
            tq: self.tq.clone(),
        }
    }
}
