//! 结果输出
//!
//! 文本报告（LOCAL_DRAM / RQ / TQ 三段）与可序列化的 JSON 摘要。

use std::fmt::Write as _;

use serde::Serialize;

/// 单个开放端口的最终状态。
#[derive(Debug, Clone, Serialize)]
pub struct PortSummary {
    pub src_port: u16,
    pub dst_port: u16,
    /// 缓冲区内容：空格分隔的两位十六进制
    pub buffer: String,
}

/// 一次仿真运行的全部结果。
#[derive(Debug, Clone, Serialize)]
pub struct ResultsSummary {
    pub ports: Vec<PortSummary>,
    pub rq: Vec<String>,
    pub tq: Vec<String>,
}

impl ResultsSummary {
    /// 渲染文本报告：先按声明顺序列出每个端口的缓冲区，
    /// 再按到达顺序列出收队列与发队列。
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("LOCAL_DRAM\n");
        for port in &self.ports {
            let _ = writeln!(out, "{} {}: {}", port.src_port, port.dst_port, port.buffer);
        }
        out.push_str("\nRQ:\n");
        for entry in &self.rq {
            out.push_str(entry);
            out.push('\n');
        }
        out.push_str("\nTQ:\n");
        for entry in &self.tq {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }
}

/// 空格分隔的小写两位十六进制。
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}
