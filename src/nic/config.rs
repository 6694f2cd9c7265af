//! NIC 参数配置
//!
//! 参数文件格式：第一行 MAC，第二行 `地址/前缀长度`，
//! 其后每行一个开放端口声明（行内任意位置包含 `src:NUM` 与 `dst:NUM`）。

use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use super::identity::NicIdentity;
use crate::packet::MacAddr;

/// 配置阶段的致命错误：中止整个运行。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing MAC address line")]
    MissingMac,
    #[error("invalid MAC address `{0}`")]
    BadMac(String),
    #[error("missing address/prefix line")]
    MissingAddress,
    #[error("invalid address/prefix line `{0}`")]
    BadAddress(String),
    #[error("prefix length {0} out of range (0-32)")]
    BadPrefix(u32),
    #[error("invalid open-port declaration `{0}`")]
    BadPort(String),
}

/// 解析后的 NIC 参数。
#[derive(Debug, Clone)]
pub struct NicConfig {
    pub identity: NicIdentity,
    /// (src, dst) 对，保持文件中的声明顺序。
    pub ports: Vec<(u16, u16)>,
}

impl NicConfig {
    /// 读取并解析参数文件。文件打不开属于致命配置错误。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for NicConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        let mac_line = lines.next().ok_or(ConfigError::MissingMac)?;
        let mac: MacAddr = mac_line
            .trim()
            .parse()
            .map_err(|_| ConfigError::BadMac(mac_line.trim().to_string()))?;

        let addr_line = lines.next().ok_or(ConfigError::MissingAddress)?;
        let (ip_str, prefix_str) = addr_line
            .trim()
            .split_once('/')
            .ok_or_else(|| ConfigError::BadAddress(addr_line.trim().to_string()))?;
        let ip: Ipv4Addr = ip_str
            .parse()
            .map_err(|_| ConfigError::BadAddress(addr_line.trim().to_string()))?;
        let prefix: u32 = prefix_str
            .parse()
            .map_err(|_| ConfigError::BadAddress(addr_line.trim().to_string()))?;
        if prefix > 32 {
            return Err(ConfigError::BadPrefix(prefix));
        }

        let mut ports = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            ports.push(parse_port_line(line)?);
        }

        Ok(NicConfig {
            identity: NicIdentity {
                mac,
                ip,
                prefix_len: prefix as u8,
            },
            ports,
        })
    }
}

/// 在行内找出 `src:NUM` 与 `dst:NUM` 两个记号，位置不限。
fn parse_port_line(line: &str) -> Result<(u16, u16), ConfigError> {
    let src = extract_port_token(line, "src:")
        .ok_or_else(|| ConfigError::BadPort(line.to_string()))?;
    let dst = extract_port_token(line, "dst:")
        .ok_or_else(|| ConfigError::BadPort(line.to_string()))?;
    Ok((src, dst))
}

/// 取记号后面紧跟的十进制数字串。
fn extract_port_token(line: &str, token: &str) -> Option<u16> {
    let start = line.find(token)? + token.len();
    let digits: String = line[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
