//! 开放端口表
//!
//! 每个开放端口是一个 (src, dst) 端口对，自带定长内存缓冲区。
//! 表保持插入顺序，结果输出时按原顺序打印。

/// 每个开放端口的缓冲区大小（字节）
pub const PORT_BUFFER_SIZE: usize = 64;

/// 开放端口：端口对 + 自己的内存缓冲区。
/// 缓冲区零初始化，整个仿真期间存活，只被成功的本地投递改写。
#[derive(Debug, Clone)]
pub struct OpenPort {
    pub src_port: u16,
    pub dst_port: u16,
    pub buffer: [u8; PORT_BUFFER_SIZE],
}

impl OpenPort {
    pub fn new(src_port: u16, dst_port: u16) -> Self {
        Self {
            src_port,
            dst_port,
            buffer: [0; PORT_BUFFER_SIZE],
        }
    }
}

/// 按声明顺序保存的开放端口集合。
#[derive(Debug, Clone, Default)]
pub struct PortTable {
    ports: Vec<OpenPort>,
}

impl PortTable {
    pub fn new(pairs: impl IntoIterator<Item = (u16, u16)>) -> Self {
        Self {
            ports: pairs
                .into_iter()
                .map(|(src, dst)| OpenPort::new(src, dst))
                .collect(),
        }
    }

    /// 精确匹配 (src, dst) 端口对，取第一个命中的。
    pub fn find(&self, src_port: u16, dst_port: u16) -> Option<&OpenPort> {
        self.ports
            .iter()
            .find(|p| p.src_port == src_port && p.dst_port == dst_port)
    }

    pub fn find_mut(&mut self, src_port: u16, dst_port: u16) -> Option<&mut OpenPort> {
        self.ports
            .iter_mut()
            .find(|p| p.src_port == src_port && p.dst_port == dst_port)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpenPort> {
        self.ports.iter()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}
