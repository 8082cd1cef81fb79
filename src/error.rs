//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 请求校验错误
///
/// 在构造任何求解状态之前检测，原样返回给调用方。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("缺少{0}节点")]
    MissingTerminal(&'static str),

    #[error("{role}节点未声明: {name}")]
    UnknownTerminal { role: &'static str, name: String },

    #[error("源点与汇点相同: {0}")]
    SourceEqualsSink(String),

    #[error("第 {index} 条边引用了未声明的节点: {name}")]
    UnknownArcEndpoint { index: usize, name: String },

    #[error("第 {index} 条边容量为负数: {value}")]
    NegativeCapacity { index: usize, value: String },

    #[error("第 {index} 条边容量不是非负整数: {value}")]
    NonIntegerCapacity { index: usize, value: String },

    #[error("第 {index} 条边容量超出 u64 范围: {value}")]
    CapacityOutOfRange { index: usize, value: String },

    #[error("节点重复声明: {0}")]
    DuplicateNode(String),

    #[error("第 {0} 个节点名称为空")]
    EmptyNodeName(usize),

    #[error("源点 {0} 的出边总容量超出 u64 范围")]
    CapacityOverflow(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("请求校验失败: {0}")]
    Validation(#[from] ValidationError),

    #[error("迭代次数超过上限 {limit}")]
    ResourceExhausted { limit: usize },

    #[error("内部不变量被破坏: {0}")]
    InvariantViolation(String),

    #[error("求解已取消")]
    Cancelled,

    #[error("导入错误: {0}")]
    Import(String),

    #[error("服务器错误: {0}")]
    Server(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl Error {
    /// 是否为可以直接展示给调用方的错误
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::ResourceExhausted { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Import(e.to_string())
    }
}
