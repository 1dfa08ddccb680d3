//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// 边操作收到了空缺的端点名称（空字符串视为缺失标识）
    #[error("端点缺失: {0}")]
    MissingEndpoint(String),

    /// 边操作引用了图中不存在的城镇
    #[error("端点无效: 城镇 '{0}' 不在图中")]
    InvalidEndpoint(String),

    /// 导入行违反了格式约束（分隔符数量/顺序、权重解析）
    #[error("记录格式错误: {0}")]
    MalformedRecord(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
