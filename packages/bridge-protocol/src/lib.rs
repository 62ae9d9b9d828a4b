//! 跨链桥消息协议
//!
//! 定义原生链与以太坊兼容链之间跨链桥的五种交易消息、地址类型，以及
//! 校验后交给广播器的客户端。

pub mod address;
pub mod client;
pub mod config;
pub mod msg;
pub mod types;

pub use address::{EthereumAddress, NativeAddress, ADDR_LEN};
pub use client::{BridgeClient, Broadcaster, KeyManager};
pub use config::ClientConfig;
pub use msg::BridgeMsg;
pub use types::{BindStatus, Coin};

/// 库的统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 配置读取或校验失败
    #[error("Config error: {0}")]
    Config(String),

    /// 地址或枚举值解码失败
    #[error("Decode error: {0}")]
    Decode(String),

    /// 消息未通过 `validate_basic`
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON 编解码失败
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 广播器返回的错误
    #[error("Broadcast error: {0}")]
    Broadcast(String),
}
