//! 跨链桥交易消息
//!
//! 每种消息提供相同的接口：路由标识、类型标识、授权签名者、无状态的
//! `validate_basic` 校验，以及签名者签名所用的规范字节。[`BridgeMsg`]
//! 封闭了所有消息种类，便于统一交给广播器。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{address::NativeAddress, Error};

mod bind;
mod transfer;

pub use bind::{BindMsg, UpdateBindMsg};
pub use transfer::{TransferInMsg, TransferOutMsg, TransferOutTimeoutMsg};

/// 跨链桥模块路由
pub const ROUTE_BRIDGE: &str = "bridge";

/// 跨链转入消息类型
pub const TRANSFER_IN_MSG_TYPE: &str = "crossTransferIn";
/// 跨链转出超时消息类型
pub const TRANSFER_OUT_TIMEOUT_MSG_TYPE: &str = "crossTransferOutTimeout";
/// 代币绑定消息类型
pub const BIND_MSG_TYPE: &str = "crossBind";
/// 跨链转出消息类型
pub const TRANSFER_OUT_MSG_TYPE: &str = "crossTransferOut";
/// 更新绑定结果消息类型
pub const UPDATE_BIND_MSG_TYPE: &str = "crossUpdateBind";

/// 将消息字段序列化为签名字节
///
/// 序列化失败说明内存中的数据已损坏，直接 panic。
fn sign_bytes_of<T: Serialize>(msg: &T) -> Vec<u8> {
    serde_json::to_vec(msg).expect("bridge msg: enc sign bytes")
}

macro_rules! impl_bridge_msg {
    ($name:ident, $variant:ident, $msg_type:expr, $signer:ident) => {
        impl $name {
            /// 消息路由
            pub fn route(&self) -> &'static str {
                $crate::msg::ROUTE_BRIDGE
            }

            /// 消息类型
            pub fn msg_type(&self) -> &'static str {
                $msg_type
            }

            /// 需要签名授权的地址
            pub fn signers(&self) -> Vec<$crate::address::NativeAddress> {
                vec![self.$signer.clone()]
            }

            /// 消息涉及的地址，与签名者一致
            pub fn involved_addresses(&self) -> Vec<$crate::address::NativeAddress> {
                self.signers()
            }

            /// 规范签名字节：按字段声明顺序输出的紧凑 JSON
            pub fn sign_bytes(&self) -> Vec<u8> {
                $crate::msg::sign_bytes_of(self)
            }
        }

        impl From<$name> for $crate::msg::BridgeMsg {
            fn from(msg: $name) -> Self {
                $crate::msg::BridgeMsg::$variant(msg)
            }
        }
    };
}

pub(crate) use impl_bridge_msg;

/// 跨链桥模块处理的所有消息
///
/// JSON 形式为 `{"type": <消息类型>, "value": {...}}` 信封，仅供工具使用；
/// 签名始终针对 [`BridgeMsg::sign_bytes`]，即不含信封的消息本体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BridgeMsg {
    #[serde(rename = "crossTransferIn")]
    TransferIn(TransferInMsg),

    #[serde(rename = "crossTransferOutTimeout")]
    TransferOutTimeout(TransferOutTimeoutMsg),

    #[serde(rename = "crossBind")]
    Bind(BindMsg),

    #[serde(rename = "crossTransferOut")]
    TransferOut(TransferOutMsg),

    #[serde(rename = "crossUpdateBind")]
    UpdateBind(UpdateBindMsg),
}

macro_rules! dispatch {
    ($self:ident, $msg:ident => $body:expr) => {
        match $self {
            BridgeMsg::TransferIn($msg) => $body,
            BridgeMsg::TransferOutTimeout($msg) => $body,
            BridgeMsg::Bind($msg) => $body,
            BridgeMsg::TransferOut($msg) => $body,
            BridgeMsg::UpdateBind($msg) => $body,
        }
    };
}

impl BridgeMsg {
    /// 从 JSON 信封解析消息
    pub fn from_json(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s)
            .map_err(|e| Error::Serialization(format!("Failed to parse bridge message: {}", e)))
    }

    /// 编码为 JSON 信封
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|e| Error::Serialization(format!("Failed to encode bridge message: {}", e)))
    }

    /// 消息路由
    pub fn route(&self) -> &'static str {
        dispatch!(self, msg => msg.route())
    }

    /// 消息类型
    pub fn msg_type(&self) -> &'static str {
        dispatch!(self, msg => msg.msg_type())
    }

    /// 需要签名授权的地址
    pub fn signers(&self) -> Vec<NativeAddress> {
        dispatch!(self, msg => msg.signers())
    }

    /// 消息涉及的地址
    pub fn involved_addresses(&self) -> Vec<NativeAddress> {
        dispatch!(self, msg => msg.involved_addresses())
    }

    /// 消息本体的签名字节，不含信封
    pub fn sign_bytes(&self) -> Vec<u8> {
        dispatch!(self, msg => msg.sign_bytes())
    }

    /// 基本校验，不访问网络
    pub fn validate_basic(&self) -> Result<(), Error> {
        dispatch!(self, msg => msg.validate_basic())
    }
}

impl fmt::Display for BridgeMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, msg => fmt::Display::fmt(msg, f))
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{
        address::{EthereumAddress, NativeAddress, ADDR_LEN},
        types::Coin,
    };

    pub fn native(byte: u8) -> NativeAddress {
        NativeAddress::from([byte; ADDR_LEN])
    }

    pub fn eth(last: u8) -> EthereumAddress {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        EthereumAddress::new(bytes)
    }

    pub fn coin(amount: i64) -> Coin {
        Coin::new("BNB", amount)
    }

    pub fn reason(err: crate::Error) -> String {
        match err {
            crate::Error::Validation(reason) => reason,
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
