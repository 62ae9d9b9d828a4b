//! 跨链消息使用的地址类型
//!
//! 原生链账户以原始字节保存，线上格式为 bech32 字符串；外部链账户为固定
//! 20 字节的以太坊地址，见 [`EthereumAddress`]。

use std::fmt;

use bech32::{Bech32, Hrp};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

mod ethereum;

pub use ethereum::EthereumAddress;

/// 合法原生链地址的字节长度
pub const ADDR_LEN: usize = 20;

/// 主网地址前缀，未指定前缀时使用
pub const ADDRESS_HRP: Hrp = Hrp::parse_unchecked("bnb");

/// 原生链账户地址
///
/// 构造时不检查长度，长度错误的地址会在 `validate_basic` 中被拒绝。
/// 解码得到的 bech32 前缀会被保留，重新编码时原样输出。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeAddress {
    hrp: Hrp,
    bytes: Vec<u8>,
}

impl NativeAddress {
    /// 使用主网前缀创建地址
    pub fn new(bytes: Vec<u8>) -> Self {
        Self::with_hrp(ADDRESS_HRP, bytes)
    }

    /// 使用指定前缀创建地址
    pub fn with_hrp(hrp: Hrp, bytes: Vec<u8>) -> Self {
        Self { hrp, bytes }
    }

    /// 解码 bech32 地址，接受任意前缀并保留
    pub fn from_bech32(s: &str) -> Result<Self, Error> {
        let (hrp, bytes) = bech32::decode(s)
            .map_err(|e| Error::Decode(format!("Invalid bech32 address {}: {}", s, e)))?;
        Ok(Self { hrp, bytes })
    }

    /// 按地址自身的前缀编码为 bech32
    pub fn to_bech32(&self) -> Result<String, Error> {
        bech32::encode::<Bech32>(self.hrp, &self.bytes)
            .map_err(|e| Error::Serialization(format!("Failed to encode address: {}", e)))
    }

    /// 获取 bech32 前缀
    pub fn hrp(&self) -> Hrp {
        self.hrp
    }

    /// 获取原始字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 字节长度
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 是否为空地址
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 地址长度是否恰好为 [`ADDR_LEN`]
    pub fn has_valid_len(&self) -> bool {
        self.bytes.len() == ADDR_LEN
    }
}

impl Default for NativeAddress {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<[u8; ADDR_LEN]> for NativeAddress {
    fn from(bytes: [u8; ADDR_LEN]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<Vec<u8>> for NativeAddress {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for NativeAddress {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for NativeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes.is_empty() {
            return Ok(());
        }
        match self.to_bech32() {
            Ok(s) => f.write_str(&s),
            // 超长数据无法编码为 bech32
            Err(_) => write!(f, "{}", hex::encode(&self.bytes)),
        }
    }
}

impl Serialize for NativeAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.bytes.is_empty() {
            return serializer.serialize_str("");
        }
        match self.to_bech32() {
            Ok(encoded) => serializer.serialize_str(&encoded),
            Err(e) => Err(serde::ser::Error::custom(e)),
        }
    }
}

impl<'de> Deserialize<'de> for NativeAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::from_bech32(&s).map_err(de::Error::custom)
    }
}
