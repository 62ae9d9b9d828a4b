use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// 标准 20 字节以太坊账户或合约地址
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EthereumAddress([u8; 20]);

impl EthereumAddress {
    /// 地址字节长度
    pub const LEN: usize = 20;

    /// 从原始字节创建地址
    pub fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// 全零地址，视为空地址
    pub fn zero() -> Self {
        Self([0; Self::LEN])
    }

    /// 解析 `0x` 加 40 位十六进制的地址
    ///
    /// 前缀可省略，大小写均可；解码后长度不是 20 字节时返回 `Decode` 错误。
    pub fn from_hex_str(s: &str) -> Result<Self, Error> {
        let digits = strip_hex_prefix(s).unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| Error::Decode(format!("Invalid ethereum address {}: {}", s, e)))?;
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            Error::Decode(format!(
                "Invalid ethereum address length: expected {} bytes, got {}",
                Self::LEN,
                b.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// 所有字节均为零时视为空地址
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// 获取原始字节
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

impl From<[u8; 20]> for EthereumAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for EthereumAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for EthereumAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthereumAddress({})", self)
    }
}

impl Serialize for EthereumAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EthereumAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // JSON 中必须带 0x 前缀
        if strip_hex_prefix(&s).is_none() {
            return Err(de::Error::custom(Error::Decode(format!(
                "Ethereum address {} is missing the 0x prefix",
                s
            ))));
        }
        Self::from_hex_str(&s).map_err(de::Error::custom)
    }
}
