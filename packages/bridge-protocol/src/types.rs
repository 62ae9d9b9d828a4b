use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// 外部链代币合约的最大精度
///
/// `validate_basic` 不检查该上限，由账本自行处理。
pub const MAX_DECIMAL: i8 = 18;

/// 原生链上单一币种的数量
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// 币种名称
    pub denom: String,
    /// 数量
    pub amount: i64,
}

impl Coin {
    /// 创建币种数量
    pub fn new(denom: impl Into<String>, amount: i64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// 数量大于 0 且币种名称非空
    pub fn is_positive(&self) -> bool {
        self.amount > 0 && !self.denom.is_empty()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// 验证者回报的绑定请求结果，线上格式为整数值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum BindStatus {
    /// 绑定成功
    Success = 0,
    /// 外部链拒绝绑定
    Rejected = 1,
    /// 绑定请求过期
    Timeout = 2,
    /// 绑定参数无效
    InvalidParameter = 3,
}

impl BindStatus {
    /// 获取线上整数值
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

impl TryFrom<i8> for BindStatus {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BindStatus::Success),
            1 => Ok(BindStatus::Rejected),
            2 => Ok(BindStatus::Timeout),
            3 => Ok(BindStatus::InvalidParameter),
            other => Err(Error::Decode(format!("Unknown bind status: {}", other))),
        }
    }
}

impl fmt::Display for BindStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

impl Serialize for BindStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for BindStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i8::deserialize(deserializer)?;
        BindStatus::try_from(value).map_err(de::Error::custom)
    }
}
