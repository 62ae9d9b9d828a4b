use std::fmt;

use serde::{Deserialize, Serialize};

use super::{impl_bridge_msg, BIND_MSG_TYPE, UPDATE_BIND_MSG_TYPE};
use crate::{
    address::{EthereumAddress, NativeAddress, ADDR_LEN},
    types::BindStatus,
    Error,
};

/// 代币绑定消息
///
/// 请求将原生代币 `symbol` 与外部链代币合约绑定，`amount` 为锁定给跨链桥的原生供应量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindMsg {
    from: NativeAddress,
    symbol: String,
    amount: i64,
    contract_address: EthereumAddress,
    contract_decimals: i8,
    expire_time: i64,
}

impl BindMsg {
    /// 创建绑定消息，`from` 为签名者
    pub fn new(
        from: NativeAddress,
        symbol: impl Into<String>,
        amount: i64,
        contract_address: EthereumAddress,
        contract_decimals: i8,
        expire_time: i64,
    ) -> Self {
        Self {
            from,
            symbol: symbol.into(),
            amount,
            contract_address,
            contract_decimals,
            expire_time,
        }
    }

    /// 代币所有者
    pub fn from(&self) -> &NativeAddress {
        &self.from
    }

    /// 原生代币符号
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 锁定数量
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// 外部链代币合约地址
    pub fn contract_address(&self) -> &EthereumAddress {
        &self.contract_address
    }

    /// 外部链代币合约精度
    pub fn contract_decimals(&self) -> i8 {
        self.contract_decimals
    }

    /// 过期时间
    pub fn expire_time(&self) -> i64 {
        self.expire_time
    }

    /// 基本校验，按顺序检查并返回第一个失败的规则
    pub fn validate_basic(&self) -> Result<(), Error> {
        if !self.from.has_valid_len() {
            return Err(Error::Validation(format!("address length should be {}", ADDR_LEN)));
        }
        validate_binding(
            &self.symbol,
            self.amount,
            &self.contract_address,
            self.contract_decimals,
        )?;
        if self.expire_time <= 0 {
            return Err(Error::Validation("expire time should be larger than 0".to_string()));
        }
        Ok(())
    }
}

impl_bridge_msg!(BindMsg, Bind, BIND_MSG_TYPE, from);

impl fmt::Display for BindMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bind{{{}#{}#{}#{}#{}#{}}}",
            self.from,
            self.symbol,
            self.amount,
            self.contract_address,
            self.contract_decimals,
            self.expire_time
        )
    }
}

/// 更新绑定结果消息
///
/// 验证者回报 [`BindMsg`] 在外部链上的处理结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBindMsg {
    sequence: i64,
    status: BindStatus,
    symbol: String,
    amount: i64,
    contract_address: EthereumAddress,
    contract_decimals: i8,
    validator_address: NativeAddress,
}

impl UpdateBindMsg {
    /// 创建更新绑定消息，`validator_address` 为签名者
    pub fn new(
        sequence: i64,
        validator_address: NativeAddress,
        symbol: impl Into<String>,
        amount: i64,
        contract_address: EthereumAddress,
        contract_decimals: i8,
        status: BindStatus,
    ) -> Self {
        Self {
            sequence,
            status,
            symbol: symbol.into(),
            amount,
            contract_address,
            contract_decimals,
            validator_address,
        }
    }

    /// 绑定请求序号
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    /// 绑定结果
    pub fn status(&self) -> BindStatus {
        self.status
    }

    /// 原生代币符号
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 锁定数量
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// 外部链代币合约地址
    pub fn contract_address(&self) -> &EthereumAddress {
        &self.contract_address
    }

    /// 外部链代币合约精度
    pub fn contract_decimals(&self) -> i8 {
        self.contract_decimals
    }

    /// 验证者地址
    pub fn validator_address(&self) -> &NativeAddress {
        &self.validator_address
    }

    /// 基本校验，序号与状态不做检查
    pub fn validate_basic(&self) -> Result<(), Error> {
        if !self.validator_address.has_valid_len() {
            return Err(Error::Validation(format!("address length should be {}", ADDR_LEN)));
        }
        validate_binding(
            &self.symbol,
            self.amount,
            &self.contract_address,
            self.contract_decimals,
        )
    }
}

impl_bridge_msg!(UpdateBindMsg, UpdateBind, UPDATE_BIND_MSG_TYPE, validator_address);

impl fmt::Display for UpdateBindMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UpdateBind{{{}#{}#{}#{}#{}#{}}}",
            self.validator_address,
            self.symbol,
            self.amount,
            self.contract_address,
            self.contract_decimals,
            self.status
        )
    }
}

// 绑定与更新绑定共用的规则，精度没有上限
fn validate_binding(
    symbol: &str,
    amount: i64,
    contract_address: &EthereumAddress,
    contract_decimals: i8,
) -> Result<(), Error> {
    if symbol.is_empty() {
        return Err(Error::Validation("symbol should not be empty".to_string()));
    }
    if amount <= 0 {
        return Err(Error::Validation("amount should be larger than 0".to_string()));
    }
    if contract_address.is_empty() {
        return Err(Error::Validation("contract address should not be empty".to_string()));
    }
    if contract_decimals < 0 {
        return Err(Error::Validation("decimal should be no less than 0".to_string()));
    }
    Ok(())
}
