use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    impl_bridge_msg, TRANSFER_IN_MSG_TYPE, TRANSFER_OUT_MSG_TYPE, TRANSFER_OUT_TIMEOUT_MSG_TYPE,
};
use crate::{
    address::{EthereumAddress, NativeAddress, ADDR_LEN},
    types::Coin,
    Error,
};

/// 跨链转入消息
///
/// 验证者证明外部链上已锁定 `amount`，需要在原生链上释放给接收地址。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInMsg {
    sequence: i64,
    contract_address: EthereumAddress,
    sender_address: EthereumAddress,
    receiver_address: NativeAddress,
    amount: Coin,
    relay_fee: Coin,
    validator_address: NativeAddress,
    expire_time: i64,
}

impl TransferInMsg {
    /// 创建转入消息，`validator_address` 为签名者
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: i64,
        contract_address: EthereumAddress,
        sender_address: EthereumAddress,
        receiver_address: NativeAddress,
        amount: Coin,
        relay_fee: Coin,
        validator_address: NativeAddress,
        expire_time: i64,
    ) -> Self {
        Self {
            sequence,
            contract_address,
            sender_address,
            receiver_address,
            amount,
            relay_fee,
            validator_address,
            expire_time,
        }
    }

    /// 外部链分配的序号
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    /// 外部链代币合约地址
    pub fn contract_address(&self) -> &EthereumAddress {
        &self.contract_address
    }

    /// 外部链发送方地址
    pub fn sender_address(&self) -> &EthereumAddress {
        &self.sender_address
    }

    /// 原生链接收地址
    pub fn receiver_address(&self) -> &NativeAddress {
        &self.receiver_address
    }

    /// 转入数量
    pub fn amount(&self) -> &Coin {
        &self.amount
    }

    /// 中继手续费
    pub fn relay_fee(&self) -> &Coin {
        &self.relay_fee
    }

    /// 验证者地址
    pub fn validator_address(&self) -> &NativeAddress {
        &self.validator_address
    }

    /// 过期时间
    pub fn expire_time(&self) -> i64 {
        self.expire_time
    }

    /// 基本校验，按顺序检查并返回第一个失败的规则
    pub fn validate_basic(&self) -> Result<(), Error> {
        if self.sequence < 0 {
            return Err(Error::Validation("sequence should not be less than 0".to_string()));
        }
        if self.expire_time <= 0 {
            return Err(Error::Validation("expire time should be larger than 0".to_string()));
        }
        if self.contract_address.is_empty() {
            return Err(Error::Validation("contract address should not be empty".to_string()));
        }
        if self.sender_address.is_empty() {
            return Err(Error::Validation("sender address should not be empty".to_string()));
        }
        if !self.receiver_address.has_valid_len() {
            return Err(Error::Validation(format!(
                "length of receiver address should be {}",
                ADDR_LEN
            )));
        }
        if !self.validator_address.has_valid_len() {
            return Err(Error::Validation(format!(
                "length of validator address should be {}",
                ADDR_LEN
            )));
        }
        if !self.amount.is_positive() {
            return Err(Error::Validation("amount to send should be positive".to_string()));
        }
        if !self.relay_fee.is_positive() {
            return Err(Error::Validation("relay fee should be positive".to_string()));
        }
        Ok(())
    }
}

impl_bridge_msg!(TransferInMsg, TransferIn, TRANSFER_IN_MSG_TYPE, validator_address);

impl fmt::Display for TransferInMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransferIn{{{}#{}#{}#{}#{}#{}#{}#{}}}",
            self.sequence,
            self.contract_address,
            self.sender_address,
            self.receiver_address,
            self.amount,
            self.relay_fee,
            self.validator_address,
            self.expire_time
        )
    }
}

/// 跨链转出超时消息
///
/// 验证者报告转出请求在外部链上已过期，锁定的 `amount` 退回发送方。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutTimeoutMsg {
    sender_address: NativeAddress,
    sequence: i64,
    amount: Coin,
    validator_address: NativeAddress,
}

impl TransferOutTimeoutMsg {
    /// 创建转出超时消息，`validator_address` 为签名者
    pub fn new(
        sender_address: NativeAddress,
        sequence: i64,
        amount: Coin,
        validator_address: NativeAddress,
    ) -> Self {
        Self {
            sender_address,
            sequence,
            amount,
            validator_address,
        }
    }

    /// 原转出请求的发送方
    pub fn sender_address(&self) -> &NativeAddress {
        &self.sender_address
    }

    /// 原转出请求的序号
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    /// 退回数量
    pub fn amount(&self) -> &Coin {
        &self.amount
    }

    /// 验证者地址
    pub fn validator_address(&self) -> &NativeAddress {
        &self.validator_address
    }

    /// 基本校验，按顺序检查并返回第一个失败的规则
    pub fn validate_basic(&self) -> Result<(), Error> {
        if !self.sender_address.has_valid_len() {
            return Err(Error::Validation(format!(
                "length of sender address should be {}",
                ADDR_LEN
            )));
        }
        if self.sequence < 0 {
            return Err(Error::Validation("sequence should not be less than 0".to_string()));
        }
        if !self.validator_address.has_valid_len() {
            return Err(Error::Validation(format!(
                "length of validator address should be {}",
                ADDR_LEN
            )));
        }
        if !self.amount.is_positive() {
            return Err(Error::Validation("amount to send should be positive".to_string()));
        }
        Ok(())
    }
}

impl_bridge_msg!(
    TransferOutTimeoutMsg,
    TransferOutTimeout,
    TRANSFER_OUT_TIMEOUT_MSG_TYPE,
    validator_address
);

impl fmt::Display for TransferOutTimeoutMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransferOutTimeout{{{}#{}#{}#{}}}",
            self.sender_address, self.sequence, self.amount, self.validator_address
        )
    }
}

/// 跨链转出消息，从原生链账户转到外部链地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutMsg {
    from: NativeAddress,
    to: EthereumAddress,
    amount: Coin,
    expire_time: i64,
}

impl TransferOutMsg {
    /// 创建转出消息，`from` 为签名者
    pub fn new(from: NativeAddress, to: EthereumAddress, amount: Coin, expire_time: i64) -> Self {
        Self {
            from,
            to,
            amount,
            expire_time,
        }
    }

    /// 原生链发送方
    pub fn from(&self) -> &NativeAddress {
        &self.from
    }

    /// 外部链接收地址
    pub fn to(&self) -> &EthereumAddress {
        &self.to
    }

    /// 转出数量
    pub fn amount(&self) -> &Coin {
        &self.amount
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
        if self.to.is_empty() {
            return Err(Error::Validation("to address should not be empty".to_string()));
        }
        if !self.amount.is_positive() {
            return Err(Error::Validation("amount should be positive".to_string()));
        }
        if self.expire_time <= 0 {
            return Err(Error::Validation("expire time should be larger than 0".to_string()));
        }
        Ok(())
    }
}

impl_bridge_msg!(TransferOutMsg, TransferOut, TRANSFER_OUT_MSG_TYPE, from);

impl fmt::Display for TransferOutMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransferOut{{{}#{}#{}#{}}}",
            self.from, self.to, self.amount, self.expire_time
        )
    }
}
