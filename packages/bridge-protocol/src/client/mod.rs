use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::{
    address::{EthereumAddress, NativeAddress},
    msg::{BindMsg, BridgeMsg, TransferInMsg, TransferOutMsg, TransferOutTimeoutMsg, UpdateBindMsg},
    types::{BindStatus, Coin},
    Error,
};

mod options;
mod result;

pub use options::TxOptions;
pub use result::{
    BindResult, CommitResult, TransferInResult, TransferOutResult, TransferOutTimeoutResult,
    UpdateBindResult,
};

/// 密钥管理接口，提供当前签名账户的原生链地址
#[cfg_attr(test, mockall::automock)]
pub trait KeyManager: Send + Sync {
    /// 当前签名账户地址
    fn address(&self) -> NativeAddress;
}

/// 交易广播接口，负责签名、提交并返回提交结果
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// 广播消息；`sync` 为 true 时等待交易被打包
    async fn broadcast(
        &self,
        msg: BridgeMsg,
        sync: bool,
        options: TxOptions,
    ) -> Result<CommitResult, Error>;
}

/// 跨链桥客户端
///
/// 以当前密钥构造跨链消息并交给广播器。每个操作都会先执行 `validate_basic`，
/// 校验失败的消息不会到达广播器；广播器返回的错误原样透传，这里不做重试。
pub struct BridgeClient {
    key_manager: Arc<dyn KeyManager>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl BridgeClient {
    /// 创建客户端
    pub fn new(key_manager: Arc<dyn KeyManager>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            key_manager,
            broadcaster,
        }
    }

    /// 提交跨链转入证明，当前密钥作为验证者签名
    #[allow(clippy::too_many_arguments)]
    pub async fn transfer_in(
        &self,
        sequence: i64,
        contract_address: EthereumAddress,
        sender_address: EthereumAddress,
        receiver_address: NativeAddress,
        amount: Coin,
        relay_fee: Coin,
        expire_time: i64,
        sync: bool,
        options: TxOptions,
    ) -> Result<TransferInResult, Error> {
        let validator = self.key_manager.address();
        let msg = TransferInMsg::new(
            sequence,
            contract_address,
            sender_address,
            receiver_address,
            amount,
            relay_fee,
            validator,
            expire_time,
        );
        let commit = self.broadcast_msg(msg.into(), sync, options).await?;
        Ok(commit.into())
    }

    /// 将 `amount` 从当前账户转出到外部链地址
    pub async fn transfer_out(
        &self,
        to: EthereumAddress,
        amount: Coin,
        expire_time: i64,
        sync: bool,
        options: TxOptions,
    ) -> Result<TransferOutResult, Error> {
        let from = self.key_manager.address();
        let msg = TransferOutMsg::new(from, to, amount, expire_time);
        let commit = self.broadcast_msg(msg.into(), sync, options).await?;
        Ok(commit.into())
    }

    /// 报告转出超时，当前密钥作为验证者签名
    pub async fn transfer_out_timeout(
        &self,
        sender_address: NativeAddress,
        sequence: i64,
        amount: Coin,
        sync: bool,
        options: TxOptions,
    ) -> Result<TransferOutTimeoutResult, Error> {
        let validator = self.key_manager.address();
        let msg = TransferOutTimeoutMsg::new(sender_address, sequence, amount, validator);
        let commit = self.broadcast_msg(msg.into(), sync, options).await?;
        Ok(commit.into())
    }

    /// 请求将当前账户持有的代币与外部链合约绑定
    #[allow(clippy::too_many_arguments)]
    pub async fn bind(
        &self,
        symbol: &str,
        amount: i64,
        contract_address: EthereumAddress,
        contract_decimals: i8,
        expire_time: i64,
        sync: bool,
        options: TxOptions,
    ) -> Result<BindResult, Error> {
        let from = self.key_manager.address();
        let msg = BindMsg::new(
            from,
            symbol,
            amount,
            contract_address,
            contract_decimals,
            expire_time,
        );
        let commit = self.broadcast_msg(msg.into(), sync, options).await?;
        Ok(commit.into())
    }

    /// 回报绑定请求的处理结果，当前密钥作为验证者签名
    #[allow(clippy::too_many_arguments)]
    pub async fn update_bind(
        &self,
        sequence: i64,
        symbol: &str,
        amount: i64,
        contract_address: EthereumAddress,
        contract_decimals: i8,
        status: BindStatus,
        sync: bool,
        options: TxOptions,
    ) -> Result<UpdateBindResult, Error> {
        let validator = self.key_manager.address();
        let msg = UpdateBindMsg::new(
            sequence,
            validator,
            symbol,
            amount,
            contract_address,
            contract_decimals,
            status,
        );
        let commit = self.broadcast_msg(msg.into(), sync, options).await?;
        Ok(commit.into())
    }

    // 校验后广播，校验失败时不调用广播器
    async fn broadcast_msg(
        &self,
        msg: BridgeMsg,
        sync: bool,
        options: TxOptions,
    ) -> Result<CommitResult, Error> {
        let msg_type = msg.msg_type();
        if let Err(e) = msg.validate_basic() {
            warn!("Rejected {} message before broadcast: {}", msg_type, e);
            return Err(e);
        }

        debug!("Broadcasting {} (sync: {})", msg, sync);
        let commit = self.broadcaster.broadcast(msg, sync, options).await?;
        info!(
            "Broadcast {} message, hash: {}, code: {}",
            msg_type, commit.hash, commit.code
        );
        Ok(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ADDR_LEN;
    use crate::msg::test_utils::*;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn key_manager(addr: NativeAddress) -> Arc<MockKeyManager> {
        let mut key_manager = MockKeyManager::new();
        key_manager.expect_address().return_const(addr);
        Arc::new(key_manager)
    }

    fn committed(hash: &str) -> CommitResult {
        CommitResult {
            ok: true,
            hash: hash.to_string(),
            ..Default::default()
        }
    }

    fn never_broadcasts() -> Arc<MockBroadcaster> {
        let mut broadcaster = MockBroadcaster::new();
        broadcaster.expect_broadcast().never();
        Arc::new(broadcaster)
    }

    // 转入测试
    #[tokio::test]
    async fn test_transfer_in_uses_key_as_validator() {
        let expected = BridgeMsg::from(TransferInMsg::new(
            9,
            eth(1),
            eth(2),
            native(3),
            coin(100),
            coin(1),
            native(4),
            1_000,
        ));
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .with(eq(expected), eq(true), eq(TxOptions::default()))
            .times(1)
            .returning(|_, _, _| Ok(committed("AA")));

        let client = BridgeClient::new(key_manager(native(4)), Arc::new(broadcaster));
        let result = assert_ok!(
            client
                .transfer_in(
                    9,
                    eth(1),
                    eth(2),
                    native(3),
                    coin(100),
                    coin(1),
                    1_000,
                    true,
                    TxOptions::default()
                )
                .await
        );
        assert_eq!(result.hash, "AA");
        assert!(result.ok);
    }

    // 转出测试
    #[tokio::test]
    async fn test_transfer_out_forwards_options_and_sync_flag() {
        let options = TxOptions::default().with_memo("out").with_source(1);
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .withf(|msg, sync, options| {
                matches!(msg, BridgeMsg::TransferOut(m)
                    if m.from() == &native(5) && m.to() == &eth(2))
                    && !*sync
                    && options.memo.as_deref() == Some("out")
            })
            .times(1)
            .returning(|_, _, _| Ok(committed("BB")));

        let client = BridgeClient::new(key_manager(native(5)), Arc::new(broadcaster));
        let result = assert_ok!(client.transfer_out(eth(2), coin(10), 100, false, options).await);
        assert_eq!(result.commit, committed("BB"));
    }

    #[tokio::test]
    async fn test_transfer_out_to_empty_address_is_not_broadcast() {
        let client = BridgeClient::new(key_manager(native(5)), never_broadcasts());
        let err = assert_err!(
            client
                .transfer_out(EthereumAddress::zero(), coin(10), 100, true, TxOptions::default())
                .await
        );
        assert!(matches!(err, Error::Validation(ref r) if r == "to address should not be empty"));
    }

    // 转出超时测试
    #[tokio::test]
    async fn test_transfer_out_timeout_rejects_negative_sequence() {
        let client = BridgeClient::new(key_manager(native(4)), never_broadcasts());
        let err = assert_err!(
            client
                .transfer_out_timeout(native(3), -1, coin(10), true, TxOptions::default())
                .await
        );
        assert!(matches!(err, Error::Validation(ref r) if r.contains("sequence")));
    }

    #[tokio::test]
    async fn test_transfer_out_timeout_signed_by_validator() {
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .withf(|msg, _, _| {
                msg.signers() == vec![native(4)] && msg.msg_type() == "crossTransferOutTimeout"
            })
            .times(1)
            .returning(|_, _, _| Ok(committed("CC")));

        let client = BridgeClient::new(key_manager(native(4)), Arc::new(broadcaster));
        let result = assert_ok!(
            client
                .transfer_out_timeout(native(3), 2, coin(10), true, TxOptions::default())
                .await
        );
        assert_eq!(result.hash, "CC");
    }

    // 绑定测试
    #[tokio::test]
    async fn test_bind_signed_by_key() {
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .withf(|msg, _, _| {
                matches!(msg, BridgeMsg::Bind(m)
                    if m.from() == &native(6) && m.symbol() == "ETH.USDT")
            })
            .times(1)
            .returning(|_, _, _| Ok(committed("DD")));

        let client = BridgeClient::new(key_manager(native(6)), Arc::new(broadcaster));
        let result = assert_ok!(
            client
                .bind("ETH.USDT", 100, eth(1), 18, 9_999_999_999, true, TxOptions::default())
                .await
        );
        assert_eq!(result.hash, "DD");
    }

    #[tokio::test]
    async fn test_bind_with_malformed_key_address_is_rejected() {
        let client = BridgeClient::new(
            key_manager(NativeAddress::new(vec![1; ADDR_LEN - 2])),
            never_broadcasts(),
        );
        let err = assert_err!(
            client
                .bind("ETH.USDT", 100, eth(1), 18, 9_999_999_999, true, TxOptions::default())
                .await
        );
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_bind_carries_status() {
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .withf(|msg, _, _| {
                matches!(msg, BridgeMsg::UpdateBind(m)
                    if m.status() == BindStatus::Timeout && m.validator_address() == &native(4))
            })
            .times(1)
            .returning(|_, _, _| Ok(committed("EE")));

        let client = BridgeClient::new(key_manager(native(4)), Arc::new(broadcaster));
        let options = TxOptions::default();
        let result = assert_ok!(
            client
                .update_bind(1, "ETH.USDT", 100, eth(1), 18, BindStatus::Timeout, false, options)
                .await
        );
        assert_eq!(result.hash, "EE");
    }

    #[tokio::test]
    async fn test_update_bind_negative_decimals_rejected() {
        let client = BridgeClient::new(key_manager(native(4)), never_broadcasts());
        let options = TxOptions::default();
        let err = assert_err!(
            client
                .update_bind(1, "ETH.USDT", 100, eth(1), -1, BindStatus::Success, true, options)
                .await
        );
        assert!(matches!(err, Error::Validation(ref r) if r.contains("decimal")));
    }

    // 广播错误测试
    #[tokio::test]
    async fn test_broadcaster_error_is_passed_through() {
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .times(1)
            .returning(|_, _, _| Err(Error::Broadcast("node unavailable".to_string())));

        let client = BridgeClient::new(key_manager(native(5)), Arc::new(broadcaster));
        let err = assert_err!(
            client
                .transfer_out(eth(2), coin(10), 100, true, TxOptions::default())
                .await
        );
        assert!(matches!(err, Error::Broadcast(ref r) if r == "node unavailable"));
    }

    #[tokio::test]
    async fn test_non_positive_amounts_never_broadcast() {
        let client = BridgeClient::new(key_manager(native(4)), never_broadcasts());
        let opts = TxOptions::default;

        assert_err!(
            client
                .transfer_in(1, eth(1), eth(2), native(3), coin(0), coin(1), 10, true, opts())
                .await
        );
        assert_err!(
            client
                .transfer_in(1, eth(1), eth(2), native(3), coin(5), coin(-1), 10, true, opts())
                .await
        );
        assert_err!(client.transfer_out(eth(2), coin(-3), 10, true, opts()).await);
        assert_err!(client.transfer_out_timeout(native(3), 1, coin(0), true, opts()).await);
        assert_err!(client.bind("ETH.USDT", 0, eth(1), 18, 10, true, opts()).await);
        assert_err!(
            client
                .update_bind(1, "ETH.USDT", -7, eth(1), 18, BindStatus::Success, true, opts())
                .await
        );
    }
}
