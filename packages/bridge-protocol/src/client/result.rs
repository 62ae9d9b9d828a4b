use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// 交易提交后广播器返回的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitResult {
    /// 交易是否被接受
    pub ok: bool,
    /// 节点返回的日志
    pub log: String,
    /// 交易哈希
    pub hash: String,
    /// 结果码，0 表示成功
    pub code: i32,
    /// 附加数据
    pub data: String,
}

// 为每个客户端操作生成结果类型，JSON 形状与 CommitResult 一致

macro_rules! commit_result {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
            pub struct $name {
                #[serde(flatten)]
                pub commit: CommitResult,
            }

            impl From<CommitResult> for $name {
                fn from(commit: CommitResult) -> Self {
                    Self { commit }
                }
            }

            impl Deref for $name {
                type Target = CommitResult;

                fn deref(&self) -> &CommitResult {
                    &self.commit
                }
            }
        )*
    };
}

commit_result!(
    /// [`BridgeClient::transfer_in`](super::BridgeClient::transfer_in) 的结果
    TransferInResult,
    /// [`BridgeClient::transfer_out`](super::BridgeClient::transfer_out) 的结果
    TransferOutResult,
    /// 转出超时操作的结果
    TransferOutTimeoutResult,
    /// [`BridgeClient::bind`](super::BridgeClient::bind) 的结果
    BindResult,
    /// [`BridgeClient::update_bind`](super::BridgeClient::update_bind) 的结果
    UpdateBindResult,
);
