use serde::{Deserialize, Serialize};

/// 单笔交易的广播参数，原样转交广播器
///
/// 未设置的字段由广播器自行决定，例如从节点查询账户编号和序号。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOptions {
    /// 交易备注
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// 交易来源标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<i64>,

    /// 账户编号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<i64>,

    /// 账户序号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,

    /// 链 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
}

impl TxOptions {
    /// 设置备注
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// 设置来源标识
    pub fn with_source(mut self, source: i64) -> Self {
        self.source = Some(source);
        self
    }

    /// 设置链 ID
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// 同时设置账户编号和序号，两者需成对提供
    pub fn with_account_number_and_sequence(mut self, account_number: i64, sequence: i64) -> Self {
        self.account_number = Some(account_number);
        self.sequence = Some(sequence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 构造器测试
    #[test]
    fn test_builders_set_fields() {
        let options = TxOptions::default()
            .with_memo("bridge")
            .with_source(2)
            .with_chain_id("Binance-Chain-Tigris")
            .with_account_number_and_sequence(12, 34);

        assert_eq!(options.memo.as_deref(), Some("bridge"));
        assert_eq!(options.source, Some(2));
        assert_eq!(options.chain_id.as_deref(), Some("Binance-Chain-Tigris"));
        assert_eq!(options.account_number, Some(12));
        assert_eq!(options.sequence, Some(34));
    }

    // 序列化测试
    #[test]
    fn test_unset_fields_are_omitted() {
        let json = serde_json::to_string(&TxOptions::default().with_source(1)).unwrap();
        assert_eq!(json, r#"{"source":1}"#);
    }
}
