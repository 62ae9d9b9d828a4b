use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::client::TxOptions;
use crate::Error;

// 备注最大字节数
const MAX_MEMO_LEN: usize = 128;

/// 客户端配置，作为每次广播的默认参数
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    /// 链 ID，不能为空
    pub chain_id: String,
    /// 是否同步等待交易打包
    #[serde(default)]
    pub sync: bool,
    /// 交易来源标识
    #[serde(default)]
    pub source: i64,
    /// 默认备注
    #[serde(default)]
    pub memo: Option<String>,
}

impl ClientConfig {
    /// 从 JSON 文件加载配置
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, Error> {
        let config_str = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_json(&config_str)
    }

    /// 从 JSON 字符串解析并校验配置
    pub fn from_json(config_str: &str) -> Result<Self, Error> {
        let config: ClientConfig = serde_json::from_str(config_str)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.chain_id.trim().is_empty() {
            return Err(Error::Config("Chain ID must not be empty".to_string()));
        }
        if let Some(memo) = &self.memo {
            if memo.len() > MAX_MEMO_LEN {
                return Err(Error::Config(format!(
                    "Memo must be at most {} bytes, got {}",
                    MAX_MEMO_LEN,
                    memo.len()
                )));
            }
        }
        Ok(())
    }

    /// 由配置生成广播参数
    pub fn tx_options(&self) -> TxOptions {
        let options = TxOptions::default()
            .with_chain_id(self.chain_id.clone())
            .with_source(self.source);
        match &self.memo {
            Some(memo) => options.with_memo(memo.clone()),
            None => options,
        }
    }
}
