use anyhow::{bail, Context, Result};
use bridge_protocol::{BridgeMsg, ClientConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 验证并解析客户端配置文件
    ValidateConfig {
        /// 配置文件路径
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
    /// 解析跨链消息，校验并输出签名字节
    Inspect {
        /// 消息文件路径 ({"type": ..., "value": {...}})
        #[arg(short, long, value_name = "FILE")]
        msg: PathBuf,
        /// 可选的客户端配置文件，用于展示广播参数
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ValidateConfig { config } => {
            info!("正在验证配置文件: {:?}", config);
            let config = ClientConfig::load(config)?;
            println!("配置文件验证成功!");
            println!("配置内容概要:");
            println!("- 链 ID: {}", config.chain_id);
            println!("- 同步广播: {}", config.sync);
            println!("- 来源标识: {}", config.source);
            if let Some(memo) = &config.memo {
                println!("- 备注: {}", memo);
            }
            Ok(())
        }
        Commands::Inspect { msg, config } => {
            info!("正在解析消息文件: {:?}", msg);
            let raw = std::fs::read_to_string(&msg)
                .with_context(|| format!("Failed to read message file {:?}", msg))?;
            let msg = BridgeMsg::from_json(&raw)?;

            println!("- 路由: {}", msg.route());
            println!("- 类型: {}", msg.msg_type());
            println!("- 摘要: {}", msg);
            println!("- 签名者:");
            for signer in msg.signers() {
                println!("  - {}", signer);
            }

            if let Err(e) = msg.validate_basic() {
                error!("消息校验失败: {}", e);
                bail!("message {} failed validation: {}", msg.msg_type(), e);
            }
            println!("- 校验: 通过");

            let sign_bytes = msg.sign_bytes();
            println!("- 签名字节: {}", String::from_utf8_lossy(&sign_bytes));
            println!("- 签名字节 (hex): {}", hex::encode(&sign_bytes));

            if let Some(config) = config {
                let config = ClientConfig::load(config)?;
                println!("- 同步广播: {}", config.sync);
                println!("- 广播参数: {}", serde_json::to_string(&config.tx_options())?);
            }
            Ok(())
        }
    }
}
