use clap::Parser;
use delivery_core::{Config, DeliveryState, init_logger_with_file};

/// 商品页配送判定 (运维检查)
#[derive(Debug, Parser)]
#[command(name = "delivery-core", version, about = "Resolve the delivery decision for a product")]
struct Args {
    /// Vendor id
    vendor_id: i64,
    /// Product id
    product_id: i64,
    /// Customer postal code (CEP), any punctuation
    postal_code: Option<String>,
    /// Print the vendor zone summary instead of a decision
    #[arg(long)]
    describe: bool,
    /// Override DATABASE_PATH
    #[arg(long, env = "DATABASE_PATH")]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let args = Args::parse();

    // 2. 加载配置
    let mut config = Config::from_env();
    if let Some(path) = args.database {
        config.database_path = path;
    }
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    tracing::debug!(database = %config.database_path, environment = %config.environment, "Configuration loaded");

    // 3. 初始化状态
    let state = DeliveryState::initialize(&config).await?;

    // 4. 判定并输出 JSON
    let output = if args.describe {
        serde_json::to_string_pretty(&state.service.describe_zones(args.vendor_id).await)?
    } else {
        let decision = state
            .service
            .decide(args.vendor_id, args.product_id, args.postal_code.as_deref())
            .await;
        serde_json::to_string_pretty(&decision)?
    };
    println!("{output}");

    Ok(())
}
