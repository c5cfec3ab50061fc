use clap::Parser;
use shop_rec::adapters::file::load_store;
use shop_rec::config::toml_config::TomlConfig;
use shop_rec::domain::model::Product;
use shop_rec::domain::ports::{ConfigProvider, Recommender};
use shop_rec::utils::{logger, validation::Validate};
use shop_rec::{MostPurchased, RecommendEngine, SlopeOne};

#[derive(Parser)]
#[command(name = "toml-rec")]
#[command(about = "Recommendation tool with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "rec-config.toml")]
    config: String,

    /// Target user (overrides recommend.user from config)
    #[arg(short, long)]
    user: Option<String>,

    /// Override top-N from config
    #[arg(long)]
    top_n: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be computed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based recommendation tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(top_n) = args.top_n {
        config.recommend.top_n = Some(top_n);
        tracing::info!("🔧 top_n overridden to: {}", top_n);
    }
    if let Some(user) = &args.user {
        config.recommend.user = Some(user.clone());
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let Some(user) = config.default_user().map(str::to_string) else {
        eprintln!("❌ No target user: set recommend.user in the config or pass --user");
        std::process::exit(1);
    };

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &user, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual computation will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 Timing monitor enabled");
    }

    // 載入資料集
    let store = match load_store(&config) {
        Ok(store) => store,
        Err(e) => {
            report_failure(&e);
            std::process::exit(exit_code(&e));
        }
    };
    tracing::info!(
        "📦 Dataset loaded: {} products, {} orders",
        store.product_count(),
        store.order_count()
    );

    // 依策略建引擎並執行
    let top_n = config.top_n();
    let result = match config.strategy() {
        "frequency" => {
            run_engine(
                MostPurchased::new(store.clone(), store),
                monitor_enabled,
                &user,
                top_n,
            )
            .await
        }
        _ => {
            run_engine(
                SlopeOne::new(store.clone(), store),
                monitor_enabled,
                &user,
                top_n,
            )
            .await
        }
    };

    match result {
        Ok(products) => {
            tracing::info!("✅ Recommendation completed successfully!");
            print_recommendations(&user, &products);
        }
        Err(e) => {
            report_failure(&e);
            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

async fn run_engine<R: Recommender>(
    recommender: R,
    monitor: bool,
    user: &str,
    top_n: usize,
) -> shop_rec::Result<Vec<Product>> {
    let engine = RecommendEngine::new_with_monitoring(recommender, monitor);
    engine.run(user, top_n).await
}

fn display_config_summary(config: &TomlConfig, user: &str, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Engine: {} v{}",
        config.engine.name, config.engine.version
    );
    println!("  Data: {} ({})", config.data.orders_path, config.data.format);
    if let Some(catalog) = config.catalog_path() {
        println!("  Catalog: {}", catalog);
    }
    println!("  Strategy: {}", config.strategy());
    println!("  Top N: {}", config.top_n());
    println!("  User: {}", user);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Data Source Analysis:");
    println!("  Orders: {}", config.data.orders_path);
    match config.data.format.as_str() {
        "csv" => {
            println!(
                "  Catalog: {}",
                config.catalog_path().unwrap_or("(missing)")
            );
            println!("  Format: CSV export (one row per order item)");
        }
        _ => println!("  Format: JSON dataset (catalog embedded)"),
    }

    println!();
    println!("⚙️ Strategy:");
    match config.strategy() {
        "frequency" => {
            println!("  🔁 Most-purchased: counts product occurrences in the user's own orders");
        }
        _ => {
            println!("  🤝 Collaborative: builds an item-item average-difference model");
            println!("  📊 Cost grows with users × (products per user)² — cap input size for bounded latency");
        }
    }
    println!("  Top N: {}", config.top_n());

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}

fn print_recommendations(user: &str, products: &[Product]) {
    if products.is_empty() {
        println!("No recommendations available for user {}", user);
        return;
    }

    println!("✅ Top {} recommendations for user {}:", products.len(), user);
    for (rank, product) in products.iter().enumerate() {
        println!("  {}. {} ({})", rank + 1, product.name, product.id);
    }
}

fn report_failure(e: &shop_rec::RecError) {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &shop_rec::RecError) -> i32 {
    match e.severity() {
        shop_rec::utils::error::ErrorSeverity::Low => 0,
        shop_rec::utils::error::ErrorSeverity::Medium => 2,
        shop_rec::utils::error::ErrorSeverity::High => 1,
        shop_rec::utils::error::ErrorSeverity::Critical => 3,
    }
}
