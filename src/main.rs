use clap::Parser;
use shop_rec::adapters::file::load_store;
use shop_rec::domain::model::Product;
use shop_rec::domain::ports::{ConfigProvider, Recommender};
use shop_rec::utils::{logger, validation::Validate};
use shop_rec::{CliConfig, MostPurchased, RecommendEngine, SlopeOne};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting shop-rec CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
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
    let result = match config.strategy() {
        "frequency" => {
            let recommender = MostPurchased::new(store.clone(), store);
            run_engine(recommender, &config).await
        }
        _ => {
            let recommender = SlopeOne::new(store.clone(), store);
            run_engine(recommender, &config).await
        }
    };

    match result {
        Ok(products) => {
            tracing::info!("✅ Recommendation completed successfully!");
            print_recommendations(&config.user, &products);
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
    config: &CliConfig,
) -> shop_rec::Result<Vec<Product>> {
    let engine = RecommendEngine::new_with_monitoring(recommender, config.monitor);
    engine.run(&config.user, config.top_n).await
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
