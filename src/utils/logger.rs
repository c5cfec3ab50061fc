use tracing_subscriber::EnvFilter;

/// 初始化 CLI 日誌。RUST_LOG 可覆蓋預設等級；
/// SHOP_REC_LOG_FORMAT=json 時輸出 JSON 格式（服務部署用）。
pub fn init_cli_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let json_format = std::env::var("SHOP_REC_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // 重複初始化（例如測試）時忽略錯誤
    if json_format {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
