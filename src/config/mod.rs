pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_path, validate_positive_number, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const STRATEGIES: [&str; 2] = ["frequency", "collaborative"];
pub const FORMATS: [&str; 2] = ["json", "csv"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "shop-rec"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Product recommendations from exported purchase history")
)]
pub struct CliConfig {
    /// 訂單資料路徑（json 資料集或 csv 匯出）
    #[cfg_attr(feature = "cli", arg(long, default_value = "./orders.json"))]
    pub orders: String,

    /// 商品目錄 CSV 路徑（csv 格式必填，json 資料集已內含目錄）
    #[cfg_attr(feature = "cli", arg(long))]
    pub catalog: Option<String>,

    /// 資料格式：json 或 csv
    #[cfg_attr(feature = "cli", arg(long, default_value = "json"))]
    pub format: String,

    /// 目標使用者
    #[cfg_attr(feature = "cli", arg(long))]
    pub user: String,

    /// 推薦策略：frequency 或 collaborative
    #[cfg_attr(feature = "cli", arg(long, default_value = "collaborative"))]
    pub strategy: String,

    /// 回傳的推薦數量
    #[cfg_attr(feature = "cli", arg(long, default_value = "5"))]
    pub top_n: usize,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    #[serde(default)]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log timing information"))]
    #[serde(default)]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn orders_path(&self) -> &str {
        &self.orders
    }

    fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn strategy(&self) -> &str {
        &self.strategy
    }

    fn top_n(&self) -> usize {
        self.top_n
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("orders", &self.orders)?;
        validate_one_of("format", &self.format, &FORMATS)?;
        validate_one_of("strategy", &self.strategy, &STRATEGIES)?;
        validate_positive_number("top_n", self.top_n, 1)?;

        if self.format == "csv" && self.catalog.is_none() {
            return Err(crate::utils::error::RecError::ConfigValidationError {
                field: "catalog".to_string(),
                message: "required when format is csv".to_string(),
            });
        }
        Ok(())
    }
}
