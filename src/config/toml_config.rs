use crate::config::{FORMATS, STRATEGIES};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RecError, Result};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub engine: EngineConfig,
    pub data: DataConfig,
    pub recommend: RecommendConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// json 或 csv
    pub format: String,
    pub orders_path: String,
    pub catalog_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// frequency 或 collaborative
    pub strategy: String,
    pub top_n: Option<usize>,
    /// 預設目標使用者，命令列可覆蓋
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RecError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RecError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static env-var pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("data.orders_path", &self.data.orders_path)?;
        validate_one_of("data.format", &self.data.format, &FORMATS)?;
        validate_one_of("recommend.strategy", &self.recommend.strategy, &STRATEGIES)?;
        validate_positive_number("recommend.top_n", self.top_n(), 1)?;

        if self.data.format == "csv" && self.data.catalog_path.is_none() {
            return Err(RecError::ConfigValidationError {
                field: "data.catalog_path".to_string(),
                message: "required when data.format is csv".to_string(),
            });
        }
        Ok(())
    }

    /// 取得推薦數量，預設 5
    pub fn top_n(&self) -> usize {
        self.recommend.top_n.unwrap_or(5)
    }

    /// 取得預設目標使用者
    pub fn default_user(&self) -> Option<&str> {
        self.recommend.user.as_deref()
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn orders_path(&self) -> &str {
        &self.data.orders_path
    }

    fn catalog_path(&self) -> Option<&str> {
        self.data.catalog_path.as_deref()
    }

    fn format(&self) -> &str {
        &self.data.format
    }

    fn strategy(&self) -> &str {
        &self.recommend.strategy
    }

    fn top_n(&self) -> usize {
        self.top_n()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
