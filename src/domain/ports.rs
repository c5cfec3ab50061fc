use crate::domain::model::{Order, Product};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 購買歷史提供者。實際實作由整合服務提供（資料庫、檔案匯出等），
/// 引擎只消費唯讀快照。
pub trait PurchaseHistory: Send + Sync {
    fn orders_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Order>>> + Send;

    fn all_orders(&self) -> impl std::future::Future<Output = Result<Vec<Order>>> + Send;
}

/// 商品目錄查詢，只在輸出物化階段使用，評分過程不查目錄
pub trait Catalog: Send + Sync {
    fn product(
        &self,
        product_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Product>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn orders_path(&self) -> &str;
    fn catalog_path(&self) -> Option<&str>;
    fn format(&self) -> &str;
    fn strategy(&self) -> &str;
    fn top_n(&self) -> usize;
}

/// 推薦策略的共用介面
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, user_id: &str, top_n: usize) -> Result<Vec<Product>>;
}
