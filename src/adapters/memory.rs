use crate::domain::model::{Order, Product, ProductId};
use crate::domain::ports::{Catalog, PurchaseHistory};
use crate::utils::error::Result;
use std::collections::HashMap;

/// 記憶體資料存放區，同時實作兩個資料埠。
///
/// CLI 用它承載從檔案載入的資料集；測試用它當替身。
/// 載入完成後唯讀，可以 clone 給多個策略共用。
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    orders: Vec<Order>,
    products: HashMap<ProductId, Product>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl PurchaseHistory for InMemoryStore {
    async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.clone())
    }
}

impl Catalog for InMemoryStore {
    async fn product(&self, product_id: &str) -> Result<Option<Product>> {
        Ok(self.products.get(product_id).cloned())
    }
}
