use crate::utils::error::{RecError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type UserId = String;
pub type ProductId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// 價格（最小貨幣單位）
    pub price: i64,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Fulfilled,
    Rejected,
}

/// 一筆已成立的訂單。訂單項目在建立時已從購物車展開複製，
/// 不再引用任何可變的購物車實體。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub total: i64,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// user → product → purchase count 矩陣。
///
/// BTreeMap 保證迭代順序固定：相同的矩陣值在任何一次建模中
/// 都以相同順序累加，浮點結果可完全重現。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseMatrix {
    users: BTreeMap<UserId, BTreeMap<ProductId, f64>>,
}

impl PurchaseMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從訂單歷史彙總購買矩陣。
    ///
    /// 每個訂單項目計一個單位，項目本身的 quantity 欄位刻意忽略：
    /// 這裡回答的是「使用者加入過這個商品幾次」而不是「買了幾件」。
    pub fn from_orders<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut matrix = Self::new();
        for order in orders {
            for item in &order.items {
                matrix.add_unit(&order.user_id, &item.product_id);
            }
        }
        matrix
    }

    /// 記一個購買單位
    pub fn add_unit(&mut self, user: &str, product: &str) {
        *self
            .users
            .entry(user.to_string())
            .or_default()
            .entry(product.to_string())
            .or_insert(0.0) += 1.0;
    }

    /// 直接設定購買次數。負數與 NaN 在邊界拒絕。
    pub fn set_count(&mut self, user: &str, product: &str, count: f64) -> Result<()> {
        if !count.is_finite() || count < 0.0 {
            return Err(RecError::InvalidArgument {
                message: format!(
                    "purchase count for user '{}' product '{}' must be a non-negative number, got {}",
                    user, product, count
                ),
            });
        }
        self.users
            .entry(user.to_string())
            .or_default()
            .insert(product.to_string(), count);
        Ok(())
    }

    /// 確保使用者存在（空向量），供沒有任何購買紀錄的使用者使用
    pub fn ensure_user(&mut self, user: &str) {
        self.users.entry(user.to_string()).or_default();
    }

    pub fn user_vector(&self, user: &str) -> Option<&BTreeMap<ProductId, f64>> {
        self.users.get(user)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &BTreeMap<ProductId, f64>)> {
        self.users.iter()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// 排序輸出用的評分結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product_id: ProductId,
    pub score: f64,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) fn order(id: &str, user: &str, items: &[(&str, u32)]) -> Order {
        Order {
            id: id.to_string(),
            user_id: user.to_string(),
            items: items
                .iter()
                .map(|(p, q)| CartItem {
                    product_id: p.to_string(),
                    quantity: *q,
                })
                .collect(),
            status: OrderStatus::Fulfilled,
            total: 0,
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    pub(crate) fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: 1000,
            category: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::order;
    use super::*;

    #[test]
    fn test_from_orders_counts_one_unit_per_cart_item() {
        // Quantity 10 still counts as a single unit
        let orders = vec![
            order("o1", "u1", &[("p1", 10), ("p2", 1)]),
            order("o2", "u1", &[("p1", 1)]),
        ];
        let matrix = PurchaseMatrix::from_orders(&orders);

        let vector = matrix.user_vector("u1").unwrap();
        assert_eq!(vector.get("p1"), Some(&2.0));
        assert_eq!(vector.get("p2"), Some(&1.0));
    }

    #[test]
    fn test_from_orders_groups_by_user() {
        let orders = vec![
            order("o1", "u1", &[("p1", 1)]),
            order("o2", "u2", &[("p1", 1), ("p2", 1)]),
        ];
        let matrix = PurchaseMatrix::from_orders(&orders);

        assert_eq!(matrix.user_count(), 2);
        assert_eq!(matrix.user_vector("u1").unwrap().len(), 1);
        assert_eq!(matrix.user_vector("u2").unwrap().len(), 2);
    }

    #[test]
    fn test_set_count_rejects_negative_and_nan() {
        let mut matrix = PurchaseMatrix::new();
        assert!(matrix.set_count("u1", "p1", -1.0).is_err());
        assert!(matrix.set_count("u1", "p1", f64::NAN).is_err());
        assert!(matrix.set_count("u1", "p1", 3.0).is_ok());
        assert_eq!(matrix.user_vector("u1").unwrap().get("p1"), Some(&3.0));
    }

    #[test]
    fn test_ensure_user_creates_empty_vector() {
        let mut matrix = PurchaseMatrix::new();
        matrix.ensure_user("u1");
        assert!(matrix.user_vector("u1").unwrap().is_empty());
    }
}
