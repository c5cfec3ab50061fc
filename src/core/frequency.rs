use crate::core::engine::materialize;
use crate::domain::model::{Order, Product, ProductId};
use crate::domain::ports::{Catalog, PurchaseHistory, Recommender};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// 統計一位使用者歷史訂單中每個商品出現的次數，回傳前 top_n 名。
///
/// 每個訂單項目計一次（quantity 忽略，與 PurchaseMatrix 的彙總規則一致）。
/// 次數相同時以展開後的項目串流中先出現者優先，順序是確定的。
/// 空訂單列表回傳空結果。
pub fn most_purchased(orders: &[Order], top_n: usize) -> Vec<ProductId> {
    // (first_seen, count)，first_seen 做為平手時的次序
    let mut counts: HashMap<&str, (usize, u64)> = HashMap::new();
    let mut next_index = 0usize;

    for order in orders {
        for item in &order.items {
            let entry = counts.entry(&item.product_id).or_insert_with(|| {
                let slot = (next_index, 0);
                next_index += 1;
                slot
            });
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<(&str, usize, u64)> = counts
        .into_iter()
        .map(|(id, (first_seen, count))| (id, first_seen, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(id, _, _)| id.to_string())
        .collect()
}

/// 「最常購買」策略：取出使用者訂單、統計、物化為商品實體
pub struct MostPurchased<H, C> {
    history: H,
    catalog: C,
}

impl<H, C> MostPurchased<H, C> {
    pub fn new(history: H, catalog: C) -> Self {
        Self { history, catalog }
    }
}

#[async_trait]
impl<H: PurchaseHistory, C: Catalog> Recommender for MostPurchased<H, C> {
    async fn recommend(&self, user_id: &str, top_n: usize) -> Result<Vec<Product>> {
        let orders = self.history.orders_for_user(user_id).await?;
        tracing::debug!("Fetched {} orders for user {}", orders.len(), user_id);

        let ranked = most_purchased(&orders, top_n);
        tracing::debug!("Top products by purchase frequency: {:?}", ranked);

        materialize(&self.catalog, ranked).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::test_support::order;

    #[test]
    fn test_scenario_a_top_products_by_frequency() {
        // P1 bought three times, P2 once
        let orders = vec![
            order("o1", "u1", &[("p1", 1)]),
            order("o2", "u1", &[("p1", 1)]),
            order("o3", "u1", &[("p1", 1)]),
            order("o4", "u1", &[("p2", 1)]),
        ];

        assert_eq!(most_purchased(&orders, 2), vec!["p1", "p2"]);
    }

    #[test]
    fn test_empty_orders_yield_empty_result() {
        assert!(most_purchased(&[], 5).is_empty());
    }

    #[test]
    fn test_never_returns_more_than_top_n() {
        let orders = vec![order(
            "o1",
            "u1",
            &[("p1", 1), ("p2", 1), ("p3", 1), ("p4", 1)],
        )];

        assert_eq!(most_purchased(&orders, 2).len(), 2);
        // Fewer qualifying candidates than top_n
        assert_eq!(most_purchased(&orders, 10).len(), 4);
    }

    #[test]
    fn test_tie_break_is_first_encountered() {
        let orders = vec![
            order("o1", "u1", &[("p3", 1), ("p1", 1)]),
            order("o2", "u1", &[("p2", 1)]),
        ];

        // All counts equal; order of first appearance wins
        assert_eq!(most_purchased(&orders, 3), vec!["p3", "p1", "p2"]);
    }

    #[test]
    fn test_quantity_field_is_ignored() {
        let orders = vec![
            order("o1", "u1", &[("p1", 99)]),
            order("o2", "u1", &[("p2", 1)]),
            order("o3", "u1", &[("p2", 1)]),
        ];

        // p2 appears in two orders, p1 in one (its quantity does not matter)
        assert_eq!(most_purchased(&orders, 2), vec!["p2", "p1"]);
    }
}
