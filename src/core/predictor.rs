use crate::core::difference::DifferenceModel;
use crate::core::engine::materialize;
use crate::domain::model::{Product, ProductId, PurchaseMatrix, RankedProduct};
use crate::domain::ports::{Catalog, PurchaseHistory, Recommender};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 對目標使用者尚未購買的每個商品預測分數，回傳前 top_n 名。
///
/// 分數 = Σ (count_q + avg_diff[q][p]) · freq[q][p] / Σ freq[q][p]，
/// q 跑遍使用者已購買且模型有 (q, p) 條目的商品。
/// 完全沒有共同購買證據（權重和為 0）的候選商品直接略過。
/// 分數相同時以商品 id 遞增排序，整體次序是全序且確定的。
/// 購買向量為空時自然得到空結果。
pub fn predict(
    model: &DifferenceModel,
    purchases: &BTreeMap<ProductId, f64>,
    top_n: usize,
) -> Vec<RankedProduct> {
    let mut candidates: Vec<RankedProduct> = Vec::new();

    for product_id in model.products() {
        // 已購買的商品不做預測
        if purchases.contains_key(product_id) {
            continue;
        }

        let mut total_score = 0.0;
        let mut total_weight = 0u64;

        for (purchased_id, purchase_count) in purchases {
            if let Some(entry) = model.entry(purchased_id, product_id) {
                total_score += (purchase_count + entry.avg_diff) * entry.freq as f64;
                total_weight += entry.freq;
            }
        }

        if total_weight > 0 {
            candidates.push(RankedProduct {
                product_id: product_id.clone(),
                score: total_score / total_weight as f64,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    candidates.truncate(top_n);
    candidates
}

/// 協同過濾策略：從全體訂單建購買矩陣與差異模型，再對目標使用者預測
pub struct SlopeOne<H, C> {
    history: H,
    catalog: C,
}

impl<H, C> SlopeOne<H, C> {
    pub fn new(history: H, catalog: C) -> Self {
        Self { history, catalog }
    }
}

#[async_trait]
impl<H: PurchaseHistory, C: Catalog> Recommender for SlopeOne<H, C> {
    async fn recommend(&self, user_id: &str, top_n: usize) -> Result<Vec<Product>> {
        let orders = self.history.all_orders().await?;
        let matrix = PurchaseMatrix::from_orders(&orders);
        tracing::debug!(
            "Built purchase matrix for {} users from {} orders",
            matrix.user_count(),
            orders.len()
        );

        let model = DifferenceModel::build(&matrix);
        tracing::debug!("Difference model holds {} product pairs", model.pair_count());

        // 矩陣裡沒有這位使用者時視為空向量，結果為空而不是錯誤
        let empty = BTreeMap::new();
        let purchases = matrix.user_vector(user_id).unwrap_or(&empty);

        let ranked = predict(&model, purchases, top_n);
        tracing::debug!("Predicted {} candidates for user {}", ranked.len(), user_id);

        let ids = ranked.into_iter().map(|r| r.product_id).collect();
        materialize(&self.catalog, ids).await
    }
}
