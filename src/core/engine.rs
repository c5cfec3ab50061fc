use crate::domain::model::{Product, ProductId};
use crate::domain::ports::{Catalog, Recommender};
use crate::utils::error::Result;
use std::time::Instant;

/// 把排序後的商品 id 透過目錄物化成商品實體。
///
/// 目錄查不到的商品記 warning 後丟棄，結果列表可能因此變短；
/// 截斷發生在物化之前，與參考行為一致。
pub(crate) async fn materialize<C: Catalog>(
    catalog: &C,
    ids: Vec<ProductId>,
) -> Result<Vec<Product>> {
    let mut products = Vec::with_capacity(ids.len());
    for id in ids {
        match catalog.product(&id).await? {
            Some(product) => products.push(product),
            None => {
                tracing::warn!("Product {} missing from catalog, dropped from results", id);
            }
        }
    }
    Ok(products)
}

pub struct RecommendEngine<R: Recommender> {
    recommender: R,
    monitor: bool,
}

impl<R: Recommender> RecommendEngine<R> {
    pub fn new(recommender: R) -> Self {
        Self {
            recommender,
            monitor: false,
        }
    }

    pub fn new_with_monitoring(recommender: R, monitor: bool) -> Self {
        Self {
            recommender,
            monitor,
        }
    }

    pub async fn run(&self, user_id: &str, top_n: usize) -> Result<Vec<Product>> {
        tracing::info!("Computing recommendations for user {}", user_id);
        let started = Instant::now();

        let products = self.recommender.recommend(user_id, top_n).await?;

        tracing::info!("Produced {} recommendations", products.len());
        if self.monitor {
            tracing::info!("Recommendation took {:?}", started.elapsed());
        }

        Ok(products)
    }
}
