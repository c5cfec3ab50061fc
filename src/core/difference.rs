use crate::domain::model::{ProductId, PurchaseMatrix};
use std::collections::BTreeMap;

/// 一組有序商品對 (p1, p2) 的統計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceEntry {
    /// mean(count_p1 - count_p2)，可為負
    pub avg_diff: f64,
    /// 貢獻到 avg_diff 的使用者觀測數
    pub freq: u64,
}

/// product × product 平均購買次數差模型（Slope-One 式）。
///
/// 每次呼叫 `build` 都回傳全新的值，呼叫者獨佔所有權；
/// 模型本身不做增量更新。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DifferenceModel {
    entries: BTreeMap<ProductId, BTreeMap<ProductId, DifferenceEntry>>,
}

impl DifferenceModel {
    /// 從購買矩陣建模。
    ///
    /// 對每位使用者的購買向量取其商品的笛卡兒積（含對角線 p1 == p2）
    /// 累加 count 差與觀測數，最後以觀測數正規化成平均差。
    /// 只有在同一位使用者歷史中共同出現過的商品對才會有條目。
    ///
    /// 複雜度 O(U · P_max²)，P_max 為單一使用者購買的相異商品數上限。
    /// 這是演算法本身的規模限制：呼叫者應限制輸入大小，而不是期待
    /// 這裡偷偷最佳化。
    pub fn build(matrix: &PurchaseMatrix) -> Self {
        let mut entries: BTreeMap<ProductId, BTreeMap<ProductId, DifferenceEntry>> =
            BTreeMap::new();

        for (_user, vector) in matrix.iter() {
            for (p1, count1) in vector {
                let row = entries.entry(p1.clone()).or_default();
                for (p2, count2) in vector {
                    let entry = row
                        .entry(p2.clone())
                        .or_insert(DifferenceEntry { avg_diff: 0.0, freq: 0 });
                    entry.avg_diff += count1 - count2;
                    entry.freq += 1;
                }
            }
        }

        // 正規化：累計和 → 平均差。每個條目的 freq 至少為 1。
        for row in entries.values_mut() {
            for entry in row.values_mut() {
                entry.avg_diff /= entry.freq as f64;
            }
        }

        Self { entries }
    }

    pub fn entry(&self, p1: &str, p2: &str) -> Option<DifferenceEntry> {
        self.entries.get(p1).and_then(|row| row.get(p2)).copied()
    }

    /// 模型認得的所有商品（依 id 排序）
    pub fn products(&self) -> impl Iterator<Item = &ProductId> {
        self.entries.keys()
    }

    pub fn pair_count(&self) -> usize {
        self.entries.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(users: &[(&str, &[(&str, f64)])]) -> PurchaseMatrix {
        let mut matrix = PurchaseMatrix::new();
        for (user, purchases) in users {
            for (product, count) in *purchases {
                matrix.set_count(user, product, *count).unwrap();
            }
        }
        matrix
    }

    #[test]
    fn test_scenario_b_average_differences() {
        // U1: {P1: 2, P2: 1}, U2: {P1: 1, P2: 3}
        let matrix = matrix(&[
            ("u1", &[("p1", 2.0), ("p2", 1.0)]),
            ("u2", &[("p1", 1.0), ("p2", 3.0)]),
        ]);
        let model = DifferenceModel::build(&matrix);

        let entry = model.entry("p1", "p2").unwrap();
        assert_eq!(entry.avg_diff, -0.5); // ((2-1)+(1-3))/2
        assert_eq!(entry.freq, 2);

        let reverse = model.entry("p2", "p1").unwrap();
        assert_eq!(reverse.avg_diff, 0.5);
        assert_eq!(reverse.freq, 2);
    }

    #[test]
    fn test_antisymmetry_and_symmetric_freq() {
        let matrix = matrix(&[
            ("u1", &[("p1", 5.0), ("p2", 2.0), ("p3", 1.0)]),
            ("u2", &[("p1", 1.0), ("p3", 4.0)]),
            ("u3", &[("p2", 3.0), ("p3", 3.0)]),
        ]);
        let model = DifferenceModel::build(&matrix);

        let products: Vec<_> = model.products().cloned().collect();
        for a in &products {
            for b in &products {
                let (Some(ab), Some(ba)) = (model.entry(a, b), model.entry(b, a)) else {
                    continue;
                };
                assert_eq!(ab.freq, ba.freq, "freq must be symmetric for ({a}, {b})");
                assert!(
                    (ab.avg_diff + ba.avg_diff).abs() < 1e-12,
                    "avg_diff must be antisymmetric for ({a}, {b})"
                );
            }
        }
    }

    #[test]
    fn test_diagonal_entries_are_zero() {
        let matrix = matrix(&[("u1", &[("p1", 3.0), ("p2", 1.0)])]);
        let model = DifferenceModel::build(&matrix);

        let entry = model.entry("p1", "p1").unwrap();
        assert_eq!(entry.avg_diff, 0.0);
        assert_eq!(entry.freq, 1);
    }

    #[test]
    fn test_no_entry_without_cooccurrence() {
        // p1 and p2 never appear in the same user's history
        let matrix = matrix(&[("u1", &[("p1", 2.0)]), ("u2", &[("p2", 1.0)])]);
        let model = DifferenceModel::build(&matrix);

        assert!(model.entry("p1", "p2").is_none());
        assert!(model.entry("p2", "p1").is_none());
        assert!(model.entry("p1", "p1").is_some());
    }

    #[test]
    fn test_identical_matrices_build_identical_models() {
        // Same matrix value assembled in different insertion orders
        let a = matrix(&[
            ("u1", &[("p1", 2.0), ("p2", 1.0)]),
            ("u2", &[("p2", 3.0), ("p1", 1.0)]),
        ]);
        let b = matrix(&[
            ("u2", &[("p1", 1.0), ("p2", 3.0)]),
            ("u1", &[("p2", 1.0), ("p1", 2.0)]),
        ]);

        assert_eq!(a, b);
        assert_eq!(DifferenceModel::build(&a), DifferenceModel::build(&b));
    }

    #[test]
    fn test_empty_matrix_builds_empty_model() {
        let model = DifferenceModel::build(&PurchaseMatrix::new());
        assert!(model.is_empty());
        assert_eq!(model.pair_count(), 0);
    }
}
