use crate::adapters::memory::InMemoryStore;
use crate::domain::model::{CartItem, Order, OrderStatus, Product};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RecError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// JSON 資料集：商品目錄與訂單歷史放在同一個檔案
#[derive(Debug, Deserialize)]
struct JsonDataset {
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// 訂單 CSV 匯出的一列：一列一個訂單項目
#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    user_id: String,
    product_id: String,
    quantity: u32,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

/// 商品目錄 CSV 的一列
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    name: String,
    price: i64,
    category: Option<String>,
}

/// 載入 JSON 資料集檔案
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<InMemoryStore> {
    let content = std::fs::read_to_string(path)?;
    let dataset: JsonDataset = serde_json::from_str(&content)?;

    let mut store = InMemoryStore::new();
    for product in dataset.products {
        store.insert_product(product);
    }
    for order in dataset.orders {
        store.push_order(order);
    }

    tracing::debug!(
        "Loaded {} products and {} orders from JSON dataset",
        store.product_count(),
        store.order_count()
    );
    Ok(store)
}

/// 載入 CSV 匯出：訂單檔逐列為訂單項目，依 order_id 聚合；
/// 目錄檔提供商品與價格，訂單金額由項目數量乘單價求和
pub fn load_csv<P: AsRef<Path>>(orders_path: P, catalog_path: P) -> Result<InMemoryStore> {
    let mut store = InMemoryStore::new();
    let mut prices: HashMap<String, i64> = HashMap::new();

    let mut catalog_reader = csv::Reader::from_path(catalog_path)?;
    for row in catalog_reader.deserialize() {
        let row: ProductRow = row?;
        prices.insert(row.id.clone(), row.price);
        store.insert_product(Product {
            id: row.id,
            name: row.name,
            price: row.price,
            category: row.category,
        });
    }

    // 依出現順序聚合訂單列
    let mut orders: Vec<Order> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    let mut orders_reader = csv::Reader::from_path(orders_path)?;
    for row in orders_reader.deserialize() {
        let row: OrderRow = row?;
        let item = CartItem {
            product_id: row.product_id.clone(),
            quantity: row.quantity,
        };
        let line_total =
            prices.get(&row.product_id).copied().unwrap_or(0) * i64::from(row.quantity);

        match index_by_id.get(&row.order_id) {
            Some(&index) => {
                let order = &mut orders[index];
                order.items.push(item);
                order.total += line_total;
            }
            None => {
                index_by_id.insert(row.order_id.clone(), orders.len());
                orders.push(Order {
                    id: row.order_id,
                    user_id: row.user_id,
                    items: vec![item],
                    status: row.status,
                    total: line_total,
                    created_at: row.created_at,
                    processed_at: None,
                });
            }
        }
    }

    for order in orders {
        store.push_order(order);
    }

    tracing::debug!(
        "Loaded {} products and {} orders from CSV export",
        store.product_count(),
        store.order_count()
    );
    Ok(store)
}

/// 依配置載入資料存放區，CLI 與 TOML 入口共用
pub fn load_store<C: ConfigProvider>(config: &C) -> Result<InMemoryStore> {
    match config.format() {
        "json" => load_json(config.orders_path()),
        "csv" => {
            let catalog_path = config.catalog_path().ok_or_else(|| RecError::ConfigError {
                message: "CSV format requires a catalog path".to_string(),
            })?;
            load_csv(config.orders_path(), catalog_path)
        }
        other => Err(RecError::InvalidConfigValueError {
            field: "data.format".to_string(),
            value: other.to_string(),
            reason: "valid values: json, csv".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_json_dataset() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "products": [
                {"id": "p1", "name": "Coffee", "price": 450, "category": "beverages"},
                {"id": "p2", "name": "Tea", "price": 300, "category": null}
            ],
            "orders": [
                {
                    "id": "o1",
                    "user_id": "u1",
                    "items": [{"product_id": "p1", "quantity": 2}],
                    "status": "FULFILLED",
                    "total": 900,
                    "created_at": "2024-05-01T10:00:00Z",
                    "processed_at": null
                }
            ]
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let store = load_json(file.path()).unwrap();
        assert_eq!(store.product_count(), 2);
        assert_eq!(store.order_count(), 1);
    }

    #[test]
    fn test_load_json_rejects_malformed_dataset() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"products\": 42}").unwrap();

        assert!(matches!(
            load_json(file.path()),
            Err(RecError::SerializationError(_))
        ));
    }

    #[test]
    fn test_load_csv_groups_rows_into_orders() {
        let mut catalog = NamedTempFile::new().unwrap();
        catalog
            .write_all(b"id,name,price,category\np1,Coffee,450,beverages\np2,Tea,300,\n")
            .unwrap();

        let mut orders = NamedTempFile::new().unwrap();
        orders
            .write_all(
                b"order_id,user_id,product_id,quantity,status,created_at\n\
                  o1,u1,p1,2,FULFILLED,2024-05-01T10:00:00Z\n\
                  o1,u1,p2,1,FULFILLED,2024-05-01T10:00:00Z\n\
                  o2,u2,p2,3,PENDING,2024-05-02T09:30:00Z\n",
            )
            .unwrap();

        let store = load_csv(orders.path(), catalog.path()).unwrap();
        assert_eq!(store.product_count(), 2);
        assert_eq!(store.order_count(), 2);
    }

    #[tokio::test]
    async fn test_load_csv_computes_order_totals() {
        use crate::domain::ports::PurchaseHistory;

        let mut catalog = NamedTempFile::new().unwrap();
        catalog
            .write_all(b"id,name,price,category\np1,Coffee,450,\n")
            .unwrap();

        let mut orders = NamedTempFile::new().unwrap();
        orders
            .write_all(
                b"order_id,user_id,product_id,quantity,status,created_at\n\
                  o1,u1,p1,2,FULFILLED,2024-05-01T10:00:00Z\n",
            )
            .unwrap();

        let store = load_csv(orders.path(), catalog.path()).unwrap();
        let loaded = store.orders_for_user("u1").await.unwrap();
        assert_eq!(loaded[0].total, 900);
        assert_eq!(loaded[0].items[0].quantity, 2);
    }
}
