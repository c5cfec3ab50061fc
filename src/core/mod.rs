pub mod difference;
pub mod engine;
pub mod frequency;
pub mod predictor;

pub use crate::domain::model::{Order, Product, PurchaseMatrix, RankedProduct};
pub use crate::domain::ports::{Catalog, ConfigProvider, PurchaseHistory, Recommender};
pub use crate::utils::error::Result;
