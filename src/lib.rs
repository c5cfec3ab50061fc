pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::memory::InMemoryStore;
pub use config::CliConfig;
pub use core::{
    difference::DifferenceModel, engine::RecommendEngine, frequency::MostPurchased,
    predictor::SlopeOne,
};
pub use utils::error::{RecError, Result};
