pub mod analytics;
pub mod category;
pub mod holding;
pub mod portfolio;
pub mod quote;
pub mod score;
pub mod settings;
