pub mod display;
pub mod portfolio_service;
pub mod quote_service;
pub mod score_service;
