pub mod food_analysis;
pub mod health;
pub mod history;
pub mod pronunciation;
pub mod server;
