pub mod authentication;
pub mod food_data;
pub mod history;
pub mod llm;
pub mod speech;

#[cfg(test)]
pub(crate) mod stub_server;
