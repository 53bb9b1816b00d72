pub mod authentication;
pub mod common;
pub mod enrichment;
pub mod food_analysis;
pub mod history;
pub mod image;
pub mod pronunciation;

#[cfg(test)]
pub(crate) mod test_support;
