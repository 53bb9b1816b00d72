pub mod pronounce_ingredient;
