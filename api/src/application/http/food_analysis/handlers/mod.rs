pub mod analyze_ingredient;
pub mod upload_image;
