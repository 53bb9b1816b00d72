pub mod food_analysis_record;
pub mod ingredient_analysis_record;
pub mod upc_code;

pub use food_analysis_record::*;
pub use ingredient_analysis_record::*;
pub use upc_code::*;
