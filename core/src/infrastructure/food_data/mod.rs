pub mod fooddata_central_client;

pub use fooddata_central_client::FoodDataCentralClient;
