pub mod in_memory_upload_repository;

pub use in_memory_upload_repository::InMemoryUploadRepository;
