use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    history::{
        entities::UploadRecord,
        value_objects::{GetHistoryFilter, GetHistoryInput, SaveAnalysisInput},
    },
};

/// Storage collaborator for kept analyses.
pub trait UploadRepository: Send + Sync {
    fn save(
        &self,
        record: UploadRecord,
    ) -> impl Future<Output = Result<UploadRecord, CoreError>> + Send;

    /// Records for one identity, newest first.
    fn list_by_identity(
        &self,
        identity: String,
        filter: GetHistoryFilter,
    ) -> impl Future<Output = Result<Vec<UploadRecord>, CoreError>> + Send;
}

pub trait HistoryService: Send + Sync {
    fn save_analysis(
        &self,
        identity: Identity,
        input: SaveAnalysisInput,
    ) -> impl Future<Output = Result<UploadRecord, CoreError>> + Send;

    fn get_history(
        &self,
        identity: Identity,
        input: GetHistoryInput,
    ) -> impl Future<Output = Result<Vec<UploadRecord>, CoreError>> + Send;
}
