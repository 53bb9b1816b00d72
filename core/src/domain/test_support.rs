//! Hand-written fakes for the async ports, recording what they were asked.

use std::sync::{Arc, Mutex};

use crate::domain::{
    authentication::ports::MockIdentityVerifier,
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::{entities::ProductMatch, ports::ProductLookup},
    food_analysis::{entities::UpcCode, ports::LLMClient, value_objects::RawModelResponse},
    history::{entities::UploadRecord, ports::UploadRepository, value_objects::GetHistoryFilter},
    image::value_objects::{CompressionSettings, ImagePayload},
    pronunciation::{
        ports::{PronunciationSynthesizer, SpeechEngine},
        value_objects::{AudioPayload, SpeechInput},
    },
};

pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00";

pub struct FakeLLMClient {
    reply: Result<RawModelResponse, CoreError>,
    pub prompts: Mutex<Vec<String>>,
    pub images: Mutex<Vec<ImagePayload>>,
}

impl FakeLLMClient {
    pub fn replying(text: &str) -> Self {
        Self::with_result(Ok(RawModelResponse::new(text)))
    }

    pub fn failing(error: CoreError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(reply: Result<RawModelResponse, CoreError>) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl LLMClient for FakeLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
    ) -> Result<RawModelResponse, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        self.images.lock().unwrap().push(image);
        self.reply.clone()
    }

    async fn generate_with_text(&self, prompt: String) -> Result<RawModelResponse, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        self.reply.clone()
    }
}

pub struct FakeProductLookup {
    result: Result<Option<ProductMatch>, CoreError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProductLookup {
    pub fn returning(result: Result<Option<ProductMatch>, CoreError>) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ProductLookup for FakeProductLookup {
    async fn lookup_upc(&self, upc: UpcCode) -> Result<Option<ProductMatch>, CoreError> {
        self.calls.lock().unwrap().push(upc.to_string());
        self.result.clone()
    }
}

pub struct RecordingSpeechEngine {
    ssml: bool,
    error: Option<CoreError>,
    pub inputs: Mutex<Vec<SpeechInput>>,
}

impl RecordingSpeechEngine {
    pub fn new(ssml: bool) -> Self {
        Self {
            ssml,
            error: None,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CoreError) -> Self {
        Self {
            ssml: false,
            error: Some(error),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn last_input(&self) -> Option<SpeechInput> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

impl SpeechEngine for RecordingSpeechEngine {
    fn supports_ssml(&self) -> bool {
        self.ssml
    }

    async fn synthesize(&self, input: SpeechInput) -> Result<AudioPayload, CoreError> {
        self.inputs.lock().unwrap().push(input);
        match &self.error {
            Some(error) => Err(error.clone()),
            None => AudioPayload::mp3(FAKE_MP3.to_vec()),
        }
    }
}

pub struct FakeSynthesizer {
    error: Option<CoreError>,
    pub calls: Mutex<Vec<(String, bool)>>,
}

impl FakeSynthesizer {
    pub fn failing(error: CoreError) -> Self {
        Self {
            error: Some(error),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Default for FakeSynthesizer {
    fn default() -> Self {
        Self {
            error: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl PronunciationSynthesizer for FakeSynthesizer {
    async fn synthesize(
        &self,
        ingredient_name: String,
        is_concerned: bool,
    ) -> Result<AudioPayload, CoreError> {
        self.calls.lock().unwrap().push((ingredient_name, is_concerned));
        match &self.error {
            Some(error) => Err(error.clone()),
            None => AudioPayload::mp3(FAKE_MP3.to_vec()),
        }
    }
}

#[derive(Default)]
pub struct FakeUploadRepository {
    pub records: Mutex<Vec<UploadRecord>>,
    pub queries: Mutex<Vec<(String, GetHistoryFilter)>>,
}

impl UploadRepository for FakeUploadRepository {
    async fn save(&self, record: UploadRecord) -> Result<UploadRecord, CoreError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_by_identity(
        &self,
        identity: String,
        filter: GetHistoryFilter,
    ) -> Result<Vec<UploadRecord>, CoreError> {
        self.queries.lock().unwrap().push((identity.clone(), filter));
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.identity == identity)
            .cloned()
            .collect())
    }
}

pub type TestService = Service<
    FakeLLMClient,
    FakeProductLookup,
    FakeSynthesizer,
    FakeUploadRepository,
    MockIdentityVerifier,
>;

/// Shared handles on every fake behind a [`TestService`].
pub struct Fakes {
    pub llm: Arc<FakeLLMClient>,
    pub lookup: Arc<FakeProductLookup>,
    pub synthesizer: Arc<FakeSynthesizer>,
    pub uploads: Arc<FakeUploadRepository>,
    /// Has no expectations unless replaced with [`Fakes::with_verifier`].
    pub verifier: Arc<MockIdentityVerifier>,
    pub compression: CompressionSettings,
}

impl Fakes {
    pub fn new(llm: FakeLLMClient) -> Self {
        Self {
            llm: Arc::new(llm),
            lookup: Arc::new(FakeProductLookup::returning(Ok(None))),
            synthesizer: Arc::new(FakeSynthesizer::default()),
            uploads: Arc::new(FakeUploadRepository::default()),
            verifier: Arc::new(MockIdentityVerifier::new()),
            compression: CompressionSettings::default(),
        }
    }

    pub fn with_lookup(mut self, lookup: FakeProductLookup) -> Self {
        self.lookup = Arc::new(lookup);
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: FakeSynthesizer) -> Self {
        self.synthesizer = Arc::new(synthesizer);
        self
    }

    pub fn with_verifier(mut self, verifier: MockIdentityVerifier) -> Self {
        self.verifier = Arc::new(verifier);
        self
    }

    pub fn service(&self) -> TestService {
        Service::new(
            self.llm.clone(),
            self.lookup.clone(),
            self.synthesizer.clone(),
            self.uploads.clone(),
            self.verifier.clone(),
            self.compression,
        )
    }
}

impl Default for Fakes {
    fn default() -> Self {
        Self::new(FakeLLMClient::replying("{}"))
    }
}
