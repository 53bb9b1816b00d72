pub mod google_tts_engine;
pub mod openai_tts_engine;
pub mod speech_engine_factory;

pub use speech_engine_factory::{SpeechBackend, SpeechEngineFactory};
