use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    authentication::ports::IdentityVerifier,
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::ports::ProductLookup,
    food_analysis::{
        parser::clean,
        ports::LLMClient,
        prompts::{PromptKind, build_pronunciation_prompt},
    },
    history::ports::UploadRepository,
    pronunciation::{
        interjections::{INTERJECTIONS, InterjectionPicker},
        ports::{PronunciationService, PronunciationSynthesizer, SpeechEngine},
        value_objects::{
            AudioPayload, PronounceIngredientInput, PronunciationStrategy, SpeechInput,
        },
    },
};

/// Speaks the ingredient name as written.
///
/// Flagged names get ". <interjection>" appended and, on SSML backends, are
/// wrapped in a slow-rate prosody element. Pitch is left alone since some
/// voices reject it.
pub struct DirectNamePronouncer<S, I> {
    engine: Arc<S>,
    picker: I,
}

impl<S, I> DirectNamePronouncer<S, I> {
    pub fn new(engine: Arc<S>, picker: I) -> Self {
        Self { engine, picker }
    }
}

impl<S, I> PronunciationSynthesizer for DirectNamePronouncer<S, I>
where
    S: SpeechEngine,
    I: InterjectionPicker,
{
    async fn synthesize(
        &self,
        ingredient_name: String,
        is_concerned: bool,
    ) -> Result<AudioPayload, CoreError> {
        let interjection = is_concerned.then(|| self.picker.pick(&INTERJECTIONS));
        let input = direct_speech_input(&ingredient_name, interjection, self.engine.supports_ssml());

        debug!(ingredient = %ingredient_name, is_concerned, speech = %input.as_str(), "synthesizing pronunciation");
        self.engine.synthesize(input).await
    }
}

pub fn direct_speech_input(name: &str, interjection: Option<&str>, ssml: bool) -> SpeechInput {
    match (interjection, ssml) {
        (None, _) => SpeechInput::Text(name.to_string()),
        (Some(interjection), false) => SpeechInput::Text(format!("{name}. {interjection}")),
        (Some(interjection), true) => SpeechInput::Ssml(format!(
            "<speak><prosody rate=\"slow\">{}. {}</prosody></speak>",
            escape_ssml(name),
            escape_ssml(interjection)
        )),
    }
}

fn escape_ssml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Asks the model for a phonetic respelling and speaks that instead of the
/// written name. No markup is used; flagged names get an interjection after
/// the respelling.
pub struct PhoneticPronouncer<L, S, I> {
    llm_client: Arc<L>,
    engine: Arc<S>,
    picker: I,
}

impl<L, S, I> PhoneticPronouncer<L, S, I> {
    pub fn new(llm_client: Arc<L>, engine: Arc<S>, picker: I) -> Self {
        Self {
            llm_client,
            engine,
            picker,
        }
    }
}

impl<L, S, I> PhoneticPronouncer<L, S, I>
where
    L: LLMClient,
{
    async fn phonetic_spelling(&self, ingredient_name: &str) -> Result<String, CoreError> {
        let response = self
            .llm_client
            .generate_with_text(build_pronunciation_prompt(ingredient_name))
            .await
            .map_err(|e| CoreError::SynthesisError(format!("phonetic lookup failed: {e}")))?;
        response.log_usage(PromptKind::Pronunciation.as_str());

        let spelling = normalize_phonetic(&response.text);
        if spelling.is_empty() {
            warn!(ingredient = %ingredient_name, "empty phonetic spelling, speaking the name as written");
            return Ok(ingredient_name.to_string());
        }
        Ok(spelling)
    }
}

impl<L, S, I> PronunciationSynthesizer for PhoneticPronouncer<L, S, I>
where
    L: LLMClient,
    S: SpeechEngine,
    I: InterjectionPicker,
{
    async fn synthesize(
        &self,
        ingredient_name: String,
        is_concerned: bool,
    ) -> Result<AudioPayload, CoreError> {
        let spelling = self.phonetic_spelling(&ingredient_name).await?;
        let text = if is_concerned {
            format!("{spelling} {}", self.picker.pick(&INTERJECTIONS))
        } else {
            spelling
        };

        debug!(ingredient = %ingredient_name, is_concerned, speech = %text, "synthesizing phonetic pronunciation");
        self.engine.synthesize(SpeechInput::Text(text)).await
    }
}

/// First non-empty line of the model reply, without fences or quotes.
fn normalize_phonetic(raw: &str) -> String {
    clean(raw)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
        .trim()
        .to_string()
}

/// The configured pronunciation strategy.
pub enum Pronouncer<L, S, I> {
    Direct(DirectNamePronouncer<S, I>),
    Phonetic(PhoneticPronouncer<L, S, I>),
}

impl<L, S, I> Pronouncer<L, S, I> {
    pub fn new(
        strategy: PronunciationStrategy,
        llm_client: Arc<L>,
        engine: Arc<S>,
        picker: I,
    ) -> Self {
        match strategy {
            PronunciationStrategy::Direct => {
                Pronouncer::Direct(DirectNamePronouncer::new(engine, picker))
            }
            PronunciationStrategy::Phonetic => {
                Pronouncer::Phonetic(PhoneticPronouncer::new(llm_client, engine, picker))
            }
        }
    }
}

impl<L, S, I> PronunciationSynthesizer for Pronouncer<L, S, I>
where
    L: LLMClient,
    S: SpeechEngine,
    I: InterjectionPicker,
{
    async fn synthesize(
        &self,
        ingredient_name: String,
        is_concerned: bool,
    ) -> Result<AudioPayload, CoreError> {
        match self {
            Pronouncer::Direct(pronouncer) => {
                pronouncer.synthesize(ingredient_name, is_concerned).await
            }
            Pronouncer::Phonetic(pronouncer) => {
                pronouncer.synthesize(ingredient_name, is_concerned).await
            }
        }
    }
}

impl<LLM, PL, SY, UR, IV> PronunciationService for Service<LLM, PL, SY, UR, IV>
where
    LLM: LLMClient,
    PL: ProductLookup,
    SY: PronunciationSynthesizer,
    UR: UploadRepository,
    IV: IdentityVerifier,
{
    async fn pronounce_ingredient(
        &self,
        input: PronounceIngredientInput,
    ) -> Result<AudioPayload, CoreError> {
        let name = input.ingredient_name.trim();
        if name.is_empty() {
            return Err(CoreError::Invalid("ingredient name must not be empty".to_string()));
        }

        self.synthesizer
            .synthesize(name.to_string(), input.is_concerned)
            .await
            .inspect_err(|e| warn!(ingredient = %name, error = %e, "pronunciation failed"))
    }
}
