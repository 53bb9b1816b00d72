use clap::{ArgAction, Parser};
use platewise_core::domain::{
    common::{AuthConfig, FoodDataConfig, LLMConfig, PlatewiseConfig, SpeechConfig},
    image::value_objects::{CompressionSettings, ResizePolicy},
    pronunciation::value_objects::{PronunciationStrategy, SpeechProvider},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "platewise-api", about = "Food photo analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,
    #[command(flatten)]
    pub llm: LlmArgs,
    #[command(flatten)]
    pub food_data: FoodDataArgs,
    #[command(flatten)]
    pub speech: SpeechArgs,
    #[command(flatten)]
    pub image: ImageArgs,
    #[command(flatten)]
    pub auth: AuthArgs,
    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FoodDataArgs {
    /// Product lookups are skipped when unset.
    #[arg(long, env = "FOODDATA_API_KEY", hide_env_values = true)]
    pub fooddata_api_key: Option<String>,

    #[arg(long, env = "FOODDATA_BASE_URL")]
    pub fooddata_base_url: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SpeechArgs {
    /// `google` or `openai`.
    #[arg(long, env = "TTS_PROVIDER", default_value = "google")]
    pub tts_provider: SpeechProvider,

    /// `direct` or `phonetic`.
    #[arg(long, env = "PRONUNCIATION_STRATEGY", default_value = "direct")]
    pub pronunciation_strategy: PronunciationStrategy,

    #[arg(long, env = "GOOGLE_TTS_API_KEY", hide_env_values = true)]
    pub google_tts_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "TTS_VOICE")]
    pub tts_voice: Option<String>,

    #[arg(long, env = "TTS_LANGUAGE_CODE", default_value = "en-US")]
    pub tts_language_code: String,

    #[arg(long, env = "TTS_BASE_URL")]
    pub tts_base_url: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ImageArgs {
    #[arg(
        long,
        env = "IMAGE_COMPRESSION_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub image_compression_enabled: bool,

    #[arg(long, env = "IMAGE_MAX_DIMENSION", default_value_t = 1024)]
    pub image_max_dimension: u32,

    #[arg(
        long,
        env = "IMAGE_QUALITY",
        default_value_t = 85,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub image_quality: u8,

    /// `always` or `fit`.
    #[arg(long, env = "IMAGE_RESIZE_POLICY", default_value = "fit")]
    pub image_resize_policy: ResizePolicy,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AuthArgs {
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(
        long = "log-filter",
        env = "RUST_LOG",
        default_value = "info,platewise_api=debug,platewise_core=debug,tower_http=debug"
    )]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for PlatewiseConfig {
    fn from(args: Args) -> Self {
        PlatewiseConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                base_url: args.llm.gemini_base_url,
            },
            food_data: FoodDataConfig {
                api_key: args.food_data.fooddata_api_key,
                base_url: args.food_data.fooddata_base_url,
            },
            speech: SpeechConfig {
                provider: args.speech.tts_provider,
                strategy: args.speech.pronunciation_strategy,
                google_api_key: args.speech.google_tts_api_key,
                openai_api_key: args.speech.openai_api_key,
                voice: args.speech.tts_voice,
                language_code: args.speech.tts_language_code,
                base_url: args.speech.tts_base_url,
            },
            image: CompressionSettings {
                enabled: args.image.image_compression_enabled,
                max_dimension: args.image.image_max_dimension,
                quality: args.image.image_quality,
                policy: args.image.image_resize_policy,
            },
            auth: AuthConfig {
                jwt_secret: args.auth.jwt_secret,
            },
        }
    }
}
