use clap::Parser;
use documind_core::{GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "documind-server", version, about = "Upload a PDF and chat with it.")]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, value_parser = non_empty)]
    pub google_api_key: String,

    /// Address to bind
    #[arg(long, env = "DOCUMIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "DOCUMIND_PORT", default_value = "8000")]
    pub port: u16,

    /// Generation model id
    #[arg(long, env = "DOCUMIND_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini REST base URL
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub gemini_endpoint: String,

    /// Seconds to wait for the generation API before giving up
    #[arg(long, env = "DOCUMIND_GENERATION_TIMEOUT_SECS", default_value = "60")]
    pub generation_timeout_secs: u64,

    /// Directory for temporary upload files. Defaults to the system temp dir.
    #[arg(long, env = "DOCUMIND_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "DOCUMIND_MAX_UPLOAD_BYTES", default_value = "52428800")]
    pub max_upload_bytes: usize,
}

impl Cli {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            endpoint: self.gemini_endpoint.clone(),
            api_key: self.google_api_key.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.generation_timeout_secs),
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("GOOGLE_API_KEY must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_the_key_is_given() {
        let cli = Cli::try_parse_from(["documind-server", "--google-api-key", "abc"])
            .expect("key is enough to start");

        assert_eq!(cli.port, 8000);
        assert_eq!(cli.model, "gemini-2.5-flash");
        let gemini = cli.gemini_config();
        assert_eq!(gemini.api_key, "abc");
        assert_eq!(gemini.timeout, Duration::from_secs(60));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(Cli::try_parse_from(["documind-server", "--google-api-key", "  "]).is_err());
    }
}
