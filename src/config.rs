use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
    /// Recognition languages offered to the user.
    pub languages: Vec<LanguageOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// BCP-47 tag the recognition session starts with.
    pub default_language: String,
}

/// One entry of the recognition-language picklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_language: "en-US".to_string(),
        }
    }
}
