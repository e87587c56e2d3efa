use crate::lexicon::LexiconFormat;
use crate::metrics::Limits;
use anyhow::Result;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Theme {
    pub hint: String,         // style hints
    pub unknown_word: String, // spelling
    pub other: String,        // grammar and everything else
    pub danger: String,       // negative counters
    pub heading: String,      // entry and group labels
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            hint: "#d3d3d3".to_string(),
            unknown_word: "#ff0000".to_string(),
            other: "#ffff00".to_string(),
            danger: "#ff0000".to_string(),
            heading: "#e2b714".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct LexiconConfig {
    pub path: Option<PathBuf>,
    pub format: LexiconFormat,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DisplayConfig {
    pub hide_subsumed_synonyms: bool,
    pub wrap_width: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub lexicon: LexiconConfig,
    pub limits: Limits,
    pub display: DisplayConfig,
    pub theme: Theme,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = ProjectDirs::from("", "", "wordwhittler")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.exists());
        Self::load_from(config_path)
    }

    /// Defaults, then the optional file, then `WORDWHITTLER_*` variables
    /// (`WORDWHITTLER_LIMITS__TWEET_LIMIT=140`).
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let limits = Limits::default();
        let theme = Theme::default();

        let mut builder = Config::builder()
            .set_default("lexicon.format", "json")?
            .set_default("limits.tweet_limit", limits.tweet_limit)?
            .set_default("limits.url_weight", limits.url_weight as u64)?
            .set_default("limits.max_selection_chars", limits.max_selection_chars as u64)?
            .set_default("display.hide_subsumed_synonyms", false)?
            .set_default("theme.hint", theme.hint)?
            .set_default("theme.unknown_word", theme.unknown_word)?
            .set_default("theme.other", theme.other)?
            .set_default("theme.danger", theme.danger)?
            .set_default("theme.heading", theme.heading)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("WORDWHITTLER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder.build()?.try_deserialize()?;
        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::load_from(None).unwrap();
        assert_eq!(cfg.limits, Limits::default());
        assert_eq!(cfg.lexicon.format, LexiconFormat::Json);
        assert!(cfg.lexicon.path.is_none());
        assert!(!cfg.display.hide_subsumed_synonyms);
        assert_eq!(cfg.theme, Theme::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[lexicon]\npath = \"/usr/share/wordnet/dict\"\nformat = \"wndb\"\n\n[limits]\ntweet_limit = 140\n\n[display]\nhide_subsumed_synonyms = true"
        )
        .unwrap();

        let cfg = AppConfig::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.lexicon.format, LexiconFormat::Wndb);
        assert_eq!(cfg.lexicon.path, Some(PathBuf::from("/usr/share/wordnet/dict")));
        assert_eq!(cfg.limits.tweet_limit, 140);
        assert_eq!(cfg.limits.url_weight, 23);
        assert!(cfg.display.hide_subsumed_synonyms);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[limits]\ntweet_limit = \"lots\"").unwrap();
        assert!(AppConfig::load_from(Some(file.path().to_path_buf())).is_err());
    }
}
