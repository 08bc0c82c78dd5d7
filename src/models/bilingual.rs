use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Languages the portfolio content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::En => Language::Vi,
            Language::Vi => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "vi" => Ok(Language::Vi),
            _ => Err(UnsupportedLanguage(raw.to_string())),
        }
    }
}

/**
 * Content with no meaningful value in one language
 * resolution falls back to the other language for blank values
 */
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Parallel `en`/`vi` values for the same piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bilingual<T> {
    #[serde(default)]
    pub en: T,
    #[serde(default)]
    pub vi: T,
}

impl<T> Bilingual<T> {
    pub fn new(en: T, vi: T) -> Self {
        Self { en, vi }
    }

    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::En => &self.en,
            Language::Vi => &self.vi,
        }
    }
}

impl<T: Clone + Blank> Bilingual<T> {
    /**
     * value for `language`, or the other language's value
     * when the requested one was never filled in
     */
    pub fn resolve(&self, language: Language) -> T {
        let preferred = self.get(language);
        if preferred.is_blank() {
            self.get(language.other()).clone()
        } else {
            preferred.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_codes_case_insensitively() {
        assert_eq!("VI".parse::<Language>().unwrap(), Language::Vi);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::En);
        assert_eq!(
            "fr".parse::<Language>().unwrap_err().to_string(),
            "Unsupported language: fr"
        );
    }

    #[test]
    fn resolves_requested_language() {
        let title = Bilingual::new("Designer".to_string(), "Nhà thiết kế".to_string());
        assert_eq!(title.resolve(Language::Vi), "Nhà thiết kế");
        assert_eq!(title.resolve(Language::En), "Designer");
    }

    #[test]
    fn falls_back_when_translation_missing() {
        let bio = Bilingual::new("Hello".to_string(), "  ".to_string());
        assert_eq!(bio.resolve(Language::Vi), "Hello");

        let badges: Bilingual<Vec<String>> = Bilingual::new(vec![], vec!["UX".into()]);
        assert_eq!(badges.resolve(Language::En), vec!["UX".to_string()]);
    }

    #[test]
    fn missing_side_deserializes_to_default() {
        let parsed: Bilingual<String> = serde_json::from_str(r#"{"en":"only"}"#).unwrap();
        assert_eq!(parsed.en, "only");
        assert_eq!(parsed.vi, "");
    }
}
