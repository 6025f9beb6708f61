//! Language and currency context
//!
//! Passed explicitly to the cost analysis and formatting boundaries; nothing
//! in the engine reads an ambient locale.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported UI languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// BCP-47 style tag
    #[inline]
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }

    /// Currency used for cost figures in this language
    #[inline]
    #[must_use]
    pub fn default_currency(self) -> Currency {
        match self {
            Language::En => Currency::Usd,
            Language::Ja => Currency::Jpy,
        }
    }
}

impl FromStr for Language {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.split(['-', '_']).next().unwrap_or_default() {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            _ => Err(ModelError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Currencies for cost figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Jpy,
}

impl Currency {
    /// ISO 4217 code
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Jpy => "JPY",
        }
    }
}

/// Language plus currency, the full context for cost analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    pub language: Language,
    pub currency: Currency,
}

impl Locale {
    /// Locale with the language's default currency
    #[inline]
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            currency: language.default_currency(),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Language::default().default_currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_tags() {
        assert_eq!("en-US".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ja_JP".parse::<Language>().unwrap(), Language::Ja);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn locale_currency_follows_language() {
        assert_eq!(Locale::for_language(Language::Ja).currency, Currency::Jpy);
        assert_eq!(Locale::default().currency, Currency::Usd);
    }
}
