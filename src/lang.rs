use serde::{Deserialize, Serialize};

/// The languages the page ships dictionaries for.
///
/// This closed set gates fragment parsing and the switcher indicator; the
/// load path itself accepts arbitrary codes and simply interpolates them
/// into the resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Sr,
    Ru,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::Sr, Lang::Ru];

    /// The short code used in resource paths, storage, and the URL fragment.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Sr => "sr",
            Lang::Ru => "ru",
        }
    }

    /// Parses a supported code. Anything outside the closed set is `None`.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "sr" => Some(Lang::Sr),
            "ru" => Some(Lang::Ru),
            _ => None,
        }
    }

    /// Label shown next to the flag in the switcher indicator.
    pub fn label(self) -> &'static str {
        match self {
            Lang::En => "EN",
            Lang::Sr => "СРП",
            Lang::Ru => "РУС",
        }
    }

    /// Flag glyph paired with the label in the switcher indicator.
    pub fn icon(self) -> &'static str {
        match self {
            Lang::En => "🇬🇧",
            Lang::Sr => "🇷🇸",
            Lang::Ru => "🇷🇺",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Lang::ALL {
            assert_eq!(Lang::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unsupported_codes_are_rejected() {
        assert_eq!(Lang::from_code("xx"), None);
        assert_eq!(Lang::from_code(""), None);
        assert_eq!(Lang::from_code("EN"), None);
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Lang::default(), Lang::En);
    }
}
