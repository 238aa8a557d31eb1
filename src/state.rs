use crate::dictionary::Dictionary;
use crate::lang::Lang;

/// The active language and the dictionary loaded for it.
///
/// Both fields are private and only ever written through
/// [`LanguageState::install`], so a reader always observes a matching pair,
/// never a new code with an old dictionary or the reverse.
#[derive(Debug)]
pub struct LanguageState {
    code: String,
    dictionary: Dictionary,
}

impl LanguageState {
    /// Starts on the fallback language with an empty dictionary; every
    /// lookup misses until the first load lands.
    pub fn new(fallback: Lang) -> Self {
        Self {
            code: fallback.code().to_string(),
            dictionary: Dictionary::default(),
        }
    }

    /// Swaps in a freshly loaded pair. The previous dictionary is dropped
    /// wholesale, not merged into.
    pub fn install(&mut self, code: String, dictionary: Dictionary) {
        self.code = code;
        self.dictionary = dictionary;
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}
