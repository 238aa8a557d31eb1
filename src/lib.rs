//! Client-side style internationalization for a page-like document tree.
//!
//! The crate fetches a JSON dictionary for a selected language, substitutes
//! marked elements of a document with translated strings, and persists and
//! reflects the chosen language via durable storage and a URL-fragment
//! state. Everything is one linear pipeline (fetch, parse, substitute)
//! driven from the owner's event loop through the [`Translator`] facade.

pub mod config;
pub mod dictionary;
pub mod dom;
pub mod lang;
pub mod render;
pub mod source;
pub mod state;
pub mod storage;
pub mod translator;
pub mod url;

pub use dictionary::Dictionary;
pub use dom::{Document, Element, Node};
pub use lang::Lang;
pub use source::{DictionarySource, FsSource, HttpSource, LoadError};
pub use storage::PreferenceStore;
pub use translator::{LoadCompletion, Translator};
