use std::sync::Arc;

use log::{debug, error, info};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::dictionary::Dictionary;
use crate::dom::Document;
use crate::lang::Lang;
use crate::render;
use crate::source::{DictionarySource, LoadError};
use crate::state::LanguageState;
use crate::storage::PreferenceStore;
use crate::url::FragmentState;

/// Outcome of one dictionary fetch, delivered on the completion channel.
///
/// Completions are applied in arrival order: when loads overlap, whichever
/// fetch finishes last is the one whose state ends up visible, regardless of
/// the order the loads were issued in. Nothing discards a superseded
/// response; it is only overwritten if something later lands on top of it.
#[derive(Debug)]
pub enum LoadCompletion {
    Loaded {
        code: String,
        dictionary: Dictionary,
    },
    Failed(LoadError),
}

/// The translation facade for one page.
///
/// `Translator` resolves the startup language, loads dictionaries, renders
/// them into the document it owns, and keeps the title and the language
/// indicator in step. Its operations never fail from the caller's
/// perspective: fetch and parse problems are logged at the completion
/// boundary and the previously rendered state is left alone.
///
/// Loads run as spawned tasks and report back over an unbounded channel;
/// the owner drives application with [`Translator::poll_completion`] or
/// [`Translator::next_completion`] from its event loop.
pub struct Translator {
    state: LanguageState,
    document: Document,
    source: Arc<dyn DictionarySource>,
    store: PreferenceStore,
    fragment: Option<FragmentState>,
    completions_tx: UnboundedSender<LoadCompletion>,
    completions_rx: UnboundedReceiver<LoadCompletion>,
}

impl Translator {
    /// Creates a translator over `document` without fragment wiring: the
    /// startup language comes from storage, else `fallback`.
    pub fn new(
        source: Arc<dyn DictionarySource>,
        store: PreferenceStore,
        document: Document,
        fallback: Lang,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: LanguageState::new(fallback),
            document,
            source,
            store,
            fragment: None,
            completions_tx: tx,
            completions_rx: rx,
        }
    }

    /// Enables fragment wiring with the given initial fragment. The fragment
    /// becomes authoritative over storage at startup, and
    /// [`Translator::handle_fragment_change`] starts reacting to navigation.
    pub fn with_fragment(mut self, initial: Option<String>) -> Self {
        self.fragment = Some(FragmentState::new(initial));
        self
    }

    /// Resolves the startup language: a supported fragment wins, then the
    /// stored preference (used as-is, unvalidated), then the fallback the
    /// translator was built with.
    pub fn initial_language(&self) -> String {
        if let Some(lang) = self.fragment.as_ref().and_then(FragmentState::language) {
            return lang.code().to_string();
        }
        self.store
            .preferred_language()
            .unwrap_or_else(|| self.state.code().to_string())
    }

    /// Kicks off the initial load. Call once when the page is ready.
    pub fn start(&mut self) {
        let code = self.initial_language();
        self.load(&code);
    }

    /// Requests the dictionary for `code`.
    ///
    /// Returns immediately; the fetch runs as a spawned task and its outcome
    /// arrives on the completion channel. The code is not validated: it is
    /// interpolated straight into the resource path, and an unknown code
    /// simply fails the fetch.
    pub fn load(&mut self, code: &str) {
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let code = code.to_string();
        debug!("requesting dictionary for '{code}' via {} source", source.name());
        tokio::spawn(async move {
            let completion = match source.fetch(&code).await {
                Ok(dictionary) => LoadCompletion::Loaded { code, dictionary },
                Err(err) => LoadCompletion::Failed(err),
            };
            // The receiver only disappears when the translator is dropped.
            let _ = tx.send(completion);
        });
    }

    /// Applies one finished fetch if any is waiting. Non-blocking; returns
    /// whether a completion was applied.
    pub fn poll_completion(&mut self) -> bool {
        match self.completions_rx.try_recv() {
            Ok(completion) => {
                self.apply_completion(completion);
                true
            }
            Err(_) => false,
        }
    }

    /// Waits for the next fetch to finish and applies it. Returns `false`
    /// only if the channel closed, which cannot happen while the translator
    /// holds its sender.
    pub async fn next_completion(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    fn apply_completion(&mut self, completion: LoadCompletion) {
        match completion {
            LoadCompletion::Loaded { code, dictionary } => {
                info!("loaded dictionary for '{code}'");
                self.state.install(code, dictionary);
                self.refresh();
            }
            LoadCompletion::Failed(err) => {
                // Swallowed on purpose: no retry, no rollback, no surface to
                // the caller. The page keeps whatever was rendered before.
                error!("error loading translations: {err}");
            }
        }
    }

    /// Re-renders the document from the active dictionary: marked-element
    /// substitution, title sync, and (with fragment wiring) the switcher
    /// indicator. Idempotent.
    pub fn refresh(&mut self) {
        render::apply_translations(&mut self.document, self.state.dictionary());
        if self.fragment.is_some() {
            render::update_language_switcher(&mut self.document, self.state.code());
        }
    }

    /// Explicit language switch, e.g. from a UI control.
    ///
    /// Persists the choice, mirrors it into the fragment and closes an open
    /// dropdown (when fragment wiring is on), then loads. This happens even
    /// if `code` is already active; the explicit path never short-circuits.
    pub fn change_language(&mut self, code: &str) {
        info!("language changed to '{code}'");
        if let Err(err) = self.store.remember_language(code) {
            error!("failed to persist language preference: {err:#}");
        }
        if let Some(fragment) = self.fragment.as_mut() {
            fragment.set(code);
            render::close_language_dropdown(&mut self.document);
        }
        self.load(code);
    }

    /// Reacts to external history navigation.
    ///
    /// Recomputes the language from the new fragment and loads it only when
    /// it differs from the active code, so cosmetic navigation does not
    /// refetch. Without fragment wiring this is a no-op.
    pub fn handle_fragment_change(&mut self, new_fragment: &str) {
        let Some(state) = self.fragment.as_mut() else {
            return;
        };
        state.set(new_fragment);
        let Some(lang) = Lang::from_code(new_fragment) else {
            debug!("ignoring fragment '{new_fragment}': not a supported language");
            return;
        };
        if lang.code() == self.state.code() {
            debug!("fragment matches active language '{new_fragment}', skipping reload");
            return;
        }
        self.load(lang.code());
    }

    /// Resolves a dot-delimited key against the active dictionary. Misses
    /// come back as the key itself; see [`Dictionary::translate`].
    pub fn translation(&self, key: &str) -> Value {
        self.state.dictionary().translate(key)
    }

    /// The code whose dictionary is currently rendered.
    pub fn current_language(&self) -> &str {
        self.state.code()
    }

    /// The current URL fragment, when fragment wiring is on.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_ref().and_then(FragmentState::fragment)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}
