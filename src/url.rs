use crate::lang::Lang;

/// Mirror of the page's URL fragment: a single token tracked alongside the
/// translator when fragment wiring is enabled.
///
/// The fragment is the highest-priority language source at startup and on
/// history navigation; tokens outside the supported set carry no language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentState {
    fragment: Option<String>,
}

impl FragmentState {
    pub fn new(initial: Option<String>) -> Self {
        Self { fragment: initial }
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The language the fragment encodes, if it names a supported code.
    pub fn language(&self) -> Option<Lang> {
        self.fragment.as_deref().and_then(Lang::from_code)
    }

    /// Records a new fragment value, supported or not.
    pub fn set(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }
}
