//! Correctors and the registry that resolves them by name.
//!
//! A corrector models one class of typing mistake (caps lock left on, an
//! extra trailing character, a missed shift key, ...). Each one carries two
//! transforms:
//!
//! - `fix`: maps a typed password to the candidate(s) the user probably meant
//! - `typo`: maps a real password to the mistypings it could produce, used to
//!   compute neighbourhoods
//!
//! An empty output means the corrector does not apply to the input.

mod case;
mod keypress;
mod shift;
mod trim;

use std::collections::HashMap;

/// Transform function: one password in, zero or more candidates out.
pub type Transform = fn(&str) -> Vec<String>;

/// Every corrector name the built-in registry resolves.
pub const ALLOWED_EDITS: [&str; 16] = [
    "same",
    "swc-all",
    "swc-first",
    "rm-lastc",
    "rm-firstc",
    "rm-lasts",
    "cap2up",
    "upncap",
    "rm-lastd",
    "rm-lastl",
    "sws-last1",
    "sws-lastn",
    "add1-last",
    "up2cap",
    "n2s-last",
    "keypress-edit",
];

/// A named correction transform together with its typo simulation.
#[derive(Clone, Copy)]
pub struct Corrector {
    fix: Transform,
    typo: Transform,
    is_typo: bool,
}

impl Corrector {
    pub const fn new(fix: Transform, typo: Transform, is_typo: bool) -> Self {
        Self { fix, typo, is_typo }
    }

    /// Candidates the typed password probably should have been.
    pub fn apply(&self, password: &str) -> Vec<String> {
        (self.fix)(password)
    }

    /// Mistypings of a real password this corrector would undo.
    pub fn apply_typo(&self, password: &str) -> Vec<String> {
        (self.typo)(password)
    }

    /// Whether this corrector models a typing mistake rather than a
    /// plain normalization.
    pub fn is_typo(&self) -> bool {
        self.is_typo
    }
}

impl std::fmt::Debug for Corrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corrector")
            .field("is_typo", &self.is_typo)
            .finish_non_exhaustive()
    }
}

fn identity(password: &str) -> Vec<String> {
    vec![password.to_string()]
}

/// Maps corrector names to their transforms.
#[derive(Debug, Clone)]
pub struct CorrectorRegistry {
    correctors: HashMap<String, Corrector>,
}

impl CorrectorRegistry {
    /// Registry with no correctors at all.
    pub fn empty() -> Self {
        Self {
            correctors: HashMap::new(),
        }
    }

    /// Registry resolving every name in [`ALLOWED_EDITS`].
    pub fn builtin() -> Self {
        let table: [(&str, Corrector); 16] = [
            ("same", Corrector::new(identity, identity, false)),
            ("swc-all", Corrector::new(case::swap_case_all, case::swap_case_all, true)),
            ("swc-first", Corrector::new(case::swap_case_first, case::swap_case_first, true)),
            ("rm-lastc", Corrector::new(trim::remove_last_char, trim::append_any, true)),
            ("rm-firstc", Corrector::new(trim::remove_first_char, trim::prepend_any, true)),
            ("rm-lasts", Corrector::new(trim::remove_last_symbol, trim::append_symbol, true)),
            ("cap2up", Corrector::new(case::capitalized_to_upper, case::upper_to_capitalized, true)),
            ("upncap", Corrector::new(case::upper_and_capitalized, case::lower, true)),
            ("rm-lastd", Corrector::new(trim::remove_last_digit, trim::append_digit, true)),
            ("rm-lastl", Corrector::new(trim::remove_last_letter, trim::append_letter, true)),
            ("sws-last1", Corrector::new(shift::toggle_shift_last, shift::toggle_shift_last, true)),
            ("sws-lastn", Corrector::new(shift::toggle_shift_trailing, shift::toggle_shift_trailing, true)),
            ("add1-last", Corrector::new(trim::append_one, trim::remove_trailing_one, true)),
            ("up2cap", Corrector::new(case::upper_to_capitalized, case::capitalized_to_upper, true)),
            ("n2s-last", Corrector::new(shift::last_digit_to_symbol, shift::last_symbol_to_digit, true)),
            ("keypress-edit", Corrector::new(keypress::fix_keypress, keypress::typo_keypress, true)),
        ];

        let correctors = table
            .into_iter()
            .map(|(name, corrector)| (name.to_string(), corrector))
            .collect();
        Self { correctors }
    }

    /// Adds or replaces a corrector.
    pub fn register(&mut self, name: impl Into<String>, corrector: Corrector) {
        self.correctors.insert(name.into(), corrector);
    }

    pub fn lookup(&self, name: &str) -> Option<&Corrector> {
        self.correctors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.correctors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.correctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correctors.is_empty()
    }
}

impl Default for CorrectorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
