//! Typo-tolerant password checking
//!
//! This library decides whether a mistyped login password may be accepted
//! for a user's real password. A set of correctors (caps lock, a stray
//! trailing character, a missed shift key, ...) builds the *ball* of
//! passwords a typed one could stand for, and one of six policies narrows
//! it using a blacklist and a password probability model.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable login evaluation and channel delivery
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `typo-check` binary
//!
//! # Environment Variables
//!
//! - `TYPO_BLACKLIST_PATH`: Custom path to blacklist file
//!   (default: `./assets/blacklist.txt`)
//! - `TYPO_PWMODEL_PATH`: Custom path to the `count password` frequency table
//!   (default: `./assets/pwmodel.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use typo_checker::{BlackList, FrequencyModel, presets};
//!
//! // Load collaborators once at startup
//! let blacklist = Arc::new(BlackList::load().expect("Failed to load blacklist"));
//! let model = Arc::new(FrequencyModel::load().expect("Failed to load password model"));
//!
//! let mut checker = presets::build_preset("ChkBl_Top3", model, blacklist).unwrap();
//!
//! // Caps lock was on
//! assert!(checker.check("pASSWORD123", "Password123").unwrap());
//! println!("{:?}", checker.acceptance_set("pASSWORD123").unwrap());
//! ```

mod blacklist;
mod checker;
mod correctors;
mod evaluator;
mod filter;
mod pwmodel;
mod transforms;

// Public API
pub use blacklist::{BlackList, BlacklistError, get_blacklist_path};
pub use checker::{
    Candidates, Checker, CheckerConfig, CheckerError, DEFAULT_CACHE_CAPACITY, DEFAULT_RPW_Q,
    DEFAULT_TOPK, Decision, DecisionCache, MAX_SEARCH_CANDIDATES, Policy,
    most_valuable_under_budget, presets,
};
pub use correctors::{ALLOWED_EDITS, Corrector, CorrectorRegistry, Transform};
pub use evaluator::{LoginEvaluation, LoginOutcome, evaluate_login};
pub use filter::{MIN_PASSWORD_LENGTH, is_valid};
pub use pwmodel::{FrequencyModel, MIN_PROB, ModelError, PasswordModel, get_pwmodel_path};
pub use transforms::{IDENTITY, TYPO_FIX_COUNTS, TransformList};

#[cfg(feature = "async")]
pub use evaluator::evaluate_login_tx;
