//! The policy engine.
//!
//! A [`Checker`] owns a transform list, a password model and a blacklist,
//! and decides which passwords a typed password may stand in for.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use typo_checker::{BlackList, Checker, CheckerConfig, FrequencyModel, Policy};
//!
//! let model = Arc::new(FrequencyModel::from_counts([("password1", 10)]));
//! let blacklist = Arc::new(BlackList::from_lines(["password1"]));
//! let config = CheckerConfig::new(["swc-all", "swc-first"], Policy::ChkBl);
//! let mut checker = Checker::new(config, model, blacklist).unwrap();
//!
//! assert!(checker.check("Password1", "pASSWORD1").unwrap());
//! assert!(!checker.check("Password1", "password1").unwrap());
//! ```

mod cache;
mod optimizer;
mod policies;
pub mod presets;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::blacklist::{BlackList, BlacklistError};
use crate::correctors::CorrectorRegistry;
use crate::filter::is_valid;
use crate::pwmodel::{ModelError, PasswordModel};
use crate::transforms::TransformList;

pub use cache::{DEFAULT_CACHE_CAPACITY, DecisionCache};
pub use optimizer::{MAX_SEARCH_CANDIDATES, most_valuable_under_budget};
pub use policies::Policy;

/// A set of passwords, ordered for stable output.
pub type Candidates = BTreeSet<String>;

/// Probability budget used when none was configured.
pub const DEFAULT_RPW_Q: f64 = 1e-4;

/// Sample size of the top-k policy when none was configured.
pub const DEFAULT_TOPK: usize = 10;

/// Reported by [`Checker::max_ball_size`] before any ball was computed.
const DEFAULT_MAX_BALL_SIZE: usize = 200;

/// Reported by [`Checker::max_nh_size`] before any neighbourhood was computed.
const DEFAULT_MAX_NH_SIZE: usize = 2000;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("Unknown corrector: {0}")]
    UnknownCorrector(String),
    #[error("Invalid checker configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Search space too large: {candidates} candidates (limit {limit})")]
    SearchSpaceTooLarge { candidates: usize, limit: usize },
    #[error("Unknown checker preset: {0}")]
    UnknownPreset(String),
    #[error(transparent)]
    Blacklist(#[from] BlacklistError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Outcome of [`Checker::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A real password was given: whether it is in the acceptance set.
    Accepted(bool),
    /// No real password was given: the acceptance set itself.
    Candidates(Candidates),
}

impl Decision {
    /// `true` only for `Accepted(true)`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted(true))
    }

    pub fn into_candidates(self) -> Option<Candidates> {
        match self {
            Decision::Candidates(c) => Some(c),
            Decision::Accepted(_) => None,
        }
    }
}

/// Everything needed to build a [`Checker`] apart from its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerConfig {
    pub transforms: Vec<String>,
    pub policy: Policy,
    /// Explicit probability budget; wins over `q`.
    pub rpw_q: Option<f64>,
    /// Derive the budget from the model's q-th most probable password.
    pub q: Option<usize>,
    pub topk: usize,
    pub cache_capacity: usize,
    /// Seed for the top-k sampler; drawn from the OS when unset.
    pub seed: Option<u64>,
}

impl CheckerConfig {
    pub fn new<I, S>(transforms: I, policy: Policy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transforms: transforms.into_iter().map(Into::into).collect(),
            policy,
            rpw_q: None,
            q: None,
            topk: DEFAULT_TOPK,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            seed: None,
        }
    }

    pub fn with_rpw_q(mut self, rpw_q: f64) -> Self {
        self.rpw_q = Some(rpw_q);
        self
    }

    pub fn with_q(mut self, q: usize) -> Self {
        self.q = Some(q);
        self
    }

    pub fn with_topk(mut self, topk: usize) -> Self {
        self.topk = topk;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Typo-tolerant password checker.
///
/// Decisions are pure functions of the typed password and the configuration,
/// except for the running ball/neighbourhood maxima, the ChkBl cache and the
/// ChkSelect sampler, all of which are mutated through `&mut self`. Share a
/// checker between threads only behind a mutex.
pub struct Checker {
    transforms: TransformList,
    registry: CorrectorRegistry,
    policy: Policy,
    pwmodel: Arc<dyn PasswordModel>,
    blacklist: Arc<BlackList>,
    rpw_q: Option<f64>,
    topk: usize,
    cache: DecisionCache,
    rng: StdRng,
    max_ball_size: usize,
    max_nh_size: usize,
}

impl Checker {
    /// Builds a checker over the built-in correctors.
    pub fn new(
        config: CheckerConfig,
        pwmodel: Arc<dyn PasswordModel>,
        blacklist: Arc<BlackList>,
    ) -> Result<Self, CheckerError> {
        Self::with_registry(config, CorrectorRegistry::builtin(), pwmodel, blacklist)
    }

    /// Builds a checker resolving corrector names through `registry`.
    ///
    /// # Errors
    ///
    /// - `UnknownCorrector` for a name the registry or weight table lacks
    /// - `InvalidConfiguration` for an empty transform list or `topk == 0`
    pub fn with_registry(
        config: CheckerConfig,
        registry: CorrectorRegistry,
        pwmodel: Arc<dyn PasswordModel>,
        blacklist: Arc<BlackList>,
    ) -> Result<Self, CheckerError> {
        let transforms = TransformList::new(&config.transforms, &registry)?;

        if config.topk == 0 {
            return Err(CheckerError::InvalidConfiguration(
                "topk must be at least 1".to_string(),
            ));
        }

        // Negative budgets are treated as unset.
        let rpw_q = config
            .rpw_q
            .or_else(|| config.q.map(|q| pwmodel.qth(q)))
            .filter(|b| *b >= 0.0);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let checker = Self {
            transforms,
            registry,
            policy: config.policy,
            pwmodel,
            blacklist,
            rpw_q,
            topk: config.topk,
            cache: DecisionCache::new(config.cache_capacity),
            rng,
            max_ball_size: 0,
            max_nh_size: 0,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("{} built (budget={})", checker, checker.budget());

        Ok(checker)
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn transforms(&self) -> &TransformList {
        &self.transforms
    }

    pub fn topk(&self) -> usize {
        self.topk
    }

    /// Probability budget, falling back to [`DEFAULT_RPW_Q`] when unset.
    pub fn budget(&self) -> f64 {
        self.rpw_q.unwrap_or(DEFAULT_RPW_Q)
    }

    /// Swaps the password model; cached ChkBl decisions do not depend on it.
    pub fn set_pwmodel(&mut self, pwmodel: Arc<dyn PasswordModel>) {
        self.pwmodel = pwmodel;
    }

    /// Every fix output of every corrector, passing `keep`. Empty strings are
    /// never candidates.
    fn modify(&self, pw: &str, keep: impl Fn(&str) -> bool) -> Candidates {
        self.transforms
            .names()
            .iter()
            .filter_map(|name| self.registry.lookup(name))
            .flat_map(|corrector| corrector.apply(pw))
            .filter(|c| !c.is_empty() && keep(c.as_str()))
            .collect()
    }

    /// Passwords reachable from `pw` through the active correctors, not
    /// including `pw` itself.
    pub fn get_ball(&mut self, pw: &str) -> Candidates {
        let mut ball = self.modify(pw, |_| true);
        ball.remove(pw);
        self.max_ball_size = self.max_ball_size.max(ball.len());
        ball
    }

    /// Union of the balls of every password in `pws`, plus `pws` themselves.
    pub fn get_ball_union<S: AsRef<str>>(&mut self, pws: &[S]) -> Candidates {
        let mut union = Candidates::new();
        for pw in pws {
            union.extend(self.get_ball(pw.as_ref()));
        }
        union.extend(pws.iter().map(|pw| pw.as_ref().to_string()));
        union
    }

    /// Valid passwords that typo-flagged correctors would map back onto
    /// `pw`, not including `pw` itself.
    pub fn get_nh(&mut self, pw: &str) -> Candidates {
        let mut nh: Candidates = self
            .transforms
            .names()
            .iter()
            .filter_map(|name| self.registry.lookup(name))
            .filter(|corrector| corrector.is_typo())
            .flat_map(|corrector| corrector.apply_typo(pw))
            .filter(|c| is_valid(c))
            .collect();
        nh.remove(pw);
        self.max_nh_size = self.max_nh_size.max(nh.len());
        nh
    }

    pub fn max_ball_size(&self) -> usize {
        if self.max_ball_size == 0 {
            DEFAULT_MAX_BALL_SIZE
        } else {
            self.max_ball_size
        }
    }

    pub fn max_nh_size(&self) -> usize {
        if self.max_nh_size == 0 {
            DEFAULT_MAX_NH_SIZE
        } else {
            self.max_nh_size
        }
    }

    /// Runs the configured policy on `tpw`.
    ///
    /// With `rpw`, answers whether `rpw` is accepted; without, returns the
    /// acceptance set.
    pub fn decide(&mut self, tpw: &str, rpw: Option<&str>) -> Result<Decision, CheckerError> {
        let strategy = self.policy.strategy();
        let accepted = strategy(self, tpw, rpw)?;
        Ok(match rpw {
            Some(rpw) => Decision::Accepted(accepted.contains(rpw)),
            None => Decision::Candidates(accepted),
        })
    }

    /// Whether `rpw` may be accepted when `tpw` was typed.
    pub fn check(&mut self, tpw: &str, rpw: &str) -> Result<bool, CheckerError> {
        Ok(self.decide(tpw, Some(rpw))?.is_accepted())
    }

    /// Every password `tpw` may be accepted for.
    pub fn acceptance_set(&mut self, tpw: &str) -> Result<Candidates, CheckerError> {
        let strategy = self.policy.strategy();
        strategy(self, tpw, None)
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.transforms.names();
        let first = names.first().map(String::as_str).unwrap_or("");
        let last = names.last().map(String::as_str).unwrap_or("");
        write!(
            f,
            "Checker: transforms=({}) [{}...{}] (policy={}) (pwmodel={})",
            names.len(),
            first,
            last,
            self.policy.number(),
            self.pwmodel.label()
        )
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("transforms", &self.transforms.names())
            .field("policy", &self.policy)
            .field("rpw_q", &self.rpw_q)
            .field("topk", &self.topk)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pwmodel::FrequencyModel;

    fn checker(transforms: &[&str], policy: Policy) -> Checker {
        let model = Arc::new(FrequencyModel::from_counts([("password1", 50), ("123456", 50)]));
        let blacklist = Arc::new(BlackList::from_lines(["password1"]));
        Checker::new(CheckerConfig::new(transforms.iter().copied(), policy), model, blacklist)
            .expect("valid configuration")
    }

    #[test]
    fn test_ball_of_swap_case_all() {
        let mut chk = checker(&["swc-all"], Policy::ChkAll);
        let ball = chk.get_ball("Password1");
        assert_eq!(ball, Candidates::from(["pASSWORD1".to_string()]));
    }

    #[test]
    fn test_ball_never_contains_input() {
        let mut chk = checker(&["swc-all", "swc-first", "rm-lastc", "keypress-edit"], Policy::ChkAll);
        for pw in ["Password1", "123456", "abc", "", "aaaaaa"] {
            assert!(!chk.get_ball(pw).contains(pw), "{} in its own ball", pw);
        }
    }

    #[test]
    fn test_ball_union_contains_inputs() {
        let mut chk = checker(&["swc-all"], Policy::ChkAll);
        let union = chk.get_ball_union(&["Password1", "hello123"]);
        assert!(union.contains("Password1"));
        assert!(union.contains("hello123"));
        assert!(union.contains("pASSWORD1"));
        assert!(union.contains("HELLO123"));
    }

    #[test]
    fn test_neighbourhood_is_filtered_and_excludes_input() {
        let mut chk = checker(&["rm-lastc", "swc-first"], Policy::ChkAll);
        let nh = chk.get_nh("secret");
        assert!(!nh.contains("secret"));
        assert!(nh.contains("secret1"));
        assert!(nh.contains("Secret"));
        assert!(nh.iter().all(|pw| is_valid(pw)));

        let short = chk.get_nh("abc");
        assert!(short.is_empty());
    }

    #[test]
    fn test_running_maxima() {
        let mut chk = checker(&["swc-all", "swc-first"], Policy::ChkAll);
        assert_eq!(chk.max_ball_size(), DEFAULT_MAX_BALL_SIZE);
        assert_eq!(chk.max_nh_size(), DEFAULT_MAX_NH_SIZE);

        chk.get_ball("Password1");
        assert_eq!(chk.max_ball_size(), 2);
        chk.get_ball("123456");
        assert_eq!(chk.max_ball_size(), 2);

        chk.get_nh("Password1");
        assert_eq!(chk.max_nh_size(), 2);
    }

    #[test]
    fn test_zero_topk_is_invalid() {
        let model = Arc::new(FrequencyModel::from_counts([("password1", 1)]));
        let config = CheckerConfig::new(["keypress-edit"], Policy::ChkSelect).with_topk(0);
        let result = Checker::new(config, model, Arc::new(BlackList::default()));
        assert!(matches!(result, Err(CheckerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_budget_resolution() {
        let model = Arc::new(FrequencyModel::from_counts([("password1", 3), ("123456", 1)]));
        let bl = Arc::new(BlackList::default());

        let unset = Checker::new(CheckerConfig::new(["same"], Policy::ChkAOp), model.clone(), bl.clone()).unwrap();
        assert_eq!(unset.budget(), DEFAULT_RPW_Q);

        let negative = CheckerConfig::new(["same"], Policy::ChkAOp).with_rpw_q(-1.0);
        let negative = Checker::new(negative, model.clone(), bl.clone()).unwrap();
        assert_eq!(negative.budget(), DEFAULT_RPW_Q);

        let from_q = CheckerConfig::new(["same"], Policy::ChkAOp).with_q(2);
        let from_q = Checker::new(from_q, model.clone(), bl.clone()).unwrap();
        assert!((from_q.budget() - 0.25).abs() < 1e-12);

        let explicit = CheckerConfig::new(["same"], Policy::ChkAOp).with_rpw_q(0.5).with_q(2);
        let explicit = Checker::new(explicit, model, bl).unwrap();
        assert_eq!(explicit.budget(), 0.5);
    }

    #[test]
    fn test_display() {
        let chk = checker(&["swc-all", "rm-lastc"], Policy::ChkBl);
        assert_eq!(
            chk.to_string(),
            "Checker: transforms=(3) [same...rm-lastc] (policy=2) (pwmodel=FrequencyModel(2 passwords))"
        );
    }

    #[test]
    fn test_decide_with_and_without_real_password() {
        let mut chk = checker(&["swc-all"], Policy::ChkAll);
        assert_eq!(chk.decide("Password1", Some("pASSWORD1")).unwrap(), Decision::Accepted(true));
        assert_eq!(chk.decide("Password1", Some("password1")).unwrap(), Decision::Accepted(false));

        let set = chk.decide("Password1", None).unwrap().into_candidates().unwrap();
        assert_eq!(
            set,
            Candidates::from(["Password1".to_string(), "pASSWORD1".to_string()])
        );
    }
}
