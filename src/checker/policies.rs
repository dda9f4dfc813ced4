//! The six acceptance policies.
//!
//! Each strategy maps a typed password to its acceptance set. ChkBlspcl,
//! BudgetVeto and ChkSelect are experimental and keep their partial
//! semantics as they are.

use std::collections::BTreeMap;

use rand::Rng;

use super::optimizer::most_valuable_under_budget;
use super::{Candidates, Checker, CheckerError};
use crate::filter::{MIN_PASSWORD_LENGTH, char_len};
use crate::pwmodel::PasswordModel;

/// Strategy signature: checker, typed password, optional real password.
pub type PolicyFn = fn(&mut Checker, &str, Option<&str>) -> Result<Candidates, CheckerError>;

/// Acceptance policy, numbered as in the evaluation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// 1: accept the whole ball.
    ChkAll,
    /// 2: accept the ball minus short or blacklisted corrections.
    ChkBl,
    /// 3: accept clean corrections plus at most one blacklisted one.
    ChkBlspcl,
    /// 4: accept the ball only while its total weight stays under budget.
    BudgetVeto,
    /// 5: accept the most useful corrections that fit in the budget.
    ChkAOp,
    /// 6: accept a random sample of at most `topk` corrections.
    ChkSelect,
}

const STRATEGIES: [(Policy, &str, PolicyFn); 6] = [
    (Policy::ChkAll, "ChkAll", chk_all),
    (Policy::ChkBl, "ChkBl", chk_bl),
    (Policy::ChkBlspcl, "ChkBlspcl", chk_bl_special),
    (Policy::BudgetVeto, "BudgetVeto", budget_veto),
    (Policy::ChkAOp, "ChkAOp", chk_approx_optimal),
    (Policy::ChkSelect, "ChkSelect", chk_select),
];

impl Policy {
    /// Resolves a policy from its number (1 to 6).
    pub fn from_number(n: u8) -> Option<Self> {
        STRATEGIES.get(usize::from(n).checked_sub(1)?).map(|(p, _, _)| *p)
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn name(self) -> &'static str {
        STRATEGIES[self.index()].1
    }

    pub(crate) fn strategy(self) -> PolicyFn {
        STRATEGIES[self.index()].2
    }

    fn index(self) -> usize {
        match self {
            Policy::ChkAll => 0,
            Policy::ChkBl => 1,
            Policy::ChkBlspcl => 2,
            Policy::BudgetVeto => 3,
            Policy::ChkAOp => 4,
            Policy::ChkSelect => 5,
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn chk_all(checker: &mut Checker, tpw: &str, _rpw: Option<&str>) -> Result<Candidates, CheckerError> {
    let mut accepted = checker.get_ball(tpw);
    accepted.insert(tpw.to_string());
    Ok(accepted)
}

fn chk_bl(checker: &mut Checker, tpw: &str, _rpw: Option<&str>) -> Result<Candidates, CheckerError> {
    if let Some(cached) = checker.cache.get(tpw) {
        return Ok(cached.clone());
    }

    let blacklist = checker.blacklist.clone();
    let mut accepted = checker.modify(tpw, |c| {
        char_len(c) >= MIN_PASSWORD_LENGTH && !blacklist.contains(c)
    });
    // The typed password is accepted for itself even when blacklisted.
    accepted.insert(tpw.to_string());

    checker.cache.insert(tpw, accepted.clone());
    Ok(accepted)
}

fn chk_bl_special(
    checker: &mut Checker,
    tpw: &str,
    _rpw: Option<&str>,
) -> Result<Candidates, CheckerError> {
    let mut clean = Candidates::new();
    let mut first_blacklisted: Option<String> = None;

    for name in checker.transforms.names() {
        let Some(corrector) = checker.registry.lookup(name) else {
            continue;
        };
        for candidate in corrector.apply(tpw) {
            if char_len(&candidate) < MIN_PASSWORD_LENGTH {
                continue;
            }
            if checker.blacklist.contains(&candidate) {
                first_blacklisted.get_or_insert(candidate);
            } else {
                clean.insert(candidate);
            }
        }
    }

    clean.extend(first_blacklisted);
    Ok(clean)
}

fn budget_veto(checker: &mut Checker, tpw: &str, rpw: Option<&str>) -> Result<Candidates, CheckerError> {
    let mut accepted = Candidates::from([tpw.to_string()]);
    if rpw == Some(tpw) {
        return Ok(accepted);
    }

    accepted.extend(checker.modify(tpw, |_| true));
    let ball_mass: f64 = accepted.iter().map(|pw| checker.pwmodel.get(pw)).sum();
    if ball_mass > checker.budget() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "no typo correction: ball of {} passwords weighs {} over budget {}",
            accepted.len(),
            ball_mass,
            checker.budget()
        );
        return Ok(Candidates::from([tpw.to_string()]));
    }
    Ok(accepted)
}

fn chk_approx_optimal(
    checker: &mut Checker,
    tpw: &str,
    _rpw: Option<&str>,
) -> Result<Candidates, CheckerError> {
    let mut utilities: BTreeMap<String, f64> = BTreeMap::new();
    for name in checker.transforms.names() {
        let Some(corrector) = checker.registry.lookup(name) else {
            continue;
        };
        let mut outputs = corrector.apply(tpw);
        if outputs.len() != 1 {
            continue;
        }
        let Some(candidate) = outputs.pop() else {
            continue;
        };
        if char_len(&candidate) < MIN_PASSWORD_LENGTH {
            continue;
        }
        let utility = checker.pwmodel.get(&candidate) * checker.transforms.weight(name);
        *utilities.entry(candidate).or_insert(0.0) += utility;
    }
    utilities.remove(tpw);

    let remaining = checker.budget() - checker.pwmodel.get(tpw);
    let pwmodel = checker.pwmodel.clone();
    let chosen = most_valuable_under_budget(&utilities, |pw| pwmodel.get(pw), remaining)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "approximate optimal: {} of {} candidates fit in budget {}",
        chosen.len(),
        utilities.len(),
        remaining
    );

    let mut accepted = Candidates::from([tpw.to_string()]);
    accepted.extend(chosen);
    Ok(accepted)
}

/// Draws `topk` indices uniformly with replacement, so fewer than `topk`
/// distinct corrections may survive. The typed password takes one slot
/// whenever the identity corrector produced it.
fn chk_select(checker: &mut Checker, tpw: &str, _rpw: Option<&str>) -> Result<Candidates, CheckerError> {
    let population = checker.modify(tpw, |_| true);
    let k = checker.topk;
    if population.len() <= k {
        return Ok(population);
    }

    let mut sampled = Candidates::new();
    let mut draws = k;
    if population.contains(tpw) {
        sampled.insert(tpw.to_string());
        draws -= 1;
    }

    let others: Vec<&String> = population.iter().filter(|pw| pw.as_str() != tpw).collect();
    for _ in 0..draws {
        let i = checker.rng.random_range(0..others.len());
        sampled.insert(others[i].clone());
    }
    Ok(sampled)
}
