//! Login evaluation - runs a checker on a typed and a real password.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::checker::{Checker, CheckerError};
use crate::filter::is_valid;

/// How a login attempt was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Typed and real password are identical.
    Exact,
    /// The real password is in the typed password's acceptance set.
    TypoAccepted,
    Rejected,
}

/// Result of a login evaluation. `outcome` is `None` when the evaluation was
/// cancelled or failed; `reasons` says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginEvaluation {
    pub outcome: Option<LoginOutcome>,
    pub reasons: Vec<String>,
}

impl LoginEvaluation {
    /// `true` for an exact match or an accepted typo.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self.outcome,
            Some(LoginOutcome::Exact | LoginOutcome::TypoAccepted)
        )
    }
}

/// Decides whether `typed` should log in as `real`.
///
/// # Arguments
/// * `checker` - The policy engine to consult
/// * `typed` - What the user entered
/// * `real` - The registered password
/// * `token` - Optional cancellation token (async feature only), checked
///   before the acceptance set is computed
pub fn evaluate_login(
    checker: &mut Checker,
    typed: &SecretString,
    real: &SecretString,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> Result<LoginEvaluation, CheckerError> {
    let mut reasons = Vec::new();
    let tpw = typed.expose_secret();
    let rpw = real.expose_secret();

    if tpw == rpw {
        return Ok(LoginEvaluation {
            outcome: Some(LoginOutcome::Exact),
            reasons,
        });
    }

    #[cfg(feature = "async")]
    {
        if let Some(ref t) = token {
            if t.is_cancelled() {
                reasons.push("Evaluation cancelled".to_string());
                return Ok(LoginEvaluation {
                    outcome: None,
                    reasons,
                });
            }
        }
    }

    if !is_valid(tpw) {
        reasons.push("Typed password is too short or not ASCII".to_string());
    }

    let outcome = if checker.check(tpw, rpw)? {
        reasons.push(format!("Accepted as a typo under {}", checker.policy()));
        LoginOutcome::TypoAccepted
    } else {
        reasons.push(format!("Not in the {} acceptance set", checker.policy()));
        LoginOutcome::Rejected
    };

    Ok(LoginEvaluation {
        outcome: Some(outcome),
        reasons,
    })
}

/// Async version that sends the evaluation via channel. Checker errors are
/// reported as an evaluation without outcome.
#[cfg(feature = "async")]
pub async fn evaluate_login_tx(
    checker: &mut Checker,
    typed: &SecretString,
    real: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<LoginEvaluation>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("login evaluation is about to start...");

    let evaluation = match evaluate_login(checker, typed, real, Some(token)) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Login evaluation failed: {}", e);
            LoginEvaluation {
                outcome: None,
                reasons: vec![format!("Error: {}", e)],
            }
        }
    };

    if let Err(e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send login evaluation result: {}", e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::blacklist::BlackList;
    use crate::checker::presets::build_preset;
    use crate::pwmodel::FrequencyModel;
    use std::sync::Arc;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn checker() -> Checker {
        let model = Arc::new(FrequencyModel::from_counts([("password1", 10)]));
        build_preset("ChkAll_Top2", model, Arc::new(BlackList::default())).expect("preset exists")
    }

    #[tokio::test]
    async fn test_evaluate_with_cancellation() {
        let mut chk = checker();
        let token = CancellationToken::new();
        token.cancel();

        let evaluation =
            evaluate_login(&mut chk, &secret("sECRET123"), &secret("Secret123"), Some(token)).unwrap();

        assert!(evaluation.outcome.is_none());
        assert!(!evaluation.reasons.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_without_cancellation() {
        let mut chk = checker();
        let token = CancellationToken::new();

        let evaluation =
            evaluate_login(&mut chk, &secret("sECRET123"), &secret("Secret123"), Some(token)).unwrap();

        assert_eq!(evaluation.outcome, Some(LoginOutcome::TypoAccepted));
    }

    #[tokio::test]
    async fn test_evaluate_login_tx() {
        let mut chk = checker();
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        evaluate_login_tx(&mut chk, &secret("sECRET123"), &secret("Secret123"), token, tx).await;

        let evaluation = rx.recv().await.expect("Should receive evaluation");
        assert!(evaluation.is_accepted());
    }
}
