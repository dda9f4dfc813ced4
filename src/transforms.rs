//! Transform lists and their normalized corrector weights.

use std::collections::HashMap;

use crate::checker::CheckerError;
use crate::correctors::CorrectorRegistry;

/// Name of the identity corrector every list contains.
pub const IDENTITY: &str = "same";

/// Number of logins each corrector fixed in the measurement study.
pub const TYPO_FIX_COUNTS: [(&str, u32); 18] = [
    ("rm-lastl", 59),
    ("rm-firstc", 55),
    ("swc-all", 1698),
    ("sws-lastn", 14),
    ("rm-lastd", 60),
    ("upncap", 13),
    ("same", 90234),
    ("swc-first", 209),
    ("sws-last1", 19),
    ("cap2up", 5),
    ("n2s-last", 9),
    ("add1-last", 5),
    ("rm-lasts", 72),
    ("kclose", 1385),
    ("other", 1918),
    ("tcerror", 18),
    ("rm-lastc", 191),
    ("keypress-edit", 1000),
];

/// Count assigned to a corrector missing from the weight table.
const UNKNOWN_FIX_COUNT: f64 = -1.0;

fn fix_count(name: &str) -> f64 {
    TYPO_FIX_COUNTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c as f64)
        .unwrap_or(UNKNOWN_FIX_COUNT)
}

/// Ordered, deduplicated corrector names plus their normalized weights.
#[derive(Debug, Clone)]
pub struct TransformList {
    names: Vec<String>,
    weights: HashMap<String, f64>,
}

impl TransformList {
    /// Builds a list from configured names, force-inserting [`IDENTITY`] at
    /// the front when it is missing.
    ///
    /// # Errors
    ///
    /// - `UnknownCorrector` if a name is not in the registry or has no fix count
    /// - `InvalidConfiguration` if the list is empty or the counts do not sum
    ///   to a positive total
    pub fn new<I, S>(names: I, registry: &CorrectorRegistry) -> Result<Self, CheckerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !list.iter().any(|n| n == name) {
                list.push(name.to_string());
            }
        }
        if !list.is_empty() && !list.iter().any(|n| n == IDENTITY) {
            list.insert(0, IDENTITY.to_string());
        }

        for name in &list {
            if !registry.contains(name) {
                return Err(CheckerError::UnknownCorrector(name.clone()));
            }
        }

        let weights = normalize(&list)?;
        Ok(Self { names: list, weights })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Normalized weight of a corrector, 0.0 for names not in the list.
    pub fn weight(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(names: &[String]) -> Result<HashMap<String, f64>, CheckerError> {
    if names.is_empty() {
        return Err(CheckerError::InvalidConfiguration(
            "transform list is empty".to_string(),
        ));
    }

    let counts: Vec<(String, f64)> = names.iter().map(|n| (n.clone(), fix_count(n))).collect();
    if let Some((name, _)) = counts.iter().find(|(_, c)| *c < 0.0) {
        return Err(CheckerError::UnknownCorrector(name.clone()));
    }

    let total: f64 = counts.iter().map(|(_, c)| c).sum();
    if total <= 0.0 {
        return Err(CheckerError::InvalidConfiguration(format!(
            "fix counts of {:?} sum to {}",
            names, total
        )));
    }

    Ok(counts.into_iter().map(|(n, c)| (n, c / total)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CorrectorRegistry {
        CorrectorRegistry::builtin()
    }

    #[test]
    fn test_identity_is_force_inserted_first() {
        let list = TransformList::new(["swc-all", "rm-lastc"], &registry()).unwrap();
        assert_eq!(list.names(), &["same", "swc-all", "rm-lastc"]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let list = TransformList::new(["same", "swc-all", "swc-all"], &registry()).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let list = TransformList::new(
            ["same", "swc-all", "swc-first", "rm-lastc", "rm-firstc", "n2s-last"],
            &registry(),
        )
        .unwrap();
        let total: f64 = list.names().iter().map(|n| list.weight(n)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_is_proportional_to_fix_count() {
        let list = TransformList::new(["swc-all"], &registry()).unwrap();
        let expected = 1698.0 / (1698.0 + 90234.0);
        assert!((list.weight("swc-all") - expected).abs() < 1e-12);
        assert_eq!(list.weight("rm-lastc"), 0.0);
    }

    #[test]
    fn test_unknown_corrector_fails_fast() {
        let result = TransformList::new(["swc-all", "no-such-edit"], &registry());
        assert!(matches!(result, Err(CheckerError::UnknownCorrector(n)) if n == "no-such-edit"));
    }

    #[test]
    fn test_registered_corrector_without_fix_count_fails() {
        let mut registry = registry();
        let same = *registry.lookup("same").unwrap();
        registry.register("custom", same);

        let result = TransformList::new(["custom"], &registry);
        assert!(matches!(result, Err(CheckerError::UnknownCorrector(n)) if n == "custom"));
    }

    #[test]
    fn test_empty_list_is_invalid() {
        let result = TransformList::new(Vec::<String>::new(), &registry());
        assert!(matches!(result, Err(CheckerError::InvalidConfiguration(_))));
    }
}
