//! Case correctors - caps lock and shift-on-first-letter mistakes.

fn swap(c: char) -> char {
    if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c.to_ascii_uppercase()
    }
}

fn capitalize(password: &str) -> String {
    let mut chars = password.chars();
    match chars.next() {
        Some(first) => first
            .to_ascii_uppercase()
            .to_string()
            + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

fn has_letters(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_alphabetic())
}

fn is_upper(password: &str) -> bool {
    has_letters(password) && !password.chars().any(|c| c.is_ascii_lowercase())
}

fn is_capitalized(password: &str) -> bool {
    let mut chars = password.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => !chars.any(|c| c.is_ascii_uppercase()),
        _ => false,
    }
}

/// `swc-all`: caps lock was on, so every letter has the wrong case.
pub fn swap_case_all(password: &str) -> Vec<String> {
    if password.is_empty() {
        return Vec::new();
    }
    vec![password.chars().map(swap).collect()]
}

/// `swc-first`: the first character has the wrong case.
pub fn swap_case_first(password: &str) -> Vec<String> {
    let mut chars = password.chars();
    match chars.next() {
        Some(first) => vec![swap(first).to_string() + chars.as_str()],
        None => Vec::new(),
    }
}

/// `cap2up`: typed capitalized, meant all upper case.
pub fn capitalized_to_upper(password: &str) -> Vec<String> {
    if is_capitalized(password) {
        vec![password.to_ascii_uppercase()]
    } else {
        Vec::new()
    }
}

/// `up2cap`: typed all upper case, meant capitalized.
pub fn upper_to_capitalized(password: &str) -> Vec<String> {
    if is_upper(password) {
        vec![capitalize(password)]
    } else {
        Vec::new()
    }
}

/// `upncap`: the password may have been meant upper case or capitalized.
pub fn upper_and_capitalized(password: &str) -> Vec<String> {
    if !has_letters(password) {
        return Vec::new();
    }
    vec![password.to_ascii_uppercase(), capitalize(password)]
}

/// Typo side of `upncap`: both forms collapse to lower case when mistyped.
pub fn lower(password: &str) -> Vec<String> {
    if !has_letters(password) {
        return Vec::new();
    }
    vec![password.to_ascii_lowercase()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_case_all() {
        assert_eq!(swap_case_all("Password1"), vec!["pASSWORD1".to_string()]);
        assert!(swap_case_all("").is_empty());
    }

    #[test]
    fn test_swap_case_first() {
        assert_eq!(swap_case_first("Password1"), vec!["password1".to_string()]);
        assert_eq!(swap_case_first("1password"), vec!["1password".to_string()]);
    }

    #[test]
    fn test_capitalized_to_upper() {
        assert_eq!(capitalized_to_upper("Secret12"), vec!["SECRET12".to_string()]);
        assert!(capitalized_to_upper("secret12").is_empty());
        assert!(capitalized_to_upper("SeCret12").is_empty());
    }

    #[test]
    fn test_upper_to_capitalized() {
        assert_eq!(upper_to_capitalized("SECRET12"), vec!["Secret12".to_string()]);
        assert!(upper_to_capitalized("Secret12").is_empty());
        assert!(upper_to_capitalized("123456").is_empty());
    }

    #[test]
    fn test_upper_and_capitalized_is_multi_output() {
        let out = upper_and_capitalized("secret12");
        assert_eq!(out, vec!["SECRET12".to_string(), "Secret12".to_string()]);
        assert_eq!(lower("SECRET12"), vec!["secret12".to_string()]);
    }
}
