//! Trim correctors - an extra or missing character at either end.

/// Printable ASCII a stray keypress can add (space excluded).
fn printable() -> impl Iterator<Item = char> {
    (b'!'..=b'~').map(char::from)
}

fn remove_last_if(password: &str, pred: impl Fn(char) -> bool) -> Vec<String> {
    match password.chars().last() {
        Some(last) if pred(last) => vec![password[..password.len() - last.len_utf8()].to_string()],
        _ => Vec::new(),
    }
}

fn append_each(password: &str, chars: impl Iterator<Item = char>) -> Vec<String> {
    chars.map(|c| format!("{}{}", password, c)).collect()
}

/// `rm-lastc`: an extra character was typed at the end.
pub fn remove_last_char(password: &str) -> Vec<String> {
    remove_last_if(password, |_| true)
}

pub fn append_any(password: &str) -> Vec<String> {
    append_each(password, printable())
}

/// `rm-firstc`: an extra character was typed at the start.
pub fn remove_first_char(password: &str) -> Vec<String> {
    let mut chars = password.chars();
    match chars.next() {
        Some(_) => vec![chars.as_str().to_string()],
        None => Vec::new(),
    }
}

pub fn prepend_any(password: &str) -> Vec<String> {
    printable().map(|c| format!("{}{}", c, password)).collect()
}

/// `rm-lasts`: a stray symbol at the end.
pub fn remove_last_symbol(password: &str) -> Vec<String> {
    remove_last_if(password, |c| c.is_ascii_punctuation())
}

pub fn append_symbol(password: &str) -> Vec<String> {
    append_each(password, printable().filter(|c| c.is_ascii_punctuation()))
}

/// `rm-lastd`: a stray digit at the end.
pub fn remove_last_digit(password: &str) -> Vec<String> {
    remove_last_if(password, |c| c.is_ascii_digit())
}

pub fn append_digit(password: &str) -> Vec<String> {
    append_each(password, printable().filter(|c| c.is_ascii_digit()))
}

/// `rm-lastl`: a stray letter at the end.
pub fn remove_last_letter(password: &str) -> Vec<String> {
    remove_last_if(password, |c| c.is_ascii_alphabetic())
}

pub fn append_letter(password: &str) -> Vec<String> {
    append_each(password, printable().filter(|c| c.is_ascii_alphabetic()))
}

/// `add1-last`: the trailing `1` was forgotten.
pub fn append_one(password: &str) -> Vec<String> {
    if password.is_empty() {
        return Vec::new();
    }
    vec![format!("{}1", password)]
}

pub fn remove_trailing_one(password: &str) -> Vec<String> {
    remove_last_if(password, |c| c == '1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_last_char() {
        assert_eq!(remove_last_char("secret1!"), vec!["secret1".to_string()]);
        assert!(remove_last_char("").is_empty());
    }

    #[test]
    fn test_remove_first_char() {
        assert_eq!(remove_first_char("!secret1"), vec!["secret1".to_string()]);
        assert!(remove_first_char("").is_empty());
    }

    #[test]
    fn test_remove_last_by_class() {
        assert_eq!(remove_last_symbol("secret1!"), vec!["secret1".to_string()]);
        assert!(remove_last_symbol("secret1").is_empty());
        assert_eq!(remove_last_digit("secret1"), vec!["secret".to_string()]);
        assert!(remove_last_digit("secret!").is_empty());
        assert_eq!(remove_last_letter("secret1x"), vec!["secret1".to_string()]);
    }

    #[test]
    fn test_append_typos_cover_their_class() {
        assert_eq!(append_digit("secret").len(), 10);
        assert_eq!(append_letter("secret").len(), 52);
        assert_eq!(append_any("secret").len(), 94);
        assert!(append_symbol("secret").iter().all(|pw| pw.len() == 7));
        assert!(prepend_any("secret").contains(&"!secret".to_string()));
    }

    #[test]
    fn test_add1_last_round_trip() {
        assert_eq!(append_one("secret"), vec!["secret1".to_string()]);
        assert_eq!(remove_trailing_one("secret1"), vec!["secret".to_string()]);
        assert!(remove_trailing_one("secret2").is_empty());
    }
}
