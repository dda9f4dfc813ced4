//! Shift correctors - a shift key pressed or missed on trailing characters.
//!
//! Non-letter keys use the US layout pairs below; letters toggle case.

const UNSHIFTED: &str = "`1234567890-=[]\\;',./";
const SHIFTED: &str = "~!@#$%^&*()_+{}|:\"<>?";

fn toggle_shift(c: char) -> Option<char> {
    if c.is_ascii_alphabetic() {
        return Some(if c.is_ascii_uppercase() {
            c.to_ascii_lowercase()
        } else {
            c.to_ascii_uppercase()
        });
    }
    if let Some(i) = UNSHIFTED.find(c) {
        return SHIFTED[i..].chars().next();
    }
    SHIFTED.find(c).and_then(|i| UNSHIFTED[i..].chars().next())
}

fn replace_last(password: &str, f: impl Fn(char) -> Option<char>) -> Vec<String> {
    let Some(last) = password.chars().last() else {
        return Vec::new();
    };
    match f(last) {
        Some(c) => {
            let head = &password[..password.len() - last.len_utf8()];
            vec![format!("{}{}", head, c)]
        }
        None => Vec::new(),
    }
}

/// `sws-last1`: shift state of the last character is wrong.
pub fn toggle_shift_last(password: &str) -> Vec<String> {
    replace_last(password, toggle_shift)
}

/// `sws-lastn`: shift state of the whole trailing run of non-letter keys
/// is wrong.
pub fn toggle_shift_trailing(password: &str) -> Vec<String> {
    let tail: Vec<char> = password
        .chars()
        .rev()
        .take_while(|c| !c.is_ascii_alphabetic() && toggle_shift(*c).is_some())
        .collect();
    if tail.is_empty() {
        return Vec::new();
    }

    let head_len: usize = password.len() - tail.iter().map(|c| c.len_utf8()).sum::<usize>();
    let mut out = password[..head_len].to_string();
    out.extend(tail.iter().rev().filter_map(|c| toggle_shift(*c)));
    vec![out]
}

/// `n2s-last`: a trailing digit typed where the shifted symbol was meant.
pub fn last_digit_to_symbol(password: &str) -> Vec<String> {
    replace_last(password, |c| {
        if c.is_ascii_digit() {
            toggle_shift(c)
        } else {
            None
        }
    })
}

pub fn last_symbol_to_digit(password: &str) -> Vec<String> {
    replace_last(password, |c| toggle_shift(c).filter(|d| d.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_shift_pairs() {
        assert_eq!(toggle_shift('1'), Some('!'));
        assert_eq!(toggle_shift('?'), Some('/'));
        assert_eq!(toggle_shift('a'), Some('A'));
        assert_eq!(toggle_shift(' '), None);
    }

    #[test]
    fn test_toggle_shift_last() {
        assert_eq!(toggle_shift_last("secret1"), vec!["secret!".to_string()]);
        assert_eq!(toggle_shift_last("secreT"), vec!["secret".to_string()]);
        assert!(toggle_shift_last("secret ").is_empty());
    }

    #[test]
    fn test_toggle_shift_trailing_run() {
        assert_eq!(toggle_shift_trailing("secret123"), vec!["secret!@#".to_string()]);
        assert_eq!(toggle_shift_trailing("secret!@#"), vec!["secret123".to_string()]);
        assert!(toggle_shift_trailing("secret").is_empty());
    }

    #[test]
    fn test_digit_symbol_swap_on_last() {
        assert_eq!(last_digit_to_symbol("secret1"), vec!["secret!".to_string()]);
        assert!(last_digit_to_symbol("secret!").is_empty());
        assert_eq!(last_symbol_to_digit("secret!"), vec!["secret1".to_string()]);
        assert!(last_symbol_to_digit("secret?").is_empty());
    }
}
