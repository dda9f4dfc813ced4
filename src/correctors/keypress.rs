//! Keypress corrector - a single adjacent key hit, or a doubled keypress.

const ROWS: [&str; 4] = ["1234567890-=", "qwertyuiop[]", "asdfghjkl;'", "zxcvbnm,./"];

/// Keys physically adjacent on a QWERTY keyboard, preserving letter case.
fn nearby_keys(c: char) -> Vec<char> {
    let lower = c.to_ascii_lowercase();
    let Some((row, col)) = ROWS
        .iter()
        .enumerate()
        .find_map(|(r, keys)| keys.find(lower).map(|col| (r, col)))
    else {
        return Vec::new();
    };

    let mut keys = Vec::new();
    let same_row = ROWS[row].as_bytes();
    if col > 0 {
        keys.push(same_row[col - 1] as char);
    }
    if col + 1 < same_row.len() {
        keys.push(same_row[col + 1] as char);
    }
    for adjacent in [row.checked_sub(1), Some(row + 1)].into_iter().flatten() {
        if let Some(other) = ROWS.get(adjacent).map(|r| r.as_bytes()) {
            if col < other.len() {
                keys.push(other[col] as char);
            }
        }
    }

    if c.is_ascii_uppercase() {
        keys.iter().map(|k| k.to_ascii_uppercase()).collect()
    } else {
        keys
    }
}

fn substitutions(chars: &[char]) -> Vec<String> {
    let mut out = Vec::new();
    for (i, c) in chars.iter().enumerate() {
        for key in nearby_keys(*c) {
            let mut candidate = chars.to_vec();
            candidate[i] = key;
            out.push(candidate.into_iter().collect());
        }
    }
    out
}

/// Fix side: undo one adjacent-key substitution or one extra keypress.
pub fn fix_keypress(password: &str) -> Vec<String> {
    let chars: Vec<char> = password.chars().collect();
    let mut out = substitutions(&chars);
    for i in 0..chars.len() {
        let mut candidate = chars.clone();
        candidate.remove(i);
        out.push(candidate.into_iter().collect());
    }
    out
}

/// Typo side: one adjacent-key substitution or one extra adjacent keypress.
pub fn typo_keypress(password: &str) -> Vec<String> {
    let chars: Vec<char> = password.chars().collect();
    let mut out = substitutions(&chars);
    for (i, c) in chars.iter().enumerate() {
        for key in nearby_keys(*c) {
            let mut candidate = chars.clone();
            candidate.insert(i + 1, key);
            out.push(candidate.into_iter().collect());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_keys_middle_of_keyboard() {
        let keys = nearby_keys('g');
        assert!(keys.contains(&'f'));
        assert!(keys.contains(&'h'));
        assert!(keys.contains(&'t'));
        assert!(keys.contains(&'b'));
    }

    #[test]
    fn test_nearby_keys_keep_case() {
        assert!(nearby_keys('G').iter().all(|k| k.is_ascii_uppercase()));
        assert!(nearby_keys(' ').is_empty());
    }

    #[test]
    fn test_fix_keypress_undoes_extra_key() {
        let out = fix_keypress("passwoord");
        assert!(out.contains(&"password".to_string()));
    }

    #[test]
    fn test_fix_keypress_undoes_adjacent_substitution() {
        let out = fix_keypress("passwird");
        assert!(out.contains(&"password".to_string()));
    }

    #[test]
    fn test_typo_keypress_produces_substitutions() {
        let out = typo_keypress("password");
        assert!(out.contains(&"passwird".to_string()));
        assert!(out.contains(&"passwoird".to_string()));
        assert!(fix_keypress("").is_empty());
    }
}
