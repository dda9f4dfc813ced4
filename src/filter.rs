//! Password filter applied wherever candidate sets are narrowed.

/// Shortest password the checker ever reasons about.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Returns `true` if the password is ASCII-only and at least
/// [`MIN_PASSWORD_LENGTH`] characters long.
pub fn is_valid(password: &str) -> bool {
    password.is_ascii() && password.len() >= MIN_PASSWORD_LENGTH
}

/// Character length, counted the same way for ASCII and non-ASCII input.
pub(crate) fn char_len(password: &str) -> usize {
    password.chars().count()
}
