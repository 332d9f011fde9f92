//! Keyboard-adjacency detector.

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

const WALK_LENGTH: usize = 4;

/// Returns `true` if the lower-cased password contains four horizontally
/// adjacent keys, in either direction.
pub fn test_keyboard_patterns(password: &str) -> bool {
    let lower = password.to_lowercase();

    KEYBOARD_ROWS.iter().any(|row| {
        let keys: Vec<char> = row.chars().collect();
        keys.windows(WALK_LENGTH).any(|window| {
            let forward: String = window.iter().collect();
            let reverse: String = window.iter().rev().collect();
            lower.contains(&forward) || lower.contains(&reverse)
        })
    })
}
