//! Substitution detector - leet-speak reversal against the dictionary.

use std::collections::{HashSet, VecDeque};

use crate::dictionary::Dictionary;

/// Letter and the symbols commonly substituted for it.
const SUBSTITUTIONS: [(char, &[char]); 9] = [
    ('a', &['@', '4']),
    ('e', &['3']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['7']),
    ('b', &['8']),
    ('g', &['9']),
    ('l', &['1']),
];

/// Upper bound on generated variants.
pub const MAX_VARIANTS: usize = 4096;

/// Every string reachable from the lower-cased password by repeatedly
/// replacing all occurrences of one substitute with its letter.
///
/// The lower-cased password itself is the first entry. Generation is
/// breadth-first and stops at [`MAX_VARIANTS`].
pub fn substitution_variants(password: &str) -> Vec<String> {
    variants_capped(password, MAX_VARIANTS)
}

fn variants_capped(password: &str, cap: usize) -> Vec<String> {
    let start = password.to_lowercase();
    let mut seen: HashSet<String> = HashSet::from([start.clone()]);
    let mut variants = vec![start.clone()];
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for (letter, substitutes) in SUBSTITUTIONS {
            for sub in substitutes {
                if variants.len() >= cap {
                    return variants;
                }
                if !current.contains(*sub) {
                    continue;
                }
                let rewritten = current.replace(*sub, &letter.to_string());
                if seen.insert(rewritten.clone()) {
                    variants.push(rewritten.clone());
                    queue.push_back(rewritten);
                }
            }
        }
    }

    variants
}

/// Returns `true` if any variant of the password is a dictionary word.
pub fn test_substitutions(password: &str, dictionary: &Dictionary) -> bool {
    substitution_variants(password)
        .iter()
        .any(|variant| dictionary.contains(variant))
}
