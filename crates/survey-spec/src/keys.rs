use std::collections::HashSet;

use rand::{Rng, distributions::Alphanumeric};

pub const RESPONSE_GROUP_KEY: &str = "rg";
pub const SINGLE_CHOICE_KEY: &str = "scg";
pub const MULTIPLE_CHOICE_KEY: &str = "mcg";
pub const LIKERT_SCALE_GROUP_KEY: &str = "lsg";
pub const NUMERIC_INPUT_KEY: &str = "num";
pub const DATE_PICKER_KEY: &str = "date";
pub const SLIDER_KEY: &str = "slider";
pub const SLIDER_CATEGORICAL_KEY: &str = "scc";
pub const MATRIX_KEY: &str = "mat";
pub const EQ5D_KEY: &str = "eq5d";

/// Length of keys generated for anonymous label components.
pub const RANDOM_KEY_LENGTH: usize = 4;

/// Short alphanumeric key for components nobody addresses by path.
pub fn random_key(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Draws random keys until one is not in `taken`, then records it.
pub(crate) fn unique_random_key(taken: &mut HashSet<String>) -> String {
    loop {
        let key = random_key(RANDOM_KEY_LENGTH);
        if taken.insert(key.clone()) {
            return key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_keys_have_requested_length() {
        let key = random_key(RANDOM_KEY_LENGTH);
        assert_eq!(key.len(), RANDOM_KEY_LENGTH);
        assert!(key.chars().all(|ch| ch.is_ascii_alphanumeric()));
    }

    #[test]
    fn unique_keys_avoid_taken_set() {
        let mut taken = HashSet::from(["row1".to_string()]);
        let first = unique_random_key(&mut taken);
        let second = unique_random_key(&mut taken);
        assert_ne!(first, second);
        assert_eq!(taken.len(), 3);
    }
}
