//! Random password generation.
//!
//! Samples uniformly from the selected character classes using the OS
//! CSPRNG. Look-alike exclusion removes `O`, `l`, `0`, `1` and `|`.

use crate::error::{CryptoError, CryptoResult};
use rand::{rngs::OsRng, Rng};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

const LOOKALIKES: &[char] = &['O', 'l', '0', '1', '|'];

/// Options for [`generate_password`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub exclude_lookalikes: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 12,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            exclude_lookalikes: true,
        }
    }
}

/// Generates a random password from the selected character classes.
///
/// Fails with `InvalidInput` if no class is selected or the length is zero.
pub fn generate_password(options: &GeneratorOptions) -> CryptoResult<String> {
    if options.length == 0 {
        return Err(CryptoError::InvalidInput("password length must be > 0"));
    }

    let mut charset = String::new();
    if options.uppercase {
        charset.push_str(UPPERCASE);
    }
    if options.lowercase {
        charset.push_str(LOWERCASE);
    }
    if options.digits {
        charset.push_str(DIGITS);
    }
    if options.symbols {
        charset.push_str(SYMBOLS);
    }
    if options.exclude_lookalikes {
        charset.retain(|c| !LOOKALIKES.contains(&c));
    }

    if charset.is_empty() {
        return Err(CryptoError::InvalidInput(
            "at least one character class must be selected",
        ));
    }

    let chars: Vec<char> = charset.chars().collect();
    let password = (0..options.length)
        .map(|_| chars[OsRng.gen_range(0..chars.len())])
        .collect();
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_length() {
        let options = GeneratorOptions::default();
        let password = generate_password(&options).unwrap();
        assert_eq!(password.chars().count(), 12);
    }

    #[test]
    fn digits_only_stays_in_charset() {
        let options = GeneratorOptions {
            length: 64,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
            exclude_lookalikes: false,
        };
        let password = generate_password(&options).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn lookalike_exclusion_drops_ambiguous_chars() {
        let options = GeneratorOptions {
            length: 256,
            ..GeneratorOptions::default()
        };
        let password = generate_password(&options).unwrap();
        for c in ['O', 'l', '0', '1', '|'] {
            assert!(!password.contains(c), "generated password contains {c:?}");
        }
    }

    #[test]
    fn no_classes_selected_is_rejected() {
        let options = GeneratorOptions {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
            ..GeneratorOptions::default()
        };
        assert!(matches!(
            generate_password(&options),
            Err(CryptoError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_length_is_rejected() {
        let options = GeneratorOptions {
            length: 0,
            ..GeneratorOptions::default()
        };
        assert!(generate_password(&options).is_err());
    }
}
