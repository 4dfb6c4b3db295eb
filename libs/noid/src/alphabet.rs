//! Ordered symbol alphabet shared by every template in a process.
//!
//! The alphabet serves two roles: it is the digit set for `Extended`
//! mask positions, and it is the index space of the check digit. Decimal
//! positions reuse its first ten symbols, so those must be `0`..=`9`.

use std::collections::HashSet;

use crate::error::TemplateError;

/// The ten digits followed by the lowercase consonants other than `l` and `y`.
pub const BETANUMERIC: &str = "0123456789bcdfghjkmnpqrstvwxz";

/// Radix of a `Decimal` mask position.
pub const DECIMAL_RADIX: usize = 10;

/// An ordered set of distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    text: String,
}

impl Alphabet {
    /// Builds an alphabet from a string of distinct symbols.
    pub fn new(symbols: &str) -> Result<Self, TemplateError> {
        let chars: Vec<char> = symbols.chars().collect();

        if chars.len() < DECIMAL_RADIX {
            return Err(TemplateError::InvalidAlphabet {
                reason: format!(
                    "need at least {} symbols, got {}",
                    DECIMAL_RADIX,
                    chars.len()
                ),
            });
        }

        let mut seen = HashSet::with_capacity(chars.len());
        for c in &chars {
            if !seen.insert(*c) {
                return Err(TemplateError::InvalidAlphabet {
                    reason: format!("symbol '{}' appears more than once", c),
                });
            }
        }

        let digits_first = chars
            .iter()
            .take(DECIMAL_RADIX)
            .zip('0'..='9')
            .all(|(a, b)| *a == b);
        if !digits_first {
            return Err(TemplateError::InvalidAlphabet {
                reason: "the first ten symbols must be the digits 0-9 in order".to_string(),
            });
        }

        Ok(Self {
            symbols: chars,
            text: symbols.to_string(),
        })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; a valid alphabet holds at least the ten digits.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at a 0-based index.
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// 0-based index of a symbol.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|c| *c == symbol)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index_of(symbol).is_some()
    }

    /// The symbols as a single string, in order.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Computes the check symbol for `s`.
    ///
    /// Each character's alphabet index is weighted by its 1-based position;
    /// the weighted sum modulo the alphabet length selects the symbol.
    pub fn checkdigit(&self, s: &str) -> Result<char, TemplateError> {
        let len = self.symbols.len() as u64;
        let mut sum: u64 = 0;

        for (position, character) in s.chars().enumerate() {
            let index = self
                .index_of(character)
                .ok_or(TemplateError::InvalidCharacter {
                    character,
                    position,
                })? as u64;
            let weight = (position as u64 + 1) % len;
            sum = (sum + index * weight) % len;
        }

        // sum < len by construction
        Ok(self.symbols[sum as usize])
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = BETANUMERIC.chars().collect();
        Self {
            symbols,
            text: BETANUMERIC.to_string(),
        }
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Alphabet {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for Alphabet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> serde::Deserialize<'de> for Alphabet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
