//! Mixed-radix encoding between sequence values and identifier bodies.

use tracing::trace;

use crate::error::{TemplateError, ValidationError};
use crate::template::{Capacity, Template};

impl Template {
    /// Mints the identifier for sequence value `n`.
    ///
    /// Bounded templates fail with [`TemplateError::CapacityExceeded`] once
    /// `n` reaches the capacity; `z` templates grow instead.
    pub fn mint(&self, n: u64) -> Result<String, TemplateError> {
        let body = self.encode(n)?;

        let mut id = String::with_capacity(self.prefix().len() + body.len() + 1);
        id.push_str(self.prefix());
        id.push_str(&body);

        if self.has_checkdigit() {
            let check = self.alphabet.checkdigit(&id)?;
            id.push(check);
        }

        trace!(sequence = n, identifier = %id, "minted identifier");
        Ok(id)
    }

    /// The identifier for sequence value 0.
    pub fn first(&self) -> Result<String, TemplateError> {
        self.mint(self.min())
    }

    /// Recovers the sequence value an identifier was minted from.
    pub fn decode(&self, id: &str) -> Result<u64, ValidationError> {
        let code = self.locate(id)?;
        let digits: Vec<char> = code.chars().collect();

        let width = self.radix_sizes.len();
        let extension = digits.len().saturating_sub(width);
        let top = self.radix_sizes.last().copied().unwrap_or(1);

        let mut value: u64 = 0;
        for (i, symbol) in digits.iter().enumerate() {
            let radix = if i < extension {
                top
            } else {
                self.radix_sizes[i - extension]
            };
            let digit = self
                .alphabet
                .index_of(*symbol)
                .ok_or(ValidationError::Malformed)?;
            value = value
                .checked_mul(radix as u64)
                .and_then(|v| v.checked_add(digit as u64))
                .ok_or(ValidationError::Overflow)?;
        }

        Ok(value)
    }

    /// Encodes `n` into the identifier body, most significant digit first.
    fn encode(&self, n: u64) -> Result<String, TemplateError> {
        let symbols = self.alphabet.symbols();
        let mut remaining = n;
        let mut digits: Vec<char> = Vec::with_capacity(self.radix_sizes.len());

        for radix in self.radix_sizes.iter().rev() {
            let radix = *radix as u64;
            digits.push(symbols[(remaining % radix) as usize]);
            remaining /= radix;
        }

        if remaining > 0 {
            match self.capacity {
                Capacity::Unbounded => {
                    let top = self.radix_sizes.last().copied().unwrap_or(1) as u64;
                    while remaining > 0 {
                        digits.push(symbols[(remaining % top) as usize]);
                        remaining /= top;
                    }
                }
                Capacity::Bounded(capacity) => {
                    return Err(TemplateError::CapacityExceeded { value: n, capacity });
                }
            }
        }

        digits.reverse();
        Ok(digits.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::template::tests::template_strategy;
    use proptest::prelude::*;

    #[test]
    fn test_mint_bounded_decimal() {
        let template = Template::parse("bc.sdd").unwrap();
        assert_eq!(template.mint(0).unwrap(), "bc00");
        assert_eq!(template.mint(23).unwrap(), "bc23");
        assert_eq!(template.mint(99).unwrap(), "bc99");
    }

    #[test]
    fn test_mint_capacity_exceeded() {
        let template = Template::parse("bc.sdd").unwrap();
        let err = template.mint(100).unwrap_err();
        assert_eq!(
            err,
            TemplateError::CapacityExceeded {
                value: 100,
                capacity: 100
            }
        );
        assert!(template.mint(u64::MAX).unwrap_err().is_capacity_exceeded());
    }

    #[test]
    fn test_random_generator_mints_caller_value() {
        let template = Template::parse("r.rd").unwrap();
        assert_eq!(template.mint(7).unwrap(), "r7");
        assert!(template.mint(10).unwrap_err().is_capacity_exceeded());
    }

    #[test]
    fn test_mint_with_checkdigit() {
        let template = Template::parse("bc.sdk").unwrap();
        assert_eq!(template.mint(0).unwrap(), "bc03");
        assert_eq!(template.first().unwrap(), "bc03");
    }

    #[test]
    fn test_mint_extended_positions() {
        let template = Template::parse(".see").unwrap();
        assert_eq!(template.mint(0).unwrap(), "00");
        assert_eq!(template.mint(10).unwrap(), "0b");
        assert_eq!(template.mint(28).unwrap(), "0z");
        assert_eq!(template.mint(29).unwrap(), "10");
        assert_eq!(template.mint(29 * 29 - 1).unwrap(), "zz");
        assert!(template.mint(29 * 29).is_err());
    }

    #[test]
    fn test_mint_mixed_mask() {
        // "ed": low digit base 10, high digit base 29
        let template = Template::parse("x.sed").unwrap();
        assert_eq!(template.mint(9).unwrap(), "x09");
        assert_eq!(template.mint(10).unwrap(), "x10");
        assert_eq!(template.mint(105).unwrap(), "xb5");
        assert_eq!(template.mint(289).unwrap(), "xz9");
        assert!(template.mint(290).is_err());
    }

    #[test]
    fn test_extensible_growth() {
        let template = Template::parse("bc.zd").unwrap();
        assert_eq!(template.mint(0).unwrap(), "bc0");
        assert_eq!(template.mint(9).unwrap(), "bc9");
        assert_eq!(template.mint(10).unwrap(), "bc10");
        assert_eq!(template.mint(99).unwrap(), "bc99");
        assert_eq!(template.mint(100).unwrap(), "bc100");
        assert_eq!(template.mint(123_456).unwrap(), "bc123456");
    }

    #[test]
    fn test_extensible_growth_uses_last_class() {
        // extension digits are base 10 even though the core starts with 'e'
        let template = Template::parse("x.zed").unwrap();
        assert_eq!(template.mint(289).unwrap(), "xz9");
        assert_eq!(template.mint(290).unwrap(), "x100");
        assert!(template.is_valid("x100"));
        assert_eq!(template.decode("x100").unwrap(), 290);
    }

    #[test]
    fn test_extensible_lengths_grow() {
        let template = Template::parse("bc.zdk").unwrap();
        let mut last_len = 0;
        for n in [0u64, 10, 100, 1_000, 1_000_000, u64::MAX] {
            let id = template.mint(n).unwrap();
            assert!(id.len() > last_len, "{n} -> {id}");
            last_len = id.len();
            assert!(template.is_valid(&id), "{id}");
        }
    }

    #[test]
    fn test_mint_prefix_outside_alphabet_with_checkdigit() {
        let template = Template::parse("ark:/.sdk").unwrap();
        assert!(matches!(
            template.mint(0),
            Err(TemplateError::InvalidCharacter { character: 'a', position: 0 })
        ));
    }

    #[test]
    fn test_decode_known_values() {
        let template = Template::parse("bc.sdk").unwrap();
        assert_eq!(template.decode("bc03").unwrap(), 0);
        assert!(template.decode("bc04").is_err());

        let template = Template::parse("bc.zd").unwrap();
        assert_eq!(template.decode("bc123456").unwrap(), 123_456);
        assert_eq!(template.decode("bc0123").unwrap(), 123);
    }

    #[test]
    fn test_decode_overflow() {
        let template = Template::parse("bc.zd").unwrap();
        let huge = format!("bc{}", "9".repeat(25));
        assert_eq!(template.decode(&huge), Err(ValidationError::Overflow));
    }

    #[test]
    fn test_decode_custom_alphabet() {
        let alphabet = Alphabet::new("0123456789abcdef").unwrap();
        let template = Template::with_alphabet("h.zee", alphabet).unwrap();
        assert_eq!(template.mint(255).unwrap(), "hff");
        assert_eq!(template.mint(256).unwrap(), "h100");
        assert_eq!(template.decode("h100").unwrap(), 256);
    }

    #[test]
    fn test_mint_shared_across_threads() {
        let template = std::sync::Arc::new(Template::parse("bc.zeek").unwrap());
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let template = template.clone();
                std::thread::spawn(move || {
                    (t * 1000..t * 1000 + 100)
                        .map(|n| template.mint(n).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(template.is_valid(&id));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_extensible_mint_is_valid(n in any::<u64>()) {
            let template = Template::parse("bc.zdk").unwrap();
            let id = template.mint(n).unwrap();
            prop_assert!(template.is_valid(&id));
            prop_assert_eq!(template.decode(&id).unwrap(), n);
        }

        #[test]
        fn prop_minted_ids_validate_and_decode(
            spec in template_strategy("[0-9bcdfghjkmnpqrstvwxz]{0,4}"),
            seed in any::<u64>(),
        ) {
            let template = Template::parse(&spec).unwrap();
            let n = match template.capacity() {
                Capacity::Bounded(capacity) => (u128::from(seed) % capacity) as u64,
                Capacity::Unbounded => seed,
            };
            let id = template.mint(n).unwrap();
            prop_assert!(template.is_valid(&id), "{} -> {}", n, id);
            prop_assert_eq!(template.decode(&id).unwrap(), n);
        }

        #[test]
        fn prop_bounded_rejects_beyond_capacity(extra in 0u64..1_000) {
            let template = Template::parse("bc.sedk").unwrap();
            prop_assert!(template.mint(290 + extra).unwrap_err().is_capacity_exceeded());
        }

        #[test]
        fn prop_single_substitution_detected(n in 0u64..290, replacement in 0usize..10) {
            let template = Template::parse("bc.sedk").unwrap();
            let id = template.mint(n).unwrap();
            let mut chars: Vec<char> = id.chars().collect();
            let original = chars[3];
            let substitute = char::from(b'0' + replacement as u8);
            prop_assume!(original != substitute);
            chars[3] = substitute;
            let tampered: String = chars.into_iter().collect();
            prop_assert!(!template.is_valid(&tampered));
        }
    }
}
