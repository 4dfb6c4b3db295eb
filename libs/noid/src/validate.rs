//! Identifier validation.
//!
//! A template compiles to one anchored pattern:
//!
//! ```text
//! \A(?P<body>PREFIX(?P<code>EXT* MASK))(?P<check>ANY)\z
//! ```
//!
//! `EXT*` repeats the last mask class and only appears for `z` templates;
//! the `check` group only appears when the template carries a check symbol.

use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::alphabet::Alphabet;
use crate::error::{TemplateError, ValidationError};
use crate::template::{CharClass, Descriptor, Template};

const DECIMAL_PATTERN: &str = "[0-9]";

/// Compiled size limit for the matcher. Each mask class costs a few hundred
/// bytes, so this admits masks of several hundred thousand classes.
const PATTERN_SIZE_LIMIT: usize = 256 * (1 << 20);

/// Compiled matcher for one template.
#[derive(Debug, Clone)]
pub(crate) struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub(crate) fn build(
        descriptor: &Descriptor,
        alphabet: &Alphabet,
    ) -> Result<Self, TemplateError> {
        let pattern = Self::pattern(descriptor, alphabet);
        let regex = RegexBuilder::new(&pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;
        Ok(Self { regex })
    }

    fn pattern(descriptor: &Descriptor, alphabet: &Alphabet) -> String {
        let extended = extended_pattern(alphabet);
        let class_pattern = |class: CharClass| match class {
            CharClass::Extended => extended.as_str(),
            CharClass::Decimal => DECIMAL_PATTERN,
        };

        let mut code = String::new();
        if descriptor.generator.is_extensible() {
            if let Some(last) = descriptor.classes.last() {
                code.push_str(class_pattern(*last));
                code.push('*');
            }
        }
        for class in &descriptor.classes {
            code.push_str(class_pattern(*class));
        }

        let mut pattern = format!(
            r"\A(?P<body>{}(?P<code>{}))",
            regex::escape(&descriptor.prefix),
            code
        );
        if descriptor.has_checkdigit {
            pattern.push_str(&format!("(?P<check>{})", extended));
        }
        pattern.push_str(r"\z");
        pattern
    }
}

/// A character class matching any alphabet symbol.
fn extended_pattern(alphabet: &Alphabet) -> String {
    let mut class = String::from("[");
    for symbol in alphabet.symbols() {
        class.push_str(&regex::escape(&symbol.to_string()));
    }
    class.push(']');
    class
}

impl Template {
    /// Returns true if `s` could have been minted by this template.
    pub fn is_valid(&self, s: &str) -> bool {
        self.check(s).is_ok()
    }

    /// Like [`Template::is_valid`], but reports why a string was rejected.
    pub fn check(&self, s: &str) -> Result<(), ValidationError> {
        self.locate(s).map(|_| ())
    }

    /// Validates `s` and returns the code region between prefix and check
    /// symbol.
    pub(crate) fn locate<'a>(&self, s: &'a str) -> Result<&'a str, ValidationError> {
        let prefix = self.prefix();
        if !s.starts_with(prefix) {
            trace!(identifier = %s, "prefix mismatch");
            return Err(ValidationError::WrongPrefix {
                expected: prefix.to_string(),
            });
        }

        let captures = self
            .matcher
            .regex
            .captures(s)
            .ok_or(ValidationError::Malformed)?;
        let code = captures
            .name("code")
            .map(|m| m.as_str())
            .ok_or(ValidationError::Malformed)?;

        if self.has_checkdigit() {
            let body = captures
                .name("body")
                .map(|m| m.as_str())
                .ok_or(ValidationError::Malformed)?;
            let actual = captures
                .name("check")
                .and_then(|m| m.as_str().chars().next())
                .ok_or(ValidationError::Malformed)?;
            // A prefix outside the alphabet can never carry a check symbol.
            let expected = self
                .alphabet
                .checkdigit(body)
                .map_err(|_| ValidationError::Malformed)?;

            if expected != actual {
                trace!(identifier = %s, %expected, %actual, "check symbol mismatch");
                return Err(ValidationError::ChecksumMismatch { expected, actual });
            }
        }

        Ok(code)
    }
}
