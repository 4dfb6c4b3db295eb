//! Template grammar and the immutable template engine.
//!
//! Grammar: `<prefix>.<generator><classes><k?>`
//!
//! - `prefix` is any literal, possibly empty, and may itself contain `.`
//! - `generator` is one of `r`, `s`, `z`
//! - `classes` is one or more of `e` (any alphabet symbol) and `d` (digit)
//! - a trailing `k` appends a check symbol

use tracing::debug;

use crate::alphabet::{Alphabet, DECIMAL_RADIX};
use crate::error::TemplateError;
use crate::validate::Matcher;

/// Identifier generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    /// `r`: fixed width. Picking the sequence value is left to the caller.
    Random,
    /// `s`: fixed width, minted in sequence order.
    Sequential,
    /// `z`: sequential, growing extra high-order digits once the mask is full.
    SequentialExtensible,
}

impl Generator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::Random),
            's' => Some(Self::Sequential),
            'z' => Some(Self::SequentialExtensible),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Random => 'r',
            Self::Sequential => 's',
            Self::SequentialExtensible => 'z',
        }
    }

    /// Returns true if identifiers may grow past the mask width.
    pub const fn is_extensible(self) -> bool {
        matches!(self, Self::SequentialExtensible)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sequential => "sequential",
            Self::SequentialExtensible => "sequential-extensible",
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-position constraint in the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `e`: any alphabet symbol.
    Extended,
    /// `d`: a decimal digit.
    Decimal,
}

impl CharClass {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'e' => Some(Self::Extended),
            'd' => Some(Self::Decimal),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Extended => 'e',
            Self::Decimal => 'd',
        }
    }

    /// Digit base of this position under `alphabet`.
    pub fn radix(self, alphabet: &Alphabet) -> usize {
        match self {
            Self::Extended => alphabet.len(),
            Self::Decimal => DECIMAL_RADIX,
        }
    }
}

/// Number of distinct identifiers a template can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacity {
    /// Product of the mask radixes, saturating at `u128::MAX`.
    Bounded(u128),
    /// `z` templates never run out.
    Unbounded,
}

impl Capacity {
    pub const fn bounded(self) -> Option<u128> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Returns true if sequence value `n` can be minted.
    pub fn contains(self, n: u64) -> bool {
        match self {
            Self::Bounded(capacity) => u128::from(n) < capacity,
            Self::Unbounded => true,
        }
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{}", n),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// The parsed parts of a template string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub prefix: String,
    pub generator: Generator,
    pub classes: Vec<CharClass>,
    pub has_checkdigit: bool,
}

impl Descriptor {
    /// Parses a template string. Nothing is returned unless the whole
    /// string matches the grammar.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let Some((prefix, mask)) = template.rsplit_once('.') else {
            return Err(TemplateError::invalid_template(
                template,
                "missing '.' between prefix and mask",
            ));
        };

        let mut chars = mask.chars();
        let generator = match chars.next() {
            Some(c) => Generator::from_char(c).ok_or_else(|| {
                TemplateError::invalid_template(template, format!("unknown generator '{}'", c))
            })?,
            None => {
                return Err(TemplateError::invalid_template(template, "missing generator"));
            }
        };

        let rest = chars.as_str();
        let (classes_str, has_checkdigit) = match rest.strip_suffix('k') {
            Some(stripped) => (stripped, true),
            None => (rest, false),
        };

        if classes_str.is_empty() {
            return Err(TemplateError::invalid_template(
                template,
                "mask needs at least one character class",
            ));
        }

        let classes = classes_str
            .chars()
            .map(|c| {
                CharClass::from_char(c).ok_or_else(|| {
                    TemplateError::invalid_template(
                        template,
                        format!("unknown character class '{}'", c),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            prefix: prefix.to_string(),
            generator,
            classes,
            has_checkdigit,
        })
    }

    /// Renders the descriptor back into template syntax.
    pub fn to_template_string(&self) -> String {
        let mut s = String::with_capacity(self.prefix.len() + self.classes.len() + 3);
        s.push_str(&self.prefix);
        s.push('.');
        s.push(self.generator.as_char());
        s.extend(self.classes.iter().map(|c| c.as_char()));
        if self.has_checkdigit {
            s.push('k');
        }
        s
    }
}

/// A parsed template together with its alphabet and derived values.
///
/// Everything is computed at construction; a `Template` is immutable and
/// can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Template {
    pub(crate) descriptor: Descriptor,
    pub(crate) alphabet: Alphabet,
    pub(crate) radix_sizes: Vec<usize>,
    pub(crate) capacity: Capacity,
    pub(crate) matcher: Matcher,
}

impl Template {
    /// Parses a template using the default betanumeric alphabet.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        Self::with_alphabet(template, Alphabet::default())
    }

    /// Parses a template against a caller-supplied alphabet.
    pub fn with_alphabet(template: &str, alphabet: Alphabet) -> Result<Self, TemplateError> {
        let descriptor = Descriptor::parse(template)?;

        let radix_sizes: Vec<usize> = descriptor
            .classes
            .iter()
            .map(|class| class.radix(&alphabet))
            .collect();

        let capacity = if descriptor.generator.is_extensible() {
            Capacity::Unbounded
        } else {
            Capacity::Bounded(
                radix_sizes
                    .iter()
                    .fold(1u128, |acc, r| acc.saturating_mul(*r as u128)),
            )
        };

        let matcher = Matcher::build(&descriptor, &alphabet)?;

        debug!(
            template = %template,
            generator = %descriptor.generator,
            width = radix_sizes.len(),
            checkdigit = descriptor.has_checkdigit,
            capacity = %capacity,
            "parsed identifier template"
        );

        Ok(Self {
            descriptor,
            alphabet,
            radix_sizes,
            capacity,
            matcher,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.descriptor.prefix
    }

    pub fn generator(&self) -> Generator {
        self.descriptor.generator
    }

    pub fn character_classes(&self) -> &[CharClass] {
        &self.descriptor.classes
    }

    pub fn has_checkdigit(&self) -> bool {
        self.descriptor.has_checkdigit
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Digit base of each mask position, most significant first.
    pub fn radix_sizes(&self) -> &[usize] {
        &self.radix_sizes
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Smallest sequence value. Always 0.
    pub fn min(&self) -> u64 {
        0
    }

    /// Computes the check symbol for `s` under this template's alphabet.
    pub fn checkdigit(&self, s: &str) -> Result<char, TemplateError> {
        self.alphabet.checkdigit(s)
    }

    /// The template string in canonical form.
    pub fn as_template_string(&self) -> String {
        self.descriptor.to_template_string()
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.alphabet == other.alphabet
    }
}

impl Eq for Template {}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.descriptor.to_template_string())
    }
}

impl std::str::FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Template {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
