//! Foot-height parsing.
//!
//! Organ stops are named by the nominal length of their lowest open pipe in
//! feet: `8'`, `4'`, `2'2/3`, `1'3/5`. The height is kept in its written form
//! so names can be rendered back exactly as the builder wrote them.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OrganError, Result};

/// Whole part, then an optional fraction separated by spaces and/or an
/// apostrophe. A fraction alone is matched by [`FRACTION_ONLY_PATTERN`].
const MIXED_PATTERN: &str = r"^(\d+(?:\.\d+)?)\s*(?:'\s*)?(?:(\d+)\s*/\s*(\d+))?\s*'?$";
const FRACTION_ONLY_PATTERN: &str = r"^(\d+)\s*/\s*(\d+)\s*'?$";

static MIXED_REGEX: OnceLock<Regex> = OnceLock::new();
static FRACTION_ONLY_REGEX: OnceLock<Regex> = OnceLock::new();

fn mixed_regex() -> &'static Regex {
    MIXED_REGEX.get_or_init(|| Regex::new(MIXED_PATTERN).expect("invalid regex pattern"))
}

fn fraction_only_regex() -> &'static Regex {
    FRACTION_ONLY_REGEX
        .get_or_init(|| Regex::new(FRACTION_ONLY_PATTERN).expect("invalid regex pattern"))
}

/// Parses a foot height into decimal feet.
///
/// # Examples
/// ```
/// use organum_core::height::parse_height;
///
/// assert_eq!(parse_height("8").unwrap(), 8.0);
/// assert!((parse_height("2'2/3").unwrap() - 8.0 / 3.0).abs() < 1e-12);
/// assert!((parse_height("1 3/5").unwrap() - 1.6).abs() < 1e-12);
/// ```
pub fn parse_height(text: &str) -> Result<f64> {
    FootHeight::parse(text).map(|h| h.value())
}

/// A proper or improper fraction of a foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// A foot height as written: whole feet plus an optional fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FootHeight {
    whole: f64,
    fraction: Option<Fraction>,
}

impl FootHeight {
    /// Whole feet, no fraction.
    pub fn feet(whole: f64) -> Result<Self> {
        let height = Self {
            whole,
            fraction: None,
        };
        height.validate(&whole.to_string())
    }

    /// Parses `"8"`, `"5.5"`, `"2 2/3"`, `"2'2/3"`, `"2' 2/3"` or `"2/3"`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: &str| OrganError::InvalidHeight {
            text: text.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = text.trim();

        let height = if let Some(caps) = fraction_only_regex().captures(trimmed) {
            Self {
                whole: 0.0,
                fraction: Some(parse_fraction(&caps[1], &caps[2]).ok_or_else(|| {
                    invalid("fraction must have a non-zero denominator")
                })?),
            }
        } else if let Some(caps) = mixed_regex().captures(trimmed) {
            let whole = caps[1]
                .parse::<f64>()
                .map_err(|_| invalid("whole feet is not a number"))?;
            let fraction = match (caps.get(2), caps.get(3)) {
                (Some(num), Some(den)) => Some(
                    parse_fraction(num.as_str(), den.as_str())
                        .ok_or_else(|| invalid("fraction must have a non-zero denominator"))?,
                ),
                _ => None,
            };
            Self { whole, fraction }
        } else {
            return Err(invalid(
                "expected feet such as 8, 5.5, 2 2/3, 2'2/3 or 2/3",
            ));
        };

        height.validate(text)
    }

    fn validate(self, text: &str) -> Result<Self> {
        let value = self.value();
        if value.is_finite() && value > 0.0 {
            Ok(self)
        } else {
            Err(OrganError::InvalidHeight {
                text: text.to_string(),
                reason: "height must be greater than zero".to_string(),
            })
        }
    }

    /// Decimal feet.
    pub fn value(&self) -> f64 {
        self.whole + self.fraction.map(|f| f.value()).unwrap_or(0.0)
    }

    pub fn whole(&self) -> f64 {
        self.whole
    }

    pub fn fraction(&self) -> Option<Fraction> {
        self.fraction
    }

    /// Name suffix: `8'`, `1'3/5`, `2/3'`, `5.5'`.
    pub fn suffix(&self) -> String {
        match self.fraction {
            Some(f) if self.whole == 0.0 => format!("{}/{}'", f.numerator, f.denominator),
            Some(f) => format!("{}'{}/{}", self.whole, f.numerator, f.denominator),
            None => format!("{}'", self.whole),
        }
    }
}

fn parse_fraction(numerator: &str, denominator: &str) -> Option<Fraction> {
    let numerator = numerator.parse::<u32>().ok()?;
    let denominator = denominator.parse::<u32>().ok()?;
    (denominator != 0).then_some(Fraction {
        numerator,
        denominator,
    })
}

impl std::fmt::Display for FootHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.fraction {
            Some(frac) if self.whole == 0.0 => {
                write!(f, "{}/{}", frac.numerator, frac.denominator)
            }
            Some(frac) => write!(f, "{} {}/{}", self.whole, frac.numerator, frac.denominator),
            None => write!(f, "{}", self.whole),
        }
    }
}

impl std::str::FromStr for FootHeight {
    type Err = OrganError;

    fn from_str(s: &str) -> Result<Self> {
        FootHeight::parse(s)
    }
}

impl TryFrom<String> for FootHeight {
    type Error = OrganError;

    fn try_from(value: String) -> Result<Self> {
        FootHeight::parse(&value)
    }
}

impl From<FootHeight> for String {
    fn from(height: FootHeight) -> Self {
        height.to_string()
    }
}
