//! Validation rules.

use regex::Regex;

use super::messages::{Catalog, MessageKey};

/// A single rule failure, carrying the message shown for the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    /// The message recorded in the error map.
    pub message: String,
}

impl RuleViolation {
    /// Creates a violation with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A custom predicate over the bound value. Absent values arrive as
/// `None`; failure is signaled by returning a [`RuleViolation`].
pub type CustomRule = Box<dyn Fn(Option<&str>) -> Result<(), RuleViolation> + Send + Sync>;

/// A validation rule attached to a field path.
pub enum Rule {
    /// The value must be present and non-blank.
    Required,
    /// The (checkbox) value must be truthy.
    Checked,
    /// The value's character count must stay within the given bounds.
    Length {
        /// Minimum length, when set.
        min: Option<usize>,
        /// Maximum length, when set.
        max: Option<usize>,
    },
    /// The value must be a syntactically valid e-mail address.
    IsEmail,
    /// The value must parse as an integer.
    IsInteger,
    /// The value must be numeric, with a bounded fractional part.
    /// A decimal comma is normalized to a period first.
    IsDecimal {
        /// Maximum number of fractional digits.
        max_places: usize,
    },
    /// The value must match one of the given case names.
    OneOf(Vec<String>),
    /// An arbitrary predicate with its own message.
    Custom(CustomRule),
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Checked => write!(f, "Checked"),
            Self::Length { min, max } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::IsEmail => write!(f, "IsEmail"),
            Self::IsInteger => write!(f, "IsInteger"),
            Self::IsDecimal { max_places } => f
                .debug_struct("IsDecimal")
                .field("max_places", max_places)
                .finish(),
            Self::OneOf(names) => f.debug_tuple("OneOf").field(names).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Rule {
    /// Creates a decimal rule with the default two fractional digits.
    pub fn decimal() -> Self {
        Self::IsDecimal { max_places: 2 }
    }

    /// Creates a minimum-length rule.
    pub fn min_length(min: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: None,
        }
    }

    /// Creates a maximum-length rule.
    pub fn max_length(max: usize) -> Self {
        Self::Length {
            min: None,
            max: Some(max),
        }
    }

    /// Creates a one-of rule from the case names of an external enum.
    pub fn one_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(names.into_iter().map(Into::into).collect())
    }

    /// Wraps an arbitrary predicate into a rule.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<(), RuleViolation> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(predicate))
    }

    /// Checks the rule against a bound value.
    pub(crate) fn check(
        &self,
        value: Option<&str>,
        catalog: &Catalog,
    ) -> Result<(), RuleViolation> {
        match self {
            Self::Required => {
                if value.map_or(true, |v| v.trim().is_empty()) {
                    return Err(RuleViolation::new(catalog.plain(MessageKey::Required)));
                }
                Ok(())
            }
            Self::Checked => {
                let trimmed = value.unwrap_or("").trim();
                if trimmed.is_empty() || trimmed == "0" {
                    return Err(RuleViolation::new(catalog.plain(MessageKey::Checked)));
                }
                Ok(())
            }
            Self::Length { min, max } => {
                let length = value.unwrap_or("").chars().count();

                if let Some(min) = min {
                    if length < *min {
                        return Err(RuleViolation::new(
                            catalog.counted(MessageKey::LengthMin, *min as u64),
                        ));
                    }
                }

                if let Some(max) = max {
                    if length > *max {
                        return Err(RuleViolation::new(
                            catalog.counted(MessageKey::LengthMax, *max as u64),
                        ));
                    }
                }

                Ok(())
            }
            Self::IsEmail => {
                let pattern = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                    .expect("valid email pattern");
                if pattern.is_match(value.unwrap_or("")) {
                    Ok(())
                } else {
                    Err(RuleViolation::new(catalog.plain(MessageKey::InvalidEmail)))
                }
            }
            Self::IsInteger => {
                if value.unwrap_or("").trim().parse::<i64>().is_ok() {
                    Ok(())
                } else {
                    Err(RuleViolation::new(
                        catalog.plain(MessageKey::InvalidInteger),
                    ))
                }
            }
            Self::IsDecimal { max_places } => {
                let normalized = value.unwrap_or("").replace(',', ".");

                if normalized.parse::<f64>().is_err() {
                    return Err(RuleViolation::new(catalog.plain(MessageKey::InvalidNumber)));
                }

                let Some((_, fraction)) = normalized.split_once('.') else {
                    return Ok(());
                };

                if fraction.len() > *max_places {
                    return Err(RuleViolation::new(
                        catalog.counted(MessageKey::DecimalMax, *max_places as u64),
                    ));
                }

                Ok(())
            }
            Self::OneOf(names) => {
                let v = value.unwrap_or("");
                if names.iter().any(|name| name == v) {
                    Ok(())
                } else {
                    Err(RuleViolation::new(catalog.plain(MessageKey::InvalidChoice)))
                }
            }
            Self::Custom(predicate) => predicate(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::messages::Locale;

    fn catalog() -> Catalog {
        Catalog::new(Locale::En)
    }

    #[test]
    fn test_required() {
        let rule = Rule::Required;
        assert!(rule.check(None, &catalog()).is_err());
        assert!(rule.check(Some(""), &catalog()).is_err());
        assert!(rule.check(Some("   "), &catalog()).is_err());
        assert!(rule.check(Some("0"), &catalog()).is_ok());
        assert!(rule.check(Some("false"), &catalog()).is_ok());
    }

    #[test]
    fn test_checked() {
        let rule = Rule::Checked;
        assert!(rule.check(None, &catalog()).is_err());
        assert!(rule.check(Some(""), &catalog()).is_err());
        assert!(rule.check(Some(" 0 "), &catalog()).is_err());
        assert!(rule.check(Some("1"), &catalog()).is_ok());
        assert!(rule.check(Some("on"), &catalog()).is_ok());
    }

    #[test]
    fn test_length_min() {
        let rule = Rule::min_length(5);
        assert!(rule.check(Some("hello"), &catalog()).is_ok());
        let err = rule.check(Some("hi"), &catalog()).unwrap_err();
        assert_eq!(
            err.message,
            "The field cannot have fewer than 5 characters."
        );
        assert!(rule.check(None, &catalog()).is_err());
    }

    #[test]
    fn test_length_max() {
        let rule = Rule::max_length(3);
        assert!(rule.check(Some("abc"), &catalog()).is_ok());
        assert!(rule.check(None, &catalog()).is_ok());
        assert!(rule.check(Some("abcd"), &catalog()).is_err());
    }

    #[test]
    fn test_is_email() {
        let rule = Rule::IsEmail;
        assert!(rule.check(Some("user@example.com"), &catalog()).is_ok());
        assert!(rule
            .check(Some("user.name@domain.co.uk"), &catalog())
            .is_ok());
        assert!(rule.check(Some("invalid"), &catalog()).is_err());
        assert!(rule.check(Some("@example.com"), &catalog()).is_err());
        assert!(rule.check(None, &catalog()).is_err());
    }

    #[test]
    fn test_is_integer() {
        let rule = Rule::IsInteger;
        assert!(rule.check(Some("42"), &catalog()).is_ok());
        assert!(rule.check(Some("-7"), &catalog()).is_ok());
        assert!(rule.check(Some("0"), &catalog()).is_ok());
        assert!(rule.check(Some("4.2"), &catalog()).is_err());
        assert!(rule.check(Some("abc"), &catalog()).is_err());
    }

    #[test]
    fn test_is_decimal() {
        let rule = Rule::decimal();
        assert!(rule.check(Some("12,5"), &catalog()).is_ok());
        assert!(rule.check(Some("12.55"), &catalog()).is_ok());
        assert!(rule.check(Some("12"), &catalog()).is_ok());

        let err = rule.check(Some("12.555"), &catalog()).unwrap_err();
        assert_eq!(
            err.message,
            "The field may not have more than 2 decimal places."
        );

        let err = rule.check(Some("abc"), &catalog()).unwrap_err();
        assert_eq!(err.message, "Invalid numeric value.");
    }

    #[test]
    fn test_is_decimal_custom_places() {
        let rule = Rule::IsDecimal { max_places: 4 };
        assert!(rule.check(Some("1.2345"), &catalog()).is_ok());
        assert!(rule.check(Some("1.23456"), &catalog()).is_err());
    }

    #[test]
    fn test_one_of() {
        let rule = Rule::one_of(["Active", "Disabled"]);
        assert!(rule.check(Some("Active"), &catalog()).is_ok());
        assert!(rule.check(Some("active"), &catalog()).is_err());
        assert!(rule.check(None, &catalog()).is_err());
    }

    #[test]
    fn test_custom_rule() {
        let rule = Rule::custom(|value| {
            if value == Some("taken") {
                Err(RuleViolation::new("This username is already taken."))
            } else {
                Ok(())
            }
        });

        assert!(rule.check(Some("free"), &catalog()).is_ok());
        let err = rule.check(Some("taken"), &catalog()).unwrap_err();
        assert_eq!(err.message, "This username is already taken.");
    }
}
