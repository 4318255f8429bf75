use std::{error, fmt, str::FromStr};

/// Treatment of genes with an unusable length, i.e., zero, negative, or non-finite.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LengthPolicy {
    /// Leave the TPM undefined and exclude the gene from the scaling factor.
    #[default]
    Missing,
    /// Report a TPM of 0 and exclude the gene from the scaling factor.
    Zero,
    /// Fail normalization.
    Error,
}

impl LengthPolicy {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Zero => "zero",
            Self::Error => "error",
        }
    }
}

impl clap::ValueEnum for LengthPolicy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Missing, Self::Zero, Self::Error]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

impl fmt::Display for LengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid length policy: {}", self.0)
    }
}

impl error::Error for ParseError {}

impl FromStr for LengthPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing" => Ok(Self::Missing),
            "zero" => Ok(Self::Zero),
            "error" => Ok(Self::Error),
            _ => Err(ParseError(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt() {
        assert_eq!(LengthPolicy::Missing.to_string(), "missing");
        assert_eq!(LengthPolicy::Zero.to_string(), "zero");
        assert_eq!(LengthPolicy::Error.to_string(), "error");
    }

    #[test]
    fn test_from_str() -> Result<(), ParseError> {
        assert_eq!("missing".parse::<LengthPolicy>()?, LengthPolicy::Missing);
        assert_eq!("zero".parse::<LengthPolicy>()?, LengthPolicy::Zero);
        assert_eq!("error".parse::<LengthPolicy>()?, LengthPolicy::Error);

        assert!("".parse::<LengthPolicy>().is_err());
        assert!("count2tpm".parse::<LengthPolicy>().is_err());
        assert!("ZERO".parse::<LengthPolicy>().is_err());

        Ok(())
    }
}
