//! Naming styles applied to generated identifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::utils::{to_camel_case, to_pascal_case, to_snake_case};

/// Identifier casing applied to generated function and type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NamingStyle {
    /// `getPetsId`
    #[serde(rename = "camelCase")]
    CamelCase,
    /// `get_pets_id`
    #[serde(rename = "snake_case")]
    SnakeCase,
    /// `GetPetsId`
    #[serde(rename = "PascalCase")]
    PascalCase,
}

impl NamingStyle {
    /// Returns the style identifier as it appears in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingStyle::CamelCase => "camelCase",
            NamingStyle::SnakeCase => "snake_case",
            NamingStyle::PascalCase => "PascalCase",
        }
    }

    /// Format a raw name into a valid identifier using this style.
    ///
    /// Characters outside `[a-zA-Z0-9]` act as word separators. The result is
    /// never empty and never starts with a digit.
    pub fn apply(&self, name: &str) -> String {
        let formatted = match self {
            NamingStyle::CamelCase => to_camel_case(name),
            NamingStyle::SnakeCase => to_snake_case(name),
            NamingStyle::PascalCase => to_pascal_case(name),
        };

        match formatted.chars().next() {
            None => "_".to_string(),
            Some(c) if c.is_ascii_digit() => format!("_{}", formatted),
            Some(_) => formatted,
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "camelcase" | "camel" => Ok(NamingStyle::CamelCase),
            "snakecase" | "snake" => Ok(NamingStyle::SnakeCase),
            "pascalcase" | "pascal" => Ok(NamingStyle::PascalCase),
            _ => Err(format!(
                "unknown naming style '{}', expected 'camelCase', 'snake_case' or 'PascalCase'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(NamingStyle::CamelCase.apply("get_pets"), "getPets");
        assert_eq!(NamingStyle::SnakeCase.apply("get_pets"), "get_pets");
        assert_eq!(NamingStyle::PascalCase.apply("getPetsRequest"), "GetPetsRequest");
        assert_eq!(NamingStyle::PascalCase.apply("pet.v2-summary"), "PetV2Summary");
    }

    #[test]
    fn test_apply_always_yields_identifier() {
        assert_eq!(NamingStyle::PascalCase.apply("2fa_token"), "_2faToken");
        assert_eq!(NamingStyle::CamelCase.apply("宠物"), "_");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            NamingStyle::from_str("camelCase").unwrap(),
            NamingStyle::CamelCase
        );
        assert_eq!(
            NamingStyle::from_str("snake_case").unwrap(),
            NamingStyle::SnakeCase
        );
        assert_eq!(
            NamingStyle::from_str("pascal").unwrap(),
            NamingStyle::PascalCase
        );
        assert!(NamingStyle::from_str("kebab").is_err());
    }

    #[test]
    fn test_serde_names() {
        let style: NamingStyle = serde_json::from_str(r#""snake_case""#).unwrap();
        assert_eq!(style, NamingStyle::SnakeCase);
        assert_eq!(
            serde_json::to_string(&NamingStyle::PascalCase).unwrap(),
            r#""PascalCase""#
        );
    }
}
