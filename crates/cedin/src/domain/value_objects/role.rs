//! Role - Access profile of a staff account

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Secretary,
    Professional,
    Developer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Secretary => write!(f, "SECRETARY"),
            Role::Professional => write!(f, "PROFESSIONAL"),
            Role::Developer => write!(f, "DEVELOPER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "SECRETARY" => Ok(Role::Secretary),
            "PROFESSIONAL" => Ok(Role::Professional),
            "DEVELOPER" => Ok(Role::Developer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Secretary".parse::<Role>(), Ok(Role::Secretary));
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_is_secretary() {
        assert_eq!(Role::default(), Role::Secretary);
        assert_eq!(Role::default().to_string(), "SECRETARY");
    }
}
