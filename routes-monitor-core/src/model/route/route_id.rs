use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::RouteConfigError;

/// identifier of a monitored route. it prefixes the raw response file names,
/// so it is limited to ASCII alphanumerics, '-' and '_'.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl TryFrom<String> for RouteId {
    type Error = RouteConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if RouteId::is_well_formed(&value) {
            Ok(RouteId(value))
        } else {
            Err(RouteConfigError::InvalidRouteIdError(value))
        }
    }
}

impl FromStr for RouteId {
    type Err = RouteConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteId::try_from(s.to_string())
    }
}

impl From<RouteId> for String {
    fn from(value: RouteId) -> Self {
        value.0
    }
}

impl Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
