//! Owner Resolver
//!
//! Maps the owner a detail page supplies (an appliance or a named space) to
//! the scope every list, create and label lookup is keyed by.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::model::ApplianceId;

/// Characters `encodeURIComponent` leaves alone.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which appliance or space a list of notes/to-dos belongs to.
///
/// Space keys are literal: two spaces with the same display text are the same
/// scope only when the strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    Appliance(ApplianceId),
    Space(String),
    /// Not tied to any owner.
    #[default]
    General,
}

impl Scope {
    /// Resolve the scope from the owner inputs of a detail page.
    ///
    /// A zero id or an empty key counts as absent. If both are given the
    /// appliance wins.
    pub fn resolve(appliance_id: Option<ApplianceId>, space_key: Option<&str>) -> Self {
        let appliance_id = appliance_id.filter(|id| *id != 0);
        let space_key = space_key.filter(|key| !key.is_empty());

        match (appliance_id, space_key) {
            (Some(id), Some(key)) => {
                log::warn!("[Scope] both appliance {} and space {:?} given, using the appliance", id, key);
                Scope::Appliance(id)
            }
            (Some(id), None) => Scope::Appliance(id),
            (None, Some(key)) => Scope::Space(key.to_string()),
            (None, None) => Scope::General,
        }
    }

    pub fn appliance_id(&self) -> Option<ApplianceId> {
        match self {
            Scope::Appliance(id) => Some(*id),
            _ => None,
        }
    }

    pub fn space_key(&self) -> Option<&str> {
        match self {
            Scope::Space(key) => Some(key.as_str()),
            _ => None,
        }
    }

    /// Label used when no appliance name applies.
    pub fn label_fallback(&self) -> Option<String> {
        self.space_key().map(str::to_string)
    }

    /// Query parameters for scoped list requests.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Scope::Appliance(id) => vec![("applianceId", id.to_string())],
            Scope::Space(key) => vec![("spaceType", key.clone())],
            Scope::General => Vec::new(),
        }
    }

    /// `?name=value` suffix for list URLs, empty for the general scope.
    pub fn query_string(&self) -> String {
        let pairs: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, utf8_percent_encode(&value, QUERY_VALUE)))
            .collect();

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Appliance(id) => write!(f, "appliance {}", id),
            Scope::Space(key) => write!(f, "space {:?}", key),
            Scope::General => f.write_str("general"),
        }
    }
}
