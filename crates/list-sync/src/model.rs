//! Records
//!
//! Canonical Note and To-do records plus the raw shapes the server sends.
//! Raw records are normalized once on ingestion; everything downstream reads
//! only the canonical fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::scope::Scope;

pub type ItemId = u32;
pub type ApplianceId = u32;

/// Shared view of a Note or To-do.
pub trait ListItem: Clone {
    fn id(&self) -> ItemId;

    fn owner(&self) -> &Scope;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Title of a note, label of a to-do.
    fn heading(&self) -> &str;

    /// Milliseconds since the epoch; absent timestamps count as the epoch.
    fn created_millis(&self) -> i64 {
        self.created_at().map(|t| t.timestamp_millis()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: ItemId,
    pub owner: Scope,
    pub created_at: Option<DateTime<Utc>>,
    pub title: String,
    /// Markdown
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: ItemId,
    pub owner: Scope,
    pub created_at: Option<DateTime<Utc>>,
    pub label: String,
    pub checked: bool,
    /// Appliance name or space key, resolved by enrichment.
    pub source_label: Option<String>,
}

impl ListItem for Note {
    fn id(&self) -> ItemId {
        self.id
    }

    fn owner(&self) -> &Scope {
        &self.owner
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn heading(&self) -> &str {
        &self.title
    }
}

impl ListItem for Todo {
    fn id(&self) -> ItemId {
        self.id
    }

    fn owner(&self) -> &Scope {
        &self.owner
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn heading(&self) -> &str {
        &self.label
    }
}

// ========================
// Wire records
// ========================

/// Owner and timestamp fields as they appear on the wire.
///
/// The server has used several spellings for the creation timestamp and the
/// appliance id. Each timestamp spelling gets its own slot so a record
/// carrying more than one still decodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireMeta {
    #[serde(default, rename = "createdAt")]
    created_at_camel: Option<String>,
    #[serde(default, rename = "CreatedAt")]
    created_at_pascal: Option<String>,
    #[serde(default, rename = "created_at")]
    created_at_snake: Option<String>,
    #[serde(default, rename = "applianceId", alias = "applianceID", alias = "appliance_id")]
    appliance_id: Option<ApplianceId>,
    #[serde(default, rename = "spaceType", alias = "space_type")]
    space_type: Option<String>,
}

impl WireMeta {
    pub fn new(created_at: Option<&str>, appliance_id: Option<ApplianceId>, space_type: Option<&str>) -> Self {
        Self {
            created_at_camel: created_at.map(str::to_string),
            appliance_id,
            space_type: space_type.map(str::to_string),
            ..Default::default()
        }
    }

    /// The single owner of the record; the appliance wins over a space.
    pub fn owner(&self) -> Scope {
        let appliance_id = self.appliance_id.filter(|id| *id != 0);
        let space_key = self.space_type.as_deref().filter(|key| !key.is_empty());
        match (appliance_id, space_key) {
            (Some(id), _) => Scope::Appliance(id),
            (None, Some(key)) => Scope::Space(key.to_string()),
            (None, None) => Scope::General,
        }
    }

    /// First non-empty timestamp spelling, parsed; unparseable counts as absent.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = [&self.created_at_camel, &self.created_at_pascal, &self.created_at_snake]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            log::debug!("[Model] ignoring unparseable timestamp {:?}", raw);
        }
        parsed
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawNote {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(flatten)]
    pub meta: WireMeta,
}

impl RawNote {
    pub fn normalize(self) -> Note {
        Note {
            id: self.id,
            owner: self.meta.owner(),
            created_at: self.meta.created_at(),
            title: self.title,
            body: self.body,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTodo {
    pub id: ItemId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(flatten)]
    pub meta: WireMeta,
}

impl RawTodo {
    /// Canonical to-do without a source label; enrichment fills it in.
    pub fn normalize(self) -> Todo {
        Todo {
            id: self.id,
            owner: self.meta.owner(),
            created_at: self.meta.created_at(),
            label: self.label,
            checked: self.checked,
            source_label: None,
        }
    }
}
