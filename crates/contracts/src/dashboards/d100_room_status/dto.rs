use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::shared::text::normalize;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Semantic purpose a spreadsheet column may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Room,
    Status,
    Location,
    Shift,
    Course,
    Schedule,
    Instructor,
    Notes,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Room,
        Role::Status,
        Role::Location,
        Role::Shift,
        Role::Course,
        Role::Schedule,
        Role::Instructor,
        Role::Notes,
    ];

    /// Roles that get a dropdown filter on the board.
    pub const FILTERABLE: [Role; 3] = [Role::Status, Role::Location, Role::Shift];

    /// Query-string key (English).
    pub fn key(self) -> &'static str {
        match self {
            Role::Room => "room",
            Role::Status => "status",
            Role::Location => "location",
            Role::Shift => "shift",
            Role::Course => "course",
            Role::Schedule => "schedule",
            Role::Instructor => "instructor",
            Role::Notes => "notes",
        }
    }

    /// Query-string alias matching the spreadsheet vocabulary (pt-BR).
    pub fn alias(self) -> &'static str {
        match self {
            Role::Room => "sala",
            Role::Status => "status",
            Role::Location => "local",
            Role::Shift => "turno",
            Role::Course => "curso",
            Role::Schedule => "horario",
            Role::Instructor => "docente",
            Role::Notes => "obs",
        }
    }

    /// Human label used by the UI.
    pub fn label(self) -> &'static str {
        match self {
            Role::Room => "Sala",
            Role::Status => "Status",
            Role::Location => "Local/Bloco",
            Role::Shift => "Turno",
            Role::Course => "Curso",
            Role::Schedule => "Horário",
            Role::Instructor => "Docente",
            Role::Notes => "Obs",
        }
    }

    /// Resolves a query-string parameter name (key or alias, any case/accents).
    pub fn from_param(name: &str) -> Option<Role> {
        let name = normalize(name);
        Role::ALL
            .into_iter()
            .find(|role| role.key() == name || role.alias() == name)
    }
}

// ---------------------------------------------------------------------------
// Rows and datasets
// ---------------------------------------------------------------------------

/// One spreadsheet record: column name -> cell value, in header order.
///
/// Looking up a column the row does not carry yields the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from (column, value) pairs; a repeated column keeps its first value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Row::new();
        for (field, value) in pairs {
            row.insert(field.into(), value.into());
        }
        row
    }

    /// Appends a cell unless the column is already present.
    pub fn insert(&mut self, field: String, value: String) {
        if !self.contains(&field) {
            self.cells.push((field, value));
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == field)
    }

    pub fn get(&self, field: &str) -> &str {
        self.cells
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Trimmed value of an optional column; absent column or cell is `""`.
    pub fn value_of(&self, field: Option<&str>) -> &str {
        field.map(|f| self.get(f).trim()).unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (field, value) in &self.cells {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column name to cell text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((field, value)) =
                    access.next_entry::<String, Option<String>>()?
                {
                    row.insert(field, value.unwrap_or_default());
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Ordered, distinct column names of one load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(Vec<String>);

impl FieldSet {
    /// Keeps the first occurrence of every non-blank name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !name.trim().is_empty() && !fields.contains(&name) {
                fields.push(name);
            }
        }
        FieldSet(fields)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All rows of one load cycle together with their field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub fields: FieldSet,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(fields: FieldSet, rows: Vec<Row>) -> Self {
        Self { fields, rows }
    }

    /// Dataset without a parse header: the field set comes from the first row's keys.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let fields = rows
            .first()
            .map(|row| FieldSet::new(row.fields()))
            .unwrap_or_default();
        Self { fields, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Role mapping, overrides, selections, options
// ---------------------------------------------------------------------------

/// Optional column per role. Every present column belongs to the field set it
/// was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    pub room: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub shift: Option<String>,
    pub course: Option<String>,
    pub schedule: Option<String>,
    pub instructor: Option<String>,
    pub notes: Option<String>,
}

impl RoleMapping {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Room => self.room.as_deref(),
            Role::Status => self.status.as_deref(),
            Role::Location => self.location.as_deref(),
            Role::Shift => self.shift.as_deref(),
            Role::Course => self.course.as_deref(),
            Role::Schedule => self.schedule.as_deref(),
            Role::Instructor => self.instructor.as_deref(),
            Role::Notes => self.notes.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Room => &mut self.room,
            Role::Status => &mut self.status,
            Role::Location => &mut self.location,
            Role::Shift => &mut self.shift,
            Role::Course => &mut self.course,
            Role::Schedule => &mut self.schedule,
            Role::Instructor => &mut self.instructor,
            Role::Notes => &mut self.notes,
        }
    }

    pub fn is_mapped(&self, role: Role) -> bool {
        self.get(role).is_some()
    }

    /// Mapped (role, column) pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|column| (role, column)))
    }
}

/// Caller-supplied column names forcing a role (query-string directives).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleOverrides(BTreeMap<Role, String>);

impl RoleOverrides {
    /// Blank values are treated as absent.
    pub fn set(&mut self, role: Role, column: impl Into<String>) {
        let column = column.into();
        if column.trim().is_empty() {
            self.0.remove(&role);
        } else {
            self.0.insert(role, column);
        }
    }

    pub fn with(mut self, role: Role, column: impl Into<String>) -> Self {
        self.set(role, column);
        self
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.0.iter().map(|(role, column)| (*role, column.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Selected dropdown value per role. Blank selections are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections(BTreeMap<Role, String>);

impl Selections {
    pub fn set(&mut self, role: Role, value: impl Into<String>) {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            self.0.remove(&role);
        } else {
            self.0.insert(role, value);
        }
    }

    pub fn with(mut self, role: Role, value: impl Into<String>) -> Self {
        self.set(role, value);
        self
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.0.iter().map(|(role, value)| (*role, value.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops every selection whose value is no longer offered for its role.
    pub fn retain_available(&mut self, options: &RoleOptions) {
        self.0
            .retain(|role, value| options.for_role(*role).iter().any(|o| *o == *value));
    }
}

/// Distinct dropdown values per filterable role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleOptions(BTreeMap<Role, Vec<String>>);

impl RoleOptions {
    pub fn insert(&mut self, role: Role, values: Vec<String>) {
        self.0.insert(role, values);
    }

    pub fn for_role(&self, role: Role) -> &[String] {
        self.0.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Summary and snapshot
// ---------------------------------------------------------------------------

/// One entry of the status summary strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub label: String,
    pub count: usize,
}

/// Non-fatal condition shown in the dismissible banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardWarning {
    /// Last refresh failed; the previous data is still displayed.
    LoadFailed { message: String },
    /// Source URL missing from the server configuration.
    SourceNotConfigured,
    /// No column could be assigned the room role.
    MissingRoomColumn,
}

impl BoardWarning {
    pub fn message(&self) -> String {
        match self {
            BoardWarning::LoadFailed { message } => format!(
                "Não foi possível atualizar os dados ({}). Exibindo a última versão carregada.",
                message
            ),
            BoardWarning::SourceNotConfigured => {
                "Falta configurar o link CSV ([source] csv_url no config.toml).".to_string()
            }
            BoardWarning::MissingRoomColumn => format!(
                "Coluna de sala não encontrada. Use ?{}=NOME_DA_COLUNA na URL.",
                Role::Room.alias()
            ),
        }
    }
}

/// Read-only view of one board cycle, as served by `/api/d100/board`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub fields: FieldSet,
    pub mapping: RoleMapping,
    pub options: RoleOptions,
    /// Status counts over all rows, ignoring the active filters
    pub counts: Vec<StatusCount>,
    /// Rows passing the requested filters, in source order
    pub rows: Vec<Row>,
    pub total_rows: usize,
    pub warnings: Vec<BoardWarning>,
    pub fetched_at: Option<DateTime<Utc>>,
}
