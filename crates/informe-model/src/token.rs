use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal `{{name}}` marker inside a template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaceholderToken(String);

impl PlaceholderToken {
    pub const OPEN: &'static str = "{{";
    pub const CLOSE: &'static str = "}}";

    /// Wraps a field name in braces. The name is used verbatim.
    pub fn for_field(name: &str) -> Self {
        Self(format!("{}{name}{}", Self::OPEN, Self::CLOSE))
    }

    /// Accepts an already-delimited token such as `{{Hora}}`.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.strip_prefix(Self::OPEN)?.strip_suffix(Self::CLOSE)?;
        if name.is_empty() || name.contains(Self::OPEN) || name.contains(Self::CLOSE) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name between the braces.
    pub fn name(&self) -> &str {
        &self.0[Self::OPEN.len()..self.0.len() - Self::CLOSE.len()]
    }
}

impl fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaceholderToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reserved field names with fixed meaning in report templates.
pub mod reserved {
    /// Record column holding the incident date, optionally followed by a time.
    pub const INCIDENT_COLUMN: &str = "Fecha siniestro";
    /// Separator between the incident date and time inside [`INCIDENT_COLUMN`].
    pub const INCIDENT_TIME_SEPARATOR: &str = " Hora: ";
    /// Derived date-only field.
    pub const INCIDENT_DATE: &str = "Fecha Siniestro";
    /// Derived time-only field.
    pub const INCIDENT_TIME: &str = "Hora";

    pub const DOCTOR: &str = "Doctor";
    pub const DOCTOR_CREDENTIAL: &str = "Numero de colegiado";
    pub const DOCTOR_IDENTIFICATION: &str = "Doctor Identification";
    pub const EXPEDIENT: &str = "Expediente";
    pub const DOCUMENTATION_GIVEN: &str = "Documentación aportada";
    pub const DOCUMENTATION_NOT_GIVEN: &str = "Documentación no aportada";

    /// Metadata fields in resolution order.
    pub const METADATA_FIELDS: [&str; 6] = [
        DOCTOR,
        DOCTOR_CREDENTIAL,
        DOCTOR_IDENTIFICATION,
        EXPEDIENT,
        DOCUMENTATION_GIVEN,
        DOCUMENTATION_NOT_GIVEN,
    ];
}
