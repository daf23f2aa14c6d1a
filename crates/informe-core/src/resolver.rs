//! Placeholder resolution.
//!
//! Builds the [`ReplacementMap`] for one report from the selected record, the
//! caller-supplied metadata and the doctor registry. Resolution never fails:
//! missing values become empty strings and unknown doctors get
//! [`UNKNOWN_CREDENTIAL`](informe_model::UNKNOWN_CREDENTIAL).

use informe_model::{
    DoctorRegistry, MetadataFields, PlaceholderToken, ReplacementMap, ReplacementSection,
    TabularRecord, reserved,
};
use tracing::{debug, warn};

/// Splits an incident value such as `01/02/2024 Hora: 10:30` into date and
/// time at the first separator.
pub fn split_incident(value: &str) -> Option<(&str, &str)> {
    value.split_once(reserved::INCIDENT_TIME_SEPARATOR)
}

/// Resolves every record column and every reserved metadata token.
pub fn resolve(
    record: &TabularRecord,
    metadata: &MetadataFields,
    registry: &DoctorRegistry,
) -> ReplacementMap {
    let mut map = ReplacementMap::new();
    let mut incident: Option<(String, String)> = None;

    for (name, value) in record.iter() {
        let mut text = value.render();
        if name == reserved::INCIDENT_COLUMN {
            if let Some((date, time)) = split_incident(&text) {
                let (date, time) = (date.to_string(), time.to_string());
                text.clone_from(&date);
                incident = Some((date, time));
            }
        }
        map.insert(
            ReplacementSection::Record,
            PlaceholderToken::for_field(name),
            text,
        );
    }

    if let Some((date, time)) = incident {
        map.insert(
            ReplacementSection::Record,
            PlaceholderToken::for_field(reserved::INCIDENT_DATE),
            date,
        );
        map.insert(
            ReplacementSection::Record,
            PlaceholderToken::for_field(reserved::INCIDENT_TIME),
            time,
        );
    }

    let doctor = metadata.doctor_name.as_str();
    if registry.find(doctor).is_none() {
        warn!(doctor, "doctor not found in registry");
    }
    let credential = registry.credential_or_unknown(doctor);
    let metadata_values = [
        (reserved::DOCTOR, doctor),
        (reserved::DOCTOR_CREDENTIAL, credential),
        (reserved::DOCTOR_IDENTIFICATION, credential),
        (reserved::EXPEDIENT, metadata.expedient_number.as_str()),
        (
            reserved::DOCUMENTATION_GIVEN,
            metadata.documentation_given.as_str(),
        ),
        (
            reserved::DOCUMENTATION_NOT_GIVEN,
            metadata.documentation_not_given.as_str(),
        ),
    ];
    for (name, value) in metadata_values {
        map.insert(
            ReplacementSection::Metadata,
            PlaceholderToken::for_field(name),
            value,
        );
    }

    debug!(
        record_entries = map.section(ReplacementSection::Record).count(),
        metadata_entries = map.section(ReplacementSection::Metadata).count(),
        "replacement map resolved"
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_uses_first_separator() {
        assert_eq!(
            split_incident("01/02/2024 Hora: 10:30 Hora: x"),
            Some(("01/02/2024", "10:30 Hora: x"))
        );
        assert_eq!(split_incident("01/02/2024"), None);
        assert_eq!(split_incident(""), None);
    }
}
