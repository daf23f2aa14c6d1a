use serde::{Deserialize, Serialize};

/// Report fields supplied by the person generating the report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataFields {
    /// Full name of the reporting doctor, as listed in the registry.
    pub doctor_name: String,
    /// Case (expedient) number.
    #[serde(default)]
    pub expedient_number: String,
    /// Documentation supplied by the patient.
    #[serde(default)]
    pub documentation_given: String,
    /// Documentation the patient did not supply.
    #[serde(default)]
    pub documentation_not_given: String,
}

impl MetadataFields {
    pub fn new(doctor_name: impl Into<String>) -> Self {
        Self {
            doctor_name: doctor_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_expedient(mut self, value: impl Into<String>) -> Self {
        self.expedient_number = value.into();
        self
    }

    #[must_use]
    pub fn with_documentation_given(mut self, value: impl Into<String>) -> Self {
        self.documentation_given = value.into();
        self
    }

    #[must_use]
    pub fn with_documentation_not_given(mut self, value: impl Into<String>) -> Self {
        self.documentation_not_given = value.into();
        self
    }
}
