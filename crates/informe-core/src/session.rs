//! Report session state held by an interactive caller.
//!
//! A report may only be produced from the form values that were confirmed.
//! Editing any field after confirmation withdraws the confirmation.

use informe_model::MetadataFields;
use tracing::debug;

/// The values a user fills in before generating a report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportForm {
    pub doctor: String,
    /// Zero-based record index in the data table.
    pub record_index: usize,
    pub expedient: String,
    pub documentation_given: String,
    pub documentation_not_given: String,
}

impl ReportForm {
    pub fn metadata(&self) -> MetadataFields {
        MetadataFields::new(self.doctor.as_str())
            .with_expedient(self.expedient.as_str())
            .with_documentation_given(self.documentation_given.as_str())
            .with_documentation_not_given(self.documentation_not_given.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportSession {
    last: Option<ReportForm>,
    ready: bool,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current form values. Returns `true` when they differ from
    /// the previously observed values, in which case readiness is cleared.
    pub fn observe(&mut self, form: ReportForm) -> bool {
        let changed = self.last.as_ref() != Some(&form);
        if changed {
            if self.ready {
                debug!("form changed, confirmation withdrawn");
            }
            self.ready = false;
            self.last = Some(form);
        }
        changed
    }

    /// Marks the observed form as confirmed. Returns `false` when no form has
    /// been observed yet.
    pub fn confirm(&mut self) -> bool {
        self.ready = self.last.is_some();
        self.ready
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The confirmed form, if the session is ready.
    pub fn ready_form(&self) -> Option<&ReportForm> {
        if self.ready { self.last.as_ref() } else { None }
    }

    pub fn current(&self) -> Option<&ReportForm> {
        self.last.as_ref()
    }
}
