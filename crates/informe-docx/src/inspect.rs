//! Read-only queries over a template or a completed report.
//!
//! Completed reports carry legacy form-field checkboxes (`w:ffData` with a
//! `w:checkBox`). The consent and next-visit questions of the report form are
//! answered with these boxes.

use std::fmt;

use informe_model::PlaceholderToken;

use crate::package::TemplateDocument;
use crate::xml::{Element, W_CHECK_BOX, W_CHECKED, W_FF_DATA, W_NAME, W_T, W_VAL};

/// Form field name of the two consent checkboxes ("yes" first, then "no").
pub const CONSENT_FIELD: &str = "Casilla9";

/// Text preceding the three next-visit checkboxes.
pub const NEXT_VISIT_MARKER: &str = "Próxima visita:";

/// One legacy form checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCheckbox {
    /// Value of the enclosing `w:ffData/w:name`, if any.
    pub name: Option<String>,
    /// `w:checked` is present and its value is not `0`/`false`.
    pub checked: bool,
    /// `w:checked` is present with value `0`/`false`.
    pub explicit_unchecked: bool,
}

impl FormCheckbox {
    fn from_element(check_box: &Element, name: Option<&str>) -> Self {
        let (checked, explicit_unchecked) = match check_box.first_child(W_CHECKED) {
            None => (false, false),
            Some(element) => {
                let off = matches!(element.attribute(W_VAL).as_deref(), Some("0" | "false"));
                (!off, off)
            }
        };
        Self {
            name: name.map(ToString::to_string),
            checked,
            explicit_unchecked,
        }
    }
}

/// Answer of the informed-consent question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Given,
    Refused,
    Unknown,
}

impl ConsentState {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Given => "yes",
            Self::Refused => "no",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of visit ticked after a next-visit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextVisitKind {
    FollowUp,
    Final,
    FinalDefinitive,
}

impl NextVisitKind {
    const ORDER: [Self; 3] = [Self::FollowUp, Self::Final, Self::FinalDefinitive];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::FollowUp => "Seguimiento",
            Self::Final => "Final",
            Self::FinalDefinitive => "Final definitive",
        }
    }
}

impl fmt::Display for NextVisitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

enum Item {
    Text(String),
    Checkbox(FormCheckbox),
}

fn document_items(document: &TemplateDocument) -> Vec<Item> {
    let mut items = Vec::new();
    if let Some(body) = document.body() {
        walk(body, None, &mut items);
    }
    items
}

fn walk(element: &Element, field_name: Option<&str>, items: &mut Vec<Item>) {
    if element.is(W_T) {
        items.push(Item::Text(element.own_text()));
        return;
    }
    if element.is(W_CHECK_BOX) {
        items.push(Item::Checkbox(FormCheckbox::from_element(element, field_name)));
        return;
    }
    let own_name = if element.is(W_FF_DATA) {
        element
            .first_child(W_NAME)
            .and_then(|name| name.attribute(W_VAL))
    } else {
        None
    };
    let name = own_name.as_deref().or(field_name);
    for child in element.child_elements() {
        walk(child, name, items);
    }
}

/// All legacy form checkboxes in document order.
pub fn form_checkboxes(document: &TemplateDocument) -> Vec<FormCheckbox> {
    document_items(document)
        .into_iter()
        .filter_map(|item| match item {
            Item::Checkbox(checkbox) => Some(checkbox),
            Item::Text(_) => None,
        })
        .collect()
}

/// Reads the consent answer from the [`CONSENT_FIELD`] checkboxes.
///
/// The first box with an explicit unchecked value decides: the first
/// occurrence means consent was given, the second that it was refused.
pub fn consent_state(document: &TemplateDocument) -> ConsentState {
    let position = form_checkboxes(document)
        .iter()
        .filter(|checkbox| checkbox.name.as_deref() == Some(CONSENT_FIELD))
        .position(|checkbox| checkbox.explicit_unchecked);
    match position {
        Some(0) => ConsentState::Given,
        Some(1) => ConsentState::Refused,
        _ => ConsentState::Unknown,
    }
}

/// One entry per [`NEXT_VISIT_MARKER`] followed by at least three checkboxes.
///
/// The first checked box of the three gives the kind; `None` when none is
/// checked.
pub fn next_visit_kinds(document: &TemplateDocument) -> Vec<Option<NextVisitKind>> {
    let items = document_items(document);
    let mut kinds = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Item::Text(text) = item else {
            continue;
        };
        if text.trim() != NEXT_VISIT_MARKER {
            continue;
        }
        let boxes: Vec<&FormCheckbox> = items[index + 1..]
            .iter()
            .filter_map(|item| match item {
                Item::Checkbox(checkbox) => Some(checkbox),
                Item::Text(_) => None,
            })
            .take(NextVisitKind::ORDER.len())
            .collect();
        if boxes.len() < NextVisitKind::ORDER.len() {
            continue;
        }
        let kind = boxes
            .iter()
            .zip(NextVisitKind::ORDER)
            .find(|(checkbox, _)| checkbox.checked)
            .map(|(_, kind)| kind);
        kinds.push(kind);
    }
    kinds
}

impl TemplateDocument {
    /// Distinct `{{...}}` tokens in paragraph and cell text, in order of first
    /// appearance.
    pub fn placeholders(&self) -> Vec<PlaceholderToken> {
        let mut found = Vec::new();
        for block in self.block_texts() {
            scan_tokens(&block.text, &mut found);
        }
        found
    }
}

fn scan_tokens(text: &str, found: &mut Vec<PlaceholderToken>) {
    let open = PlaceholderToken::OPEN;
    let close = PlaceholderToken::CLOSE;
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let candidate_start = &rest[start..];
        let Some(end) = candidate_start[open.len()..].find(close) else {
            break;
        };
        let candidate = &candidate_start[..open.len() + end + close.len()];
        match PlaceholderToken::parse(candidate) {
            Some(token) => {
                if !found.contains(&token) {
                    found.push(token);
                }
                rest = &candidate_start[candidate.len()..];
            }
            None => rest = &candidate_start[open.len()..],
        }
    }
}
