//! Backup snapshot section names and structural validation.
//!
//! A snapshot is a JSON object with one array per table. The section names
//! are part of the backup file format and must not change.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Section name constants
// ---------------------------------------------------------------------------

pub const SECTION_ACTIVITY_FIELDS: &str = "activityFields";
pub const SECTION_SERVICES: &str = "services";
pub const SECTION_COLLABORATORS: &str = "colaboradores";
pub const SECTION_SERVICE_COLLABORATORS: &str = "serviceColaboradores";
pub const SECTION_APPOINTMENTS: &str = "appointments";
pub const SECTION_VISITS: &str = "atendimentos";

/// All sections a snapshot must carry.
pub const ALL_SECTIONS: &[&str] = &[
    SECTION_ACTIVITY_FIELDS,
    SECTION_SERVICES,
    SECTION_COLLABORATORS,
    SECTION_SERVICE_COLLABORATORS,
    SECTION_APPOINTMENTS,
    SECTION_VISITS,
];

/// Sections absent from `value` (or present but not arrays).
pub fn missing_sections(value: &Value) -> Vec<&'static str> {
    ALL_SECTIONS
        .iter()
        .copied()
        .filter(|section| !matches!(value.get(section), Some(Value::Array(_))))
        .collect()
}

/// Reject a snapshot that lacks any required section.
///
/// Must run before anything is cleared.
pub fn validate_sections(value: &Value) -> Result<(), CoreError> {
    if !value.is_object() {
        return Err(CoreError::Integrity(
            "Snapshot must be a JSON object".to_string(),
        ));
    }
    let missing = missing_sections(value);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Integrity(format!(
            "Snapshot is incomplete, missing sections: {}",
            missing.join(", ")
        )))
    }
}

/// Check that every non-null reference points at a known id.
///
/// `context` names the referencing column for the error message, e.g.
/// `"appointments.colaboradorId"`.
pub fn ensure_references<I>(context: &str, known: &BTreeSet<DbId>, refs: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = Option<DbId>>,
{
    let dangling: BTreeSet<DbId> = refs
        .into_iter()
        .flatten()
        .filter(|id| !known.contains(id))
        .collect();
    if dangling.is_empty() {
        Ok(())
    } else {
        let ids: Vec<String> = dangling.iter().map(DbId::to_string).collect();
        Err(CoreError::Integrity(format!(
            "{context} references unknown ids: {}",
            ids.join(", ")
        )))
    }
}

/// Check that no id appears twice within a section.
pub fn ensure_unique_ids<I>(section: &str, ids: I) -> Result<BTreeSet<DbId>, CoreError>
where
    I: IntoIterator<Item = DbId>,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::Integrity(format!(
                "{section} contains duplicate id {id}"
            )));
        }
    }
    Ok(seen)
}
