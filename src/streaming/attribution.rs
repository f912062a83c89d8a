// Thu Jan 16 2026 - Alex

use crate::diagnostics::{member_pattern, DiagnosticEmitter, Severity};
use crate::reflection::FieldDescriptor;
use crate::streaming::{DetectionReport, FieldDigests};

/// Members whose digest differs between the two sentinel runs, in
/// declaration order.
pub fn differing_fields<'a>(pattern_a: &'a FieldDigests, pattern_b: &FieldDigests) -> Vec<&'a FieldDescriptor> {
    pattern_a
        .iter()
        .filter(|(name, digest)| pattern_b.get(name).map_or(false, |other| other.digest != digest.digest))
        .map(|(_, digest)| &digest.field)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    /// Members blamed by name, whether or not their diagnostic was suppressed.
    pub fields: Vec<String>,
    /// No member could be blamed and the generic diagnostic was reported.
    pub generic: bool,
}

/// Reports the members of `class_name` behind a positive detection.
pub fn attribute(
    class_name: &str,
    decl_file: &str,
    report: &DetectionReport,
    diagnostics: &DiagnosticEmitter,
) -> Attribution {
    let mut attribution = Attribution::default();

    for field in differing_fields(&report.first.fields, &report.alternate.fields) {
        let message = format!(
            "Streamed member '{}' of data object '{}' not initialized by constructor!",
            field.display_with_type(),
            class_name
        );
        let pattern = match member_pattern(&field.name) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                log::warn!("No search pattern for member '{}': {}", field.name, e);
                None
            }
        };
        diagnostics.emit(decl_file, pattern.as_ref(), Severity::Error, &message);
        attribution.fields.push(field.name.clone());
    }

    if attribution.fields.is_empty() {
        // Padding, or a member excluded from digesting.
        diagnostics.error(
            decl_file,
            &format!(
                "Data object '{}' streams uninitialized memory after default construction, unable to find the member which causes this!",
                class_name
            ),
        );
        attribution.generic = true;
    }
    attribution
}
