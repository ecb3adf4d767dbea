//! API utility functions
//!
//! Helpers shared by the form handlers.

/// Raw form fields in submission order
pub type FormFields = Vec<(String, String)>;

/// First value submitted for `name`, if any
///
/// Repeated keys are allowed; later values are ignored.
pub fn first_field(fields: &[(String, String)], name: &str) -> Option<String> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}
