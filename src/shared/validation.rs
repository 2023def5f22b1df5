use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

lazy_static! {
    /// Submitter identifiers are exactly twelve ASCII digits
    /// - Valid: "123456789012", "000000000000"
    /// - Invalid: "12345678901", "1234567890123", "12345678901a", "١٢٣٤٥٦٧٨٩٠١٢"
    pub static ref USER_ID_REGEX: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
}

/// Flatten validator output into its messages, sorted by field name
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}
