//! Human-readable success notices returned alongside mutation results.

/// The handful of notices the API sends back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
    Deleted,
    Uploaded,
}

impl Notice {
    /// Render the notice for an attribute, e.g. `"E-Bazaar added successfully."`.
    pub fn render(self, attribute: &str) -> String {
        let verb = match self {
            Notice::Added => "added",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
            Notice::Uploaded => "uploaded",
        };
        format!("{attribute} {verb} successfully.")
    }
}
