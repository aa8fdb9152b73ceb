/// Shared behavior for the name-keyed reference entities (provinces, cities,
/// document types, vehicle types, branches). Identifying names are stored
/// uppercased so uniqueness comparisons never depend on input casing.
pub trait Named {
    fn name(&self) -> &str;

    fn display_name(&self) -> String {
        self.name().to_string()
    }
}

/// Uppercase an identifying text field before validation and storage.
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}
