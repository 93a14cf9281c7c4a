//! Statement templates for the repository.
//!
//! Field and table names come from a validated `SchemaDescriptor`; every
//! value is a positional `?` placeholder.

pub fn predicate<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| format!("{} = ?", field.as_ref()))
        .collect::<Vec<_>>()
        .join(" AND ")
}

pub fn select_all(table: &str) -> String {
    format!("SELECT * FROM {}", table)
}

pub fn select_where<S: AsRef<str>>(table: &str, fields: &[S]) -> String {
    format!("SELECT * FROM {} WHERE {}", table, predicate(fields))
}

pub fn insert<S: AsRef<str>>(table: &str, fields: &[S]) -> String {
    let names: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
    let placeholders = vec!["?"; fields.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        names.join(", "),
        placeholders.join(", ")
    )
}

/// `UPDATE` assigning `set_fields` positionally and `touch` to the store's
/// clock, matched on `key_fields`
pub fn update<S: AsRef<str>, K: AsRef<str>>(
    table: &str,
    set_fields: &[S],
    touch: Option<&str>,
    key_fields: &[K],
) -> String {
    let mut assignments: Vec<String> = set_fields
        .iter()
        .map(|field| format!("{} = ?", field.as_ref()))
        .collect();
    if let Some(touch) = touch {
        assignments.push(format!("{} = CURRENT_TIMESTAMP", touch));
    }
    format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        assignments.join(", "),
        predicate(key_fields)
    )
}

pub fn delete<S: AsRef<str>>(table: &str, fields: &[S]) -> String {
    format!("DELETE FROM {} WHERE {}", table, predicate(fields))
}
