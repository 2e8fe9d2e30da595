//! Raw record construction: key/value lines into flat per-record mappings
//!
//! A record is one `- key: value` line plus its indented continuation lines.
//! Values are either scalars or bracketed comma lists. Records are ephemeral;
//! the entity loaders consume them immediately.

/// One field value from the markdown format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The scalar text, or `None` for list values
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// Interpret the value as a list of names: bracket lists element-wise,
    /// scalars split on commas. Entries are trimmed and empties dropped.
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            FieldValue::Scalar(s) => s.split(',').collect(),
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        };
        raw.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Ordered field-name → value mapping for one record.
///
/// Field names are lowercased at parse time. A key repeated within one record
/// overwrites the earlier value in place (last occurrence wins).
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, key: String, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Trimmed scalar for `key`, empty string when absent or list-valued
    pub fn scalar(&self, key: &str) -> String {
        self.get(key)
            .and_then(FieldValue::as_scalar)
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }

    /// First present of `keys`, read as a name list (see [`FieldValue::names`])
    pub fn name_list(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .find_map(|key| self.get(key))
            .map(FieldValue::names)
            .unwrap_or_default()
    }
}

/// Split one line (marker already stripped) on the first colon.
///
/// Returns `None` when there is no colon ("no field"). The key is trimmed and
/// lowercased; the value is trimmed, and `[...]` becomes a comma-split list
/// with each element trimmed (empty brackets yield an empty list).
pub fn parse_key_value(line: &str) -> Option<(String, FieldValue)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().to_lowercase();
    let value = value.trim();

    if let Some(inner) = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let inner = inner.trim();
        if inner.is_empty() {
            return Some((key, FieldValue::List(Vec::new())));
        }
        let items = inner.split(',').map(|s| s.trim().to_string()).collect();
        return Some((key, FieldValue::List(items)));
    }

    Some((key, FieldValue::Scalar(value.to_string())))
}

/// Whether a line is a record continuation (four spaces or a tab of indent)
pub fn is_indented(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    line.starts_with("    ") || line.starts_with('\t')
}
