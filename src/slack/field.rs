//! Titled fields displayed in a table inside an attachment.

use serde::Serialize;

/// A single attachment field.
///
/// <https://api.slack.com/reference/messaging/attachments#field_objects>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentField {
    title: String,
    value: String,
    /// Short fields render half-width, alongside a sibling.
    short: bool,
}

impl Default for AttachmentField {
    fn default() -> Self {
        AttachmentField {
            title: String::new(),
            value: String::new(),
            short: true,
        }
    }
}

impl AttachmentField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = title.into();
        self
    }

    pub fn content<T: Into<String>>(mut self, value: T) -> Self {
        self.value = value.into();
        self
    }

    /// Render the field across the full width of the attachment.
    pub fn long(mut self) -> Self {
        self.short = false;
        self
    }

    pub fn short(mut self) -> Self {
        self.short = true;
        self
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn is_short(&self) -> bool {
        self.short
    }
}

/// The two ways callers hand a field to an attachment. Either is resolved to
/// an [AttachmentField] as soon as it's added, so serialisation never has to
/// know which path produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// A bare title and value, which is always short.
    Pair(String, String),
    Built(AttachmentField),
}

impl From<FieldSource> for AttachmentField {
    fn from(x: FieldSource) -> Self {
        match x {
            FieldSource::Pair(title, value) => AttachmentField::new().title(title).content(value),
            FieldSource::Built(f) => f,
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for FieldSource {
    fn from((k, v): (K, V)) -> Self {
        FieldSource::Pair(k.into(), v.into())
    }
}

impl From<AttachmentField> for FieldSource {
    fn from(x: AttachmentField) -> Self {
        FieldSource::Built(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_to_short() {
        assert!(AttachmentField::new().is_short());
        assert!(!AttachmentField::new().long().is_short());
        assert!(AttachmentField::new().long().short().is_short());
    }

    #[test]
    fn test_serialize() {
        let x = AttachmentField::new()
            .title("Special powers")
            .content("Zonda")
            .long();

        assert_eq!(
            serde_json::to_value(x).unwrap(),
            json!({ "title": "Special powers", "value": "Zonda", "short": false })
        );
    }

    #[test]
    fn test_pair_resolves_to_short_field() {
        let x: AttachmentField = FieldSource::from(("Project", "Laravel")).into();

        assert_eq!(x, AttachmentField::new().title("Project").content("Laravel"));
    }
}
