/// A project field as reported by the board query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    /// Option names, present only for single-select fields.
    pub options: Option<Vec<String>>,
}

impl FieldDefinition {
    pub fn is_single_select(&self) -> bool {
        self.options.is_some()
    }
}

/// What a project item points at, resolved once from `__typename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    Issue { title: String, url: String },
    PullRequest { title: String, url: String },
    /// Draft issues and any content type we do not recognise.
    Draft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text { field_id: String, text: String },
    SingleSelect { field_id: String, option: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub id: String,
    pub content: ItemContent,
    pub field_values: Vec<FieldValue>,
}
