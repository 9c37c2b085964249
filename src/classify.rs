use std::collections::HashSet;

use crate::model::{Card, Column, ContentType, FieldDefinition, FieldValue, ItemContent, RawItem};

/// Column names that always lead the board, in this order, when they have cards.
pub const DEFAULT_COLUMN_ORDER: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Status given to items that carry no status value.
pub const DEFAULT_STATUS: &str = "To Do";

const STATUS_FIELD_NAME: &str = "Status";

/// Turn raw project items into ordered status columns.
///
/// Items whose title resolves to an empty string are dropped. Columns named in
/// [`DEFAULT_COLUMN_ORDER`] come first; every other status follows in the order
/// its first card was seen.
pub fn classify(fields: &[FieldDefinition], items: &[RawItem]) -> Vec<Column> {
    let status_fields: HashSet<&str> = fields
        .iter()
        .filter(|f| f.is_single_select() && f.name == STATUS_FIELD_NAME)
        .map(|f| f.id.as_str())
        .collect();

    let mut groups: Vec<Column> = Vec::new();
    for item in items {
        let Some(card) = to_card(item, &status_fields) else {
            continue;
        };
        match groups.iter_mut().find(|c| c.name == card.status) {
            Some(column) => column.cards.push(card),
            None => groups.push(Column {
                name: card.status.clone(),
                cards: vec![card],
            }),
        }
    }

    let mut columns = Vec::with_capacity(groups.len());
    for name in DEFAULT_COLUMN_ORDER {
        if let Some(pos) = groups.iter().position(|c| c.name == name) {
            columns.push(groups.remove(pos));
        }
    }
    columns.extend(groups);
    columns
}

fn to_card(item: &RawItem, status_fields: &HashSet<&str>) -> Option<Card> {
    let (title, url, content_type) = match &item.content {
        ItemContent::Issue { title, url } => (title.clone(), url.clone(), ContentType::Issue),
        ItemContent::PullRequest { title, url } => {
            (title.clone(), url.clone(), ContentType::PullRequest)
        }
        ItemContent::Draft => (draft_title(item), String::new(), ContentType::Draft),
    };

    if title.is_empty() {
        return None;
    }

    Some(Card {
        id: item.id.clone(),
        title,
        status: resolve_status(item, status_fields),
        url,
        content_type,
    })
}

fn draft_title(item: &RawItem) -> String {
    item.field_values
        .iter()
        .rev()
        .find_map(|v| match v {
            FieldValue::Text { text, .. } if !text.is_empty() => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

fn resolve_status(item: &RawItem, status_fields: &HashSet<&str>) -> String {
    item.field_values
        .iter()
        .find_map(|v| match v {
            FieldValue::SingleSelect { field_id, option }
                if !option.is_empty() && status_fields.contains(field_id.as_str()) =>
            {
                Some(option.clone())
            }
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_STATUS.to_string())
}
