use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Issue,
    PullRequest,
    Draft,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentType::Issue => "Issue",
            ContentType::PullRequest => "Pull request",
            ContentType::Draft => "Draft",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub status: String,
    /// Empty for drafts.
    pub url: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub cards: Vec<Card>,
}

/// The full set of columns for one project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    pub title: Option<String>,
    pub columns: Vec<Column>,
}

impl Board {
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}
