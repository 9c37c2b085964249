pub mod board;
pub mod item;
pub mod project;

pub use board::{Board, Card, Column, ContentType};
pub use item::{FieldDefinition, FieldValue, ItemContent, RawItem};
pub use project::{Project, ProjectEntry};
