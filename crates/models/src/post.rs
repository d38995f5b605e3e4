use serde::{Deserialize, Serialize};

/// A single blog entry as it is stored on disk.
///
/// Text fields are free-form and may be empty; a missing key in the
/// backing file deserializes to an empty string.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Caller-supplied part of a post: everything except the id, which the
/// store assigns.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostFields {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Post {
    pub fn from_fields(id: u64, fields: PostFields) -> Self {
        Self { id, author: fields.author, title: fields.title, content: fields.content }
    }

    /// Overwrite author/title/content in place, keeping the id.
    pub fn apply(&mut self, fields: PostFields) {
        self.author = fields.author;
        self.title = fields.title;
        self.content = fields.content;
    }

    pub fn fields(&self) -> PostFields {
        PostFields {
            author: self.author.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}
