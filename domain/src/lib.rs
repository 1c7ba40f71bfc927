use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Document ID ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id.to_string())
    }
}
impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}
impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Author ---

/// The author of a document. Stored by value inside each document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// A stored record: title, content, author and creation time.
///
/// The id is optional on the way in; the store assigns one when it is
/// missing or empty. `created` is stamped on first save and then carried
/// over on every later save of the same id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<DocumentId>,
    title: String,
    content: String,
    author: Author,
    #[serde(default)]
    created: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates a document with no id and no creation time yet.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            author,
            created: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    /// The id, unless it is missing or empty.
    pub fn assigned_id(&self) -> Option<&DocumentId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }

    pub fn set_created(&mut self, created: Option<DateTime<Utc>>) {
        self.created = created;
    }
}

// --- Search Request ---

/// Conjunctive filter over stored documents. Every `None` field leaves that
/// dimension unconstrained; within a list, any single entry matching is enough.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub title_prefixes: Option<Vec<String>>,
    pub contains_contents: Option<Vec<String>>,
    pub author_ids: Option<Vec<String>>,
    /// Inclusive lower bound on `created`.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created`.
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn with_title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_contains_contents<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains_contents = Some(fragments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_author_ids<I, S>(mut self, author_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_ids = Some(author_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn with_created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// Returns true when the request places no constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }

    /// Checks a document against every present criterion.
    pub fn matches(&self, document: &Document) -> bool {
        let title_ok = self.title_prefixes.as_ref().is_none_or(|prefixes| {
            prefixes
                .iter()
                .any(|prefix| document.title().starts_with(prefix.as_str()))
        });
        let content_ok = self.contains_contents.as_ref().is_none_or(|fragments| {
            fragments
                .iter()
                .any(|fragment| document.content().contains(fragment.as_str()))
        });
        let author_ok = self
            .author_ids
            .as_ref()
            .is_none_or(|ids| ids.iter().any(|id| *id == document.author().id));
        // A document without a creation time cannot satisfy a time bound.
        let from_ok = self
            .created_from
            .is_none_or(|from| document.created().is_some_and(|created| created >= from));
        let to_ok = self
            .created_to
            .is_none_or(|to| document.created().is_some_and(|created| created <= to));

        title_ok && content_ok && author_ok && from_ok && to_ok
    }
}
