use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque record identifier; the dedup and deletion key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two fixed partitions of the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Male,
    Female,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Male, Category::Female];

    pub fn index(self) -> usize {
        match self {
            Category::Male => 0,
            Category::Female => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Male => "Male",
            Category::Female => "Female",
        }
    }

    /// Value sent as the `gender` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            Category::Male => "male",
            Category::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Category::Male),
            "female" | "f" => Some(Category::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A directory entry as shown in the list.
///
/// Equality and hashing look at `id` only: two copies with different fields
/// are the same record.
#[derive(Debug, Clone)]
pub struct UserListItem {
    pub id: UserId,
    pub display_name: String,
    pub subtitle: String,
    pub email: String,
    pub thumbnail_url: Option<String>,
    pub medium_url: Option<String>,
    pub large_url: Option<String>,
}

impl UserListItem {
    pub fn new(
        id: impl Into<UserId>,
        display_name: impl Into<String>,
        subtitle: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            subtitle: subtitle.into(),
            email: email.into(),
            thumbnail_url: None,
            medium_url: None,
            large_url: None,
        }
    }

    pub fn with_images(
        mut self,
        thumbnail_url: Option<String>,
        medium_url: Option<String>,
        large_url: Option<String>,
    ) -> Self {
        self.thumbnail_url = thumbnail_url;
        self.medium_url = medium_url;
        self.large_url = large_url;
        self
    }

    /// Best available image for the photo viewer: large, then medium, then thumbnail.
    pub fn photo_url(&self) -> Option<&str> {
        self.large_url
            .as_deref()
            .or(self.medium_url.as_deref())
            .or(self.thumbnail_url.as_deref())
    }
}

impl PartialEq for UserListItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserListItem {}

impl Hash for UserListItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Presentation toggle shared by both category panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    OneColumn,
    TwoColumn,
}

impl LayoutMode {
    pub fn toggle(&mut self) {
        *self = match self {
            LayoutMode::OneColumn => LayoutMode::TwoColumn,
            LayoutMode::TwoColumn => LayoutMode::OneColumn,
        };
    }

    pub fn columns(self) -> usize {
        match self {
            LayoutMode::OneColumn => 1,
            LayoutMode::TwoColumn => 2,
        }
    }
}
