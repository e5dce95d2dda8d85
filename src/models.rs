use serde::Serialize;

/// A post as it appears in a listing. Posts get no page of their own and
/// bodies are never rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    /// `YYYY-MM-DD`, empty when the post has no usable date.
    pub date: String,
    /// Human-readable date for templates, e.g. `Jan 5, 2024`.
    pub date_display: String,
    pub description: String,
    pub tags: Vec<String>,
    pub draft: bool,
    #[serde(skip)]
    pub raw_content: String,
}
