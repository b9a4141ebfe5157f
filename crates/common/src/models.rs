/// A ranked Hacker News story that links to an external article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub url: String,
    pub score: u64,
}

/// A story together with the summary shown to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizedStory {
    pub story: Story,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub description: String,
    pub stars: u64,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub title: String,
    /// Markdown.
    pub body: String,
}
