use common::{Digest, Repository, SummarizedStory};
use time::OffsetDateTime;

pub const DESCRIPTION_LIMIT: usize = 100;

/// Builds the digest document. `now` is the capture time of the run, already
/// shifted into the reader's offset; the output depends on nothing else.
pub fn format_digest(
    stories: &[SummarizedStory],
    repos: &[Repository],
    now: OffsetDateTime,
) -> Digest {
    Digest {
        title: format_title(now),
        body: format_body(stories, repos),
    }
}

pub fn format_title(now: OffsetDateTime) -> String {
    format!("{:02}月{:02}日 技术日报", u8::from(now.month()), now.day())
}

fn format_body(stories: &[SummarizedStory], repos: &[Repository]) -> String {
    let mut body = String::new();

    if !stories.is_empty() {
        body.push_str(&format!("# Hacker News 精选 (Top {})\n---\n", stories.len()));
        for (idx, item) in stories.iter().enumerate() {
            body.push_str(&format!("## {}. {}\n", idx + 1, item.story.title));
            body.push_str(&format!("[原文链接]({})\n\n", item.story.url));
            body.push_str(&format!("{}\n", item.summary));
            body.push_str("---\n\n");
        }
    }

    if !repos.is_empty() {
        body.push_str(&format!("\n# GitHub Trending (Top {})\n---\n", repos.len()));
        for (idx, repo) in repos.iter().enumerate() {
            body.push_str(&format!("## {}. [{}]({})\n", idx + 1, repo.name, repo.url));
            body.push_str(&format!(
                "- 语言: {} | Stars: {}\n",
                repo.language,
                group_thousands(repo.stars)
            ));
            let description: String = repo.description.chars().take(DESCRIPTION_LIMIT).collect();
            body.push_str(&format!("- {}\n\n", description));
        }
    }

    body
}

/// `1234567` → `1,234,567`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
