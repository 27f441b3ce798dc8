//! Reply requests read from files or stdin

use std::io::Read;
use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use nostr_sdk::prelude::*;
use serde::Deserialize;

use crate::domain::nostr::{ArticleContext, HighlightContext, ReplyContext};

/// A reply described by hand, e.g.
///
/// ```json5
/// {
///   reply_to_id: "d444...",
///   reply_to_author_id: "4d39...",
///   root_post_id: "03aa...",
///   article: { id: "my-article", event_id: "aaaa...", author_id: "4d39..." },
///   highlight: { id: "bbbb...", author_id: "4d39..." },
///   existing_tags: [["p", "4d39..."]],
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub reply_to_id: Option<String>,
    #[serde(default)]
    pub reply_to_author_id: Option<String>,
    #[serde(default)]
    pub root_post_id: Option<String>,
    #[serde(default)]
    pub article: Option<ArticleContext>,
    #[serde(default)]
    pub highlight: Option<HighlightContext>,
    #[serde(default)]
    pub existing_tags: Vec<Vec<String>>,
}

impl ReplyRequest {
    pub fn parse(source: &str) -> Result<Self> {
        json5::from_str(source).wrap_err("Failed to parse reply request")
    }

    pub fn into_context(self) -> Result<ReplyContext> {
        let existing_tags = parse_tags(self.existing_tags)?;

        Ok(ReplyContext {
            reply_to_id: self.reply_to_id,
            reply_to_author_id: self.reply_to_author_id,
            root_post_id: self.root_post_id,
            article: self.article,
            highlight: self.highlight,
            existing_tags,
        })
    }
}

pub fn parse_tags(tags: Vec<Vec<String>>) -> Result<Vec<Tag>> {
    tags.into_iter()
        .map(|tag| Tag::parse(tag.clone()).wrap_err_with(|| format!("Invalid tag: {tag:?}")))
        .collect()
}

/// Parses a tag given as a JSON array such as `["p","<pubkey>"]`.
pub fn parse_tag_json(json: &str) -> Result<Tag> {
    let values: Vec<String> =
        serde_json::from_str(json).wrap_err_with(|| format!("Invalid tag JSON: {json}"))?;
    Tag::parse(values).wrap_err_with(|| format!("Invalid tag: {json}"))
}

/// Reads a file, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
    }
}

pub fn load_request(path: &Path) -> Result<ReplyRequest> {
    ReplyRequest::parse(&read_source(path)?)
}

pub fn load_event(path: &Path) -> Result<Event> {
    let json = read_source(path)?;
    Event::from_json(json).wrap_err_with(|| format!("Invalid event in {}", path.display()))
}

pub fn load_article(path: &Path) -> Result<ArticleContext> {
    let event = load_event(path)?;
    ArticleContext::from_event(&event)
        .ok_or_else(|| eyre!("{} is not a long-form article (kind {})", path.display(), event.kind))
}

pub fn load_highlight(path: &Path) -> Result<HighlightContext> {
    let event = load_event(path)?;
    HighlightContext::from_event(&event)
        .ok_or_else(|| eyre!("{} is not a highlight (kind {})", path.display(), event.kind))
}
