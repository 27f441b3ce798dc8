use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use super::tag::{d_kind, e_kind, tag_value, HIGHLIGHT_KIND, LONG_FORM_KIND};

/// An article the reply is attached to.
///
/// All three identifiers are needed to address the article, so a partially
/// known article never contributes tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContext {
    /// The `d` identifier of the article
    pub id: Option<String>,
    pub event_id: Option<String>,
    pub author_id: Option<String>,
}

impl ArticleContext {
    pub fn new(
        id: Option<String>,
        event_id: Option<String>,
        author_id: Option<String>,
    ) -> Self {
        Self {
            id,
            event_id,
            author_id,
        }
    }

    /// Reads the article coordinates from a long-form event. Other kinds yield `None`.
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind != Kind::from(LONG_FORM_KIND) {
            return None;
        }

        let d_kind = d_kind();
        let id = event
            .tags
            .iter()
            .find_map(|tag| tag_value(tag, &d_kind))
            .unwrap_or_default();

        Some(Self {
            id: Some(id.to_string()),
            event_id: Some(event.id.to_hex()),
            author_id: Some(event.pubkey.to_hex()),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.id.is_some() && self.event_id.is_some() && self.author_id.is_some()
    }
}

/// A highlighted excerpt the reply is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightContext {
    pub id: String,
    #[serde(default)]
    pub author_id: Option<String>,
}

impl HighlightContext {
    pub fn new(id: impl Into<String>, author_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            author_id,
        }
    }

    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind != Kind::from(HIGHLIGHT_KIND) {
            return None;
        }

        Some(Self::new(event.id.to_hex(), Some(event.pubkey.to_hex())))
    }
}

/// The context that wins the root of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRoot<'a> {
    Highlight {
        id: &'a str,
    },
    Article {
        id: &'a str,
        event_id: &'a str,
        author_id: &'a str,
    },
    Post {
        id: &'a str,
    },
    None,
}

impl<'a> ThreadRoot<'a> {
    /// Picks the root in order highlight, article, post.
    pub fn resolve(
        highlight_id: Option<&'a str>,
        article_id: Option<&'a str>,
        article_event_id: Option<&'a str>,
        article_author_id: Option<&'a str>,
        root_post_id: Option<&'a str>,
    ) -> Self {
        match (
            highlight_id,
            (article_id, article_event_id, article_author_id),
            root_post_id,
        ) {
            (Some(id), _, _) => Self::Highlight { id },
            (None, (Some(id), Some(event_id), Some(author_id)), _) => Self::Article {
                id,
                event_id,
                author_id,
            },
            (None, _, Some(id)) => Self::Post { id },
            _ => Self::None,
        }
    }

    /// Id of the event referenced by the `e` root tag, if any.
    pub fn event_id(&self) -> Option<&'a str> {
        match *self {
            Self::Highlight { id } | Self::Post { id } => Some(id),
            Self::Article { event_id, .. } => Some(event_id),
            Self::None => None,
        }
    }
}

/// Everything known about the item being replied to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyContext {
    pub reply_to_id: Option<String>,
    pub reply_to_author_id: Option<String>,
    pub root_post_id: Option<String>,
    pub article: Option<ArticleContext>,
    pub highlight: Option<HighlightContext>,
    /// Tags of the reply target
    pub existing_tags: Vec<Tag>,
}

impl ReplyContext {
    pub fn new(reply_to_id: impl Into<String>, reply_to_author_id: impl Into<String>) -> Self {
        Self {
            reply_to_id: Some(reply_to_id.into()),
            reply_to_author_id: Some(reply_to_author_id.into()),
            ..Default::default()
        }
    }

    /// Derives the context from the event being replied to.
    ///
    /// The root post is the target's NIP-10 root, or the target itself when it
    /// does not reference any event.
    pub fn from_event(reply_to: &Event) -> Self {
        let root_post_id = if reply_to.tags.iter().any(|tag| tag.kind() == e_kind()) {
            find_root_event_id(reply_to.tags.iter())
        } else {
            Some(reply_to.id.to_hex())
        };

        Self {
            reply_to_id: Some(reply_to.id.to_hex()),
            reply_to_author_id: Some(reply_to.pubkey.to_hex()),
            root_post_id,
            article: None,
            highlight: None,
            existing_tags: reply_to.tags.iter().cloned().collect(),
        }
    }

    pub fn root_post_id(mut self, root_post_id: impl Into<String>) -> Self {
        self.root_post_id = Some(root_post_id.into());
        self
    }

    pub fn article(mut self, article: ArticleContext) -> Self {
        self.article = Some(article);
        self
    }

    pub fn highlight(mut self, highlight: HighlightContext) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn existing_tags(mut self, tags: Vec<Tag>) -> Self {
        self.existing_tags = tags;
        self
    }

    /// The article, only when it is complete enough to contribute tags.
    pub fn root_article(&self) -> Option<&ArticleContext> {
        self.article.as_ref().filter(|a| a.is_complete())
    }

    pub fn thread_root(&self) -> ThreadRoot<'_> {
        let article = self.root_article();
        ThreadRoot::resolve(
            self.highlight.as_ref().map(|h| h.id.as_str()),
            article.and_then(|a| a.id.as_deref()),
            article.and_then(|a| a.event_id.as_deref()),
            article.and_then(|a| a.author_id.as_deref()),
            self.root_post_id.as_deref(),
        )
    }
}

/// Finds the thread root among `e` tags following NIP-10.
///
/// A `root` marker wins. Without any marker the first `e` tag is the root
/// (deprecated positional scheme). Marked tags lacking a root yield `None`.
pub fn find_root_event_id<'a>(tags: impl Iterator<Item = &'a Tag>) -> Option<String> {
    let etags: Vec<&[String]> = tags
        .filter(|tag| tag.kind() == e_kind())
        .map(|tag| tag.as_slice())
        .collect();

    let marker = |tag: &[String]| tag.get(3).filter(|m| !m.is_empty()).cloned();

    if let Some(root) = etags
        .iter()
        .find(|tag| marker(tag).as_deref() == Some("root"))
    {
        return root.get(1).cloned();
    }

    if etags.iter().all(|tag| marker(tag).is_none()) {
        return etags.first().and_then(|tag| tag.get(1).cloned());
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    const PUBKEY: &str = "4d39c23b3b03bf99494df5f3a149c7908ae1bc7416807fdd6b34a31886eaae25";
    const SIG: &str = "a183ace35e8c4704d8fb9c388858edbc71f2d795d1c18efaf8604512b4330d5f553adf3b25b97a66450bddfa7666a0db12e66d5e0032c26a6d6c7ee77d0b0535";

    #[allow(clippy::unwrap_used)]
    fn event(id: &str, kind: u16, tags: &str) -> Event {
        let json = format!(
            r#"{{"kind":{kind},"id":"{id}","pubkey":"{PUBKEY}","tags":{tags},"content":"","sig":"{SIG}","created_at":1705129933}}"#
        );
        Event::from_json(json).unwrap()
    }

    #[rstest]
    #[case(None, None, None, None, None, ThreadRoot::None)]
    #[case(
        Some("h1"), Some("a1"), Some("ae1"), Some("au1"), Some("p1"),
        ThreadRoot::Highlight { id: "h1" }
    )]
    #[case(
        None, Some("a1"), Some("ae1"), Some("au1"), Some("p1"),
        ThreadRoot::Article { id: "a1", event_id: "ae1", author_id: "au1" }
    )]
    #[case(None, Some("a1"), None, Some("au1"), Some("p1"), ThreadRoot::Post { id: "p1" })]
    #[case(None, Some("a1"), Some("ae1"), None, Some("p1"), ThreadRoot::Post { id: "p1" })]
    #[case(None, None, Some("ae1"), Some("au1"), None, ThreadRoot::None)]
    #[case(Some("h1"), None, None, None, Some("p1"), ThreadRoot::Highlight { id: "h1" })]
    fn test_thread_root_resolve(
        #[case] highlight_id: Option<&str>,
        #[case] article_id: Option<&str>,
        #[case] article_event_id: Option<&str>,
        #[case] article_author_id: Option<&str>,
        #[case] root_post_id: Option<&str>,
        #[case] expected: ThreadRoot,
    ) {
        let root = ThreadRoot::resolve(
            highlight_id,
            article_id,
            article_event_id,
            article_author_id,
            root_post_id,
        );
        assert_eq!(root, expected);
    }

    #[test]
    fn test_thread_root_event_id() {
        let article = ThreadRoot::Article {
            id: "a1",
            event_id: "ae1",
            author_id: "au1",
        };
        assert_eq!(article.event_id(), Some("ae1"));
        assert_eq!(ThreadRoot::Highlight { id: "h1" }.event_id(), Some("h1"));
        assert_eq!(ThreadRoot::None.event_id(), None);
    }

    #[test]
    fn test_reply_context_from_root_event() {
        let id = "03aafbdec84e4cbbbe3cd1811d45f16a0b55214b0b72097851c3618f73638cf0";
        let context = ReplyContext::from_event(&event(id, 1, "[]"));

        assert_eq!(context.reply_to_id.as_deref(), Some(id));
        assert_eq!(context.reply_to_author_id.as_deref(), Some(PUBKEY));
        assert_eq!(context.root_post_id.as_deref(), Some(id));
        assert!(context.existing_tags.is_empty());
    }

    #[test]
    fn test_reply_context_from_reply_event() {
        let root = "03aafbdec84e4cbbbe3cd1811d45f16a0b55214b0b72097851c3618f73638cf0";
        let id = "d444f485b5d401ee64564e4cc2bca7d9a50ad5ec628191470c009490ed1d43c3";
        let tags = format!(r#"[["e","{root}","","root"],["p","{PUBKEY}"]]"#);
        let context = ReplyContext::from_event(&event(id, 1, &tags));

        assert_eq!(context.reply_to_id.as_deref(), Some(id));
        assert_eq!(context.root_post_id.as_deref(), Some(root));
        assert_eq!(context.existing_tags.len(), 2);
        assert_eq!(context.existing_tags[1].as_slice(), ["p", PUBKEY]);
    }

    #[rstest]
    #[case(r#"[["e","r","","root"],["e","x","","reply"]]"#, Some("r"))]
    #[case(r#"[["e","x","","reply"],["e","r","","root"]]"#, Some("r"))]
    #[case(r#"[["e","r"],["e","x"]]"#, Some("r"))]
    #[case(r#"[["e","r",""],["e","x","",""]]"#, Some("r"))]
    #[case(r#"[["e","x","","reply"]]"#, None)]
    #[case(r#"[["p","pk"]]"#, None)]
    fn test_find_root_event_id(#[case] tags: &str, #[case] expected: Option<&str>) {
        #[allow(clippy::unwrap_used)]
        let tags: Vec<Tag> = serde_json::from_str(tags).unwrap();
        assert_eq!(find_root_event_id(tags.iter()).as_deref(), expected);
    }

    #[test]
    fn test_article_context_from_event() {
        let id = "aaaa0000000000000000000000000000000000000000000000000000000000aa";
        let article = ArticleContext::from_event(&event(id, 30023, r#"[["d","my-article"]]"#));

        assert_eq!(
            article,
            Some(ArticleContext::new(
                Some(String::from("my-article")),
                Some(String::from(id)),
                Some(String::from(PUBKEY)),
            ))
        );
    }

    #[test]
    fn test_article_context_from_other_kind() {
        let id = "aaaa0000000000000000000000000000000000000000000000000000000000aa";
        assert_eq!(ArticleContext::from_event(&event(id, 1, "[]")), None);
    }

    #[test]
    fn test_article_context_is_complete() {
        let partial = ArticleContext::new(Some(String::from("a1")), None, Some(String::from("au1")));
        assert!(!partial.is_complete());
        assert!(!ArticleContext::default().is_complete());
    }

    #[test]
    fn test_partial_article_is_not_a_root() {
        let partial = ArticleContext::new(Some(String::from("a1")), None, Some(String::from("au1")));
        let context = ReplyContext::new("x", "author")
            .root_post_id("p1")
            .article(partial);

        assert_eq!(context.root_article(), None);
        assert_eq!(context.thread_root(), ThreadRoot::Post { id: "p1" });
    }

    #[test]
    fn test_highlight_context_from_event() {
        let id = "bbbb0000000000000000000000000000000000000000000000000000000000bb";
        let highlight = HighlightContext::from_event(&event(id, 9802, "[]"));

        assert_eq!(
            highlight,
            Some(HighlightContext::new(id, Some(String::from(PUBKEY))))
        );
        assert_eq!(HighlightContext::from_event(&event(id, 1, "[]")), None);
    }
}
