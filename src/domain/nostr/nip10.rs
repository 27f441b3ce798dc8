//! Thread tags for replies (NIP-10)
//!
//! A reply carries up to three groups of tags:
//! - root tags pointing at the start of the thread (a highlight, an article, or a post)
//! - a reply tag pointing at the direct parent, unless the parent is the root
//! - pubkey tags notifying everyone already in the thread

use nostr_sdk::prelude::*;
use tracing::debug;

use super::context::{ReplyContext, ThreadRoot};
use super::tag::{article_address, p_kind, tag_value, TagFormat, WireFormat};

/// Builds thread tags with a given [`TagFormat`].
#[derive(Debug, Clone, Default)]
pub struct ThreadTagsBuilder<F = WireFormat> {
    format: F,
}

impl<F: TagFormat> ThreadTagsBuilder<F> {
    pub fn new(format: F) -> Self {
        Self { format }
    }

    pub fn root_tags(&self, root: ThreadRoot<'_>) -> Vec<Tag> {
        match root {
            ThreadRoot::Highlight { id } | ThreadRoot::Post { id } => {
                vec![self.format.event_tag(id, Marker::Root)]
            }
            ThreadRoot::Article {
                id,
                event_id,
                author_id,
            } => vec![
                self.format.event_tag(event_id, Marker::Root),
                self.format
                    .replaceable_event_tag(&article_address(author_id, id), Marker::Root),
            ],
            ThreadRoot::None => vec![],
        }
    }

    /// A direct reply to the root needs no separate reply tag.
    pub fn reply_tag(&self, reply_to_id: Option<&str>, root_id: Option<&str>) -> Option<Tag> {
        match reply_to_id {
            Some(id) if Some(id) != root_id => Some(self.format.event_tag(id, Marker::Reply)),
            _ => None,
        }
    }

    /// Keeps every pubkey the target already tags, then adds the target's
    /// author and the root author (highlight author over article author).
    /// Each pubkey appears once, at its first position.
    pub fn pubkey_tags(
        &self,
        existing_tags: &[Tag],
        reply_to_author_id: Option<&str>,
        root_highlight_author_id: Option<&str>,
        root_article_author_id: Option<&str>,
    ) -> Vec<Tag> {
        let p_kind = p_kind();
        let root_author_id = root_highlight_author_id.or(root_article_author_id);

        let mut seen: Vec<&str> = vec![];
        let mut tags: Vec<Tag> = vec![];

        for tag in existing_tags {
            if let Some(pubkey) = tag_value(tag, &p_kind) {
                if !seen.contains(&pubkey) {
                    seen.push(pubkey);
                    tags.push(tag.clone());
                }
            }
        }

        for pubkey in [reply_to_author_id, root_author_id].into_iter().flatten() {
            if !seen.contains(&pubkey) {
                seen.push(pubkey);
                tags.push(self.format.pubkey_tag(pubkey));
            }
        }

        tags
    }

    /// All tags of a reply: root tags, the reply tag, then pubkey tags.
    pub fn build(&self, context: &ReplyContext) -> Vec<Tag> {
        let root = context.thread_root();
        debug!("thread root for reply to {:?}: {root:?}", context.reply_to_id);

        let root_tags = self.root_tags(root);
        let reply_tag = self.reply_tag(context.reply_to_id.as_deref(), root.event_id());
        let pubkey_tags = self.pubkey_tags(
            &context.existing_tags,
            context.reply_to_author_id.as_deref(),
            context
                .highlight
                .as_ref()
                .and_then(|h| h.author_id.as_deref()),
            context.root_article().and_then(|a| a.author_id.as_deref()),
        );

        [root_tags, reply_tag.into_iter().collect(), pubkey_tags].concat()
    }
}

/// Root tags of a reply, first match wins: highlight, complete article, root post.
pub fn construct_root_tags(
    highlight_id: Option<&str>,
    article_id: Option<&str>,
    article_event_id: Option<&str>,
    article_author_id: Option<&str>,
    root_post_id: Option<&str>,
) -> Vec<Tag> {
    ThreadTagsBuilder::<WireFormat>::default().root_tags(ThreadRoot::resolve(
        highlight_id,
        article_id,
        article_event_id,
        article_author_id,
        root_post_id,
    ))
}

pub fn construct_reply_tag(reply_to_id: Option<&str>, root_post_id: Option<&str>) -> Option<Tag> {
    ThreadTagsBuilder::<WireFormat>::default().reply_tag(reply_to_id, root_post_id)
}

pub fn construct_pubkey_tags(
    existing_tags: &[Tag],
    reply_to_author_id: &str,
    root_highlight_author_id: Option<&str>,
    root_article_author_id: Option<&str>,
) -> Vec<Tag> {
    ThreadTagsBuilder::<WireFormat>::default().pubkey_tags(
        existing_tags,
        Some(reply_to_author_id),
        root_highlight_author_id,
        root_article_author_id,
    )
}
