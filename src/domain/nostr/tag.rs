use nostr_sdk::nostr::{Alphabet, SingleLetterTag, TagKind};
use nostr_sdk::prelude::*;

/// Kind of long-form content events (NIP-23)
pub const LONG_FORM_KIND: u16 = 30023;

/// Kind of highlight events (NIP-84)
pub const HIGHLIGHT_KIND: u16 = 9802;

pub fn e_kind() -> TagKind<'static> {
    TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::E))
}

pub fn a_kind() -> TagKind<'static> {
    TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::A))
}

pub fn p_kind() -> TagKind<'static> {
    TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::P))
}

pub fn d_kind() -> TagKind<'static> {
    TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::D))
}

/// Address of a long-form article: `<kind>:<author>:<identifier>`
pub fn article_address(author_id: &str, article_id: &str) -> String {
    format!("{LONG_FORM_KIND}:{author_id}:{article_id}")
}

/// Returns the value of a single-value tag (`tag[1]`) when the tag has the given kind.
pub fn tag_value<'a>(tag: &'a Tag, kind: &TagKind<'_>) -> Option<&'a str> {
    if tag.kind() == *kind {
        tag.as_slice().get(1).map(String::as_str)
    } else {
        None
    }
}

/// Builds the individual tags emitted by the thread resolvers.
///
/// Identifiers are written as given. Validation of hex ids and pubkeys is the
/// caller's job.
pub trait TagFormat {
    fn event_tag(&self, event_id: &str, marker: Marker) -> Tag;

    fn replaceable_event_tag(&self, address: &str, marker: Marker) -> Tag;

    fn pubkey_tag(&self, pubkey: &str) -> Tag;
}

/// Formats tags the way they travel on the wire:
/// `["e", id, hint, marker]`, `["a", address, hint, marker]` and `["p", pubkey]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireFormat {
    relay_hint: Option<String>,
}

impl WireFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty hint is treated as no hint.
    pub fn with_relay_hint(relay_hint: impl Into<String>) -> Self {
        let relay_hint = relay_hint.into();
        Self {
            relay_hint: (!relay_hint.is_empty()).then_some(relay_hint),
        }
    }

    pub fn relay_hint(&self) -> &str {
        self.relay_hint.as_deref().unwrap_or_default()
    }
}

impl TagFormat for WireFormat {
    fn event_tag(&self, event_id: &str, marker: Marker) -> Tag {
        Tag::custom(
            e_kind(),
            [
                event_id.to_string(),
                self.relay_hint().to_string(),
                marker.to_string(),
            ],
        )
    }

    fn replaceable_event_tag(&self, address: &str, marker: Marker) -> Tag {
        Tag::custom(
            a_kind(),
            [
                address.to_string(),
                self.relay_hint().to_string(),
                marker.to_string(),
            ],
        )
    }

    fn pubkey_tag(&self, pubkey: &str) -> Tag {
        Tag::custom(p_kind(), [pubkey.to_string()])
    }
}
