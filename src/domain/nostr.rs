mod context;
pub mod nip10;
pub mod tag;

pub use context::{
    find_root_event_id, ArticleContext, HighlightContext, ReplyContext, ThreadRoot,
};
pub use nip10::{construct_pubkey_tags, construct_reply_tag, construct_root_tags, ThreadTagsBuilder};
pub use tag::{TagFormat, WireFormat};
