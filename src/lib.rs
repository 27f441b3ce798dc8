//! # threadtags - Nostr reply thread tags
//!
//! Builds the tags a Nostr client attaches to a reply so it threads correctly
//! (NIP-10): the root of the thread, the direct parent, and the pubkeys to notify.
//! A thread may be rooted in a highlight, a long-form article, or a plain post.
//!
//! ## Example Usage
//!
//! ```rust
//! use threadtags::domain::nostr::{construct_reply_tag, construct_root_tags};
//!
//! let root = construct_root_tags(None, Some("a1"), Some("ae1"), Some("au1"), Some("p1"));
//! assert_eq!(root[0].as_slice(), ["e", "ae1", "", "root"]);
//! assert_eq!(root[1].as_slice(), ["a", "30023:au1:a1", "", "root"]);
//!
//! // replying directly to the root needs no reply tag
//! assert!(construct_reply_tag(Some("p1"), Some("p1")).is_none());
//! ```
//!
//! ## Modules
//!
//! - [`domain`] - Tag formatting, reply contexts and thread tag resolution
//! - [`infrastructure`] - CLI, configuration and request loading
//! - [`app`] - Command dispatch and JSON rendering
//! - [`utils`] - Logging, panic handling and paths

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod utils;

pub use app::App;
pub use domain::nostr::{ReplyContext, ThreadTagsBuilder, WireFormat};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
