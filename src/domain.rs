//! Domain logic
//!
//! This module contains the protocol-level business logic:
//! - Nostr tag formatting
//! - Reply contexts (posts, articles, highlights)
//! - Thread tag resolution (NIP-10)

pub mod nostr;
