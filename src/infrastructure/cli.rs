use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Relay URL written into "e" and "a" tags (overrides the config file)
    #[arg(long, value_name = "URL", global = true)]
    pub relay_hint: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the root tags of a reply
    Root(RootArgs),
    /// Print the reply tag of a reply, if one is needed
    Reply(ReplyArgs),
    /// Print the pubkey tags of a reply
    Pubkeys(PubkeysArgs),
    /// Print every thread tag of a reply
    Compose(ComposeArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootArgs {
    #[arg(long, value_name = "ID")]
    pub highlight_id: Option<String>,
    /// The "d" identifier of the article
    #[arg(long, value_name = "ID")]
    pub article_id: Option<String>,
    #[arg(long, value_name = "ID")]
    pub article_event_id: Option<String>,
    #[arg(long, value_name = "PUBKEY")]
    pub article_author_id: Option<String>,
    #[arg(long, value_name = "ID")]
    pub root_post_id: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyArgs {
    #[arg(long, value_name = "ID")]
    pub reply_to_id: Option<String>,
    #[arg(long, value_name = "ID")]
    pub root_post_id: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PubkeysArgs {
    #[arg(long, value_name = "PUBKEY")]
    pub reply_to_author_id: String,
    #[arg(long, value_name = "PUBKEY")]
    pub highlight_author_id: Option<String>,
    #[arg(long, value_name = "PUBKEY")]
    pub article_author_id: Option<String>,
    /// A tag of the reply target as a JSON array, e.g. '["p","<pubkey>"]'
    #[arg(long = "existing", value_name = "TAG")]
    pub existing_tags: Vec<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(required = true, multiple = false, id = "source")]
pub struct ComposeSource {
    /// JSON5 reply request, "-" reads stdin
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,
    /// The event being replied to, as Nostr JSON
    #[arg(long, value_name = "FILE")]
    pub event: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub source: ComposeSource,
    /// Long-form article the reply belongs to (with --event)
    #[arg(long, value_name = "FILE", requires = "event")]
    pub article: Option<PathBuf>,
    /// Highlight the reply belongs to (with --event)
    #[arg(long, value_name = "FILE", requires = "event")]
    pub highlight: Option<PathBuf>,
}
