use color_eyre::eyre::{eyre, Result, WrapErr};
use nostr_sdk::prelude::*;
use tracing::info;

use crate::domain::nostr::{ReplyContext, ThreadRoot, ThreadTagsBuilder, WireFormat};
use crate::infrastructure::{
    cli::{Cli, Command, ComposeArgs, PubkeysArgs, ReplyArgs, RootArgs},
    config::Config,
    request,
};

/// Runs one command and renders the resulting tags as a JSON array of arrays.
#[derive(Debug, Clone)]
pub struct App {
    builder: ThreadTagsBuilder<WireFormat>,
    pretty: bool,
}

impl App {
    pub fn new(format: WireFormat, pretty: bool) -> Self {
        Self {
            builder: ThreadTagsBuilder::new(format),
            pretty,
        }
    }

    /// Command-line flags take precedence over the config file.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let format = match &cli.relay_hint {
            Some(relay_hint) => WireFormat::with_relay_hint(relay_hint.clone()),
            None => config.tag_format(),
        };
        Self::new(format, cli.pretty || config.pretty)
    }

    pub fn run(&self, command: &Command) -> Result<String> {
        let tags = self.tags(command)?;
        info!("{} tag(s) for {command:?}", tags.len());
        self.render(&tags)
    }

    pub fn tags(&self, command: &Command) -> Result<Vec<Tag>> {
        match command {
            Command::Root(args) => Ok(self.root(args)),
            Command::Reply(args) => Ok(self.reply(args)),
            Command::Pubkeys(args) => self.pubkeys(args),
            Command::Compose(args) => self.compose(args),
        }
    }

    fn root(&self, args: &RootArgs) -> Vec<Tag> {
        self.builder.root_tags(ThreadRoot::resolve(
            args.highlight_id.as_deref(),
            args.article_id.as_deref(),
            args.article_event_id.as_deref(),
            args.article_author_id.as_deref(),
            args.root_post_id.as_deref(),
        ))
    }

    fn reply(&self, args: &ReplyArgs) -> Vec<Tag> {
        self.builder
            .reply_tag(args.reply_to_id.as_deref(), args.root_post_id.as_deref())
            .into_iter()
            .collect()
    }

    fn pubkeys(&self, args: &PubkeysArgs) -> Result<Vec<Tag>> {
        let existing_tags = args
            .existing_tags
            .iter()
            .map(|json| request::parse_tag_json(json))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.builder.pubkey_tags(
            &existing_tags,
            Some(args.reply_to_author_id.as_str()),
            args.highlight_author_id.as_deref(),
            args.article_author_id.as_deref(),
        ))
    }

    fn compose(&self, args: &ComposeArgs) -> Result<Vec<Tag>> {
        let context = match (&args.source.request, &args.source.event) {
            (Some(path), _) => request::load_request(path)?.into_context()?,
            (None, Some(path)) => {
                let mut context = ReplyContext::from_event(&request::load_event(path)?);
                if let Some(article) = &args.article {
                    context = context.article(request::load_article(article)?);
                }
                if let Some(highlight) = &args.highlight {
                    context = context.highlight(request::load_highlight(highlight)?);
                }
                context
            }
            (None, None) => return Err(eyre!("compose needs --request or --event")),
        };

        Ok(self.builder.build(&context))
    }

    pub fn render(&self, tags: &[Tag]) -> Result<String> {
        let tags: Vec<&[String]> = tags.iter().map(Tag::as_slice).collect();
        let output = if self.pretty {
            serde_json::to_string_pretty(&tags)
        } else {
            serde_json::to_string(&tags)
        };
        output.wrap_err("Failed to render tags")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::nostr::tag::p_kind;

    #[test]
    fn test_run_root() -> Result<()> {
        let app = App::new(WireFormat::new(), false);
        let output = app.run(&Command::Root(RootArgs {
            article_id: Some(String::from("a1")),
            article_event_id: Some(String::from("ae1")),
            article_author_id: Some(String::from("au1")),
            root_post_id: Some(String::from("p1")),
            ..Default::default()
        }))?;

        assert_eq!(
            output,
            r#"[["e","ae1","","root"],["a","30023:au1:a1","","root"]]"#
        );

        Ok(())
    }

    #[test]
    fn test_run_root_without_context() -> Result<()> {
        let app = App::new(WireFormat::new(), false);
        assert_eq!(app.run(&Command::Root(RootArgs::default()))?, "[]");
        Ok(())
    }

    #[test]
    fn test_run_reply_to_root() -> Result<()> {
        let app = App::new(WireFormat::new(), false);
        let output = app.run(&Command::Reply(ReplyArgs {
            reply_to_id: Some(String::from("x")),
            root_post_id: Some(String::from("x")),
        }))?;

        assert_eq!(output, "[]");

        Ok(())
    }

    #[test]
    fn test_run_pubkeys() -> Result<()> {
        let app = App::new(WireFormat::new(), false);
        let output = app.run(&Command::Pubkeys(PubkeysArgs {
            reply_to_author_id: String::from("author"),
            highlight_author_id: Some(String::from("highlighter")),
            article_author_id: Some(String::from("writer")),
            existing_tags: vec![String::from(r#"["p","op"]"#)],
        }))?;

        assert_eq!(
            output,
            r#"[["p","op"],["p","author"],["p","highlighter"]]"#
        );

        Ok(())
    }

    #[test]
    fn test_run_pubkeys_with_invalid_tag() {
        let app = App::new(WireFormat::new(), false);
        let result = app.run(&Command::Pubkeys(PubkeysArgs {
            reply_to_author_id: String::from("author"),
            existing_tags: vec![String::from("p,op")],
            ..Default::default()
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_relay_hint_from_cli_overrides_config() -> Result<()> {
        let command = Command::Root(RootArgs {
            root_post_id: Some(String::from("p1")),
            ..Default::default()
        });
        let cli = Cli {
            relay_hint: Some(String::from("wss://cli.example.com")),
            pretty: false,
            command: command.clone(),
        };
        let config = Config {
            relay_hint: String::from("wss://config.example.com"),
            pretty: true,
            ..Default::default()
        };
        let app = App::from_cli(&cli, &config);

        assert!(app.pretty);
        assert_eq!(
            app.tags(&command)?
                .iter()
                .map(|tag| tag.as_slice().to_vec())
                .collect::<Vec<_>>(),
            vec![vec!["e", "p1", "wss://cli.example.com", "root"]]
        );

        Ok(())
    }

    #[test]
    fn test_compose_without_source_fails() {
        let app = App::new(WireFormat::new(), false);
        let result = app.run(&Command::Compose(ComposeArgs::default()));

        assert!(result.is_err());
    }

    #[test]
    fn test_render_pretty() -> Result<()> {
        let app = App::new(WireFormat::new(), true);
        let output = app.render(&[Tag::custom(p_kind(), ["pk"])])?;

        assert_eq!(output, "[\n  [\n    \"p\",\n    \"pk\"\n  ]\n]");

        Ok(())
    }
}
