//! `mobportals show <key> [args...] [--catalog <file>] [--show-codes]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use portal_core::MessageKey;
use portal_message::MessageSet;

use super::{display, load_catalog};

/// Render one message from the catalog.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Message key, e.g. "warp-success".
    pub key: String,

    /// Positional values for the message's tokens.
    pub args: Vec<String>,

    /// Catalog file to read instead of ~/.mobportals/messages.yaml.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print formatting codes as `&x` instead of raw `§x` sequences.
    #[arg(long)]
    pub show_codes: bool,
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let config = load_catalog(self.catalog.as_deref())?;
        let set = MessageSet::from_config(&config);
        let key = MessageKey::from(self.key);

        let rendered = set
            .render(&key, &self.args)
            .with_context(|| format!("failed to render message '{key}'"))?;
        println!("{}", display(&rendered, self.show_codes));
        Ok(())
    }
}
