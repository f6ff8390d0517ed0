//! `mobportals render <template> [args...] [--show-codes]`

use anyhow::{Context, Result};
use clap::Args;

use portal_message::compile;

use super::display;

/// Compile and render one template.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template text, e.g. "&aWarped to {&e}!".
    pub template: String,

    /// Positional values, one per token. Extra values are ignored.
    pub args: Vec<String>,

    /// Print formatting codes as `&x` instead of raw `§x` sequences.
    #[arg(long)]
    pub show_codes: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let template = compile(&self.template);
        tracing::debug!(tokens = template.token_count(), "compiled template");

        let rendered = template
            .render(&self.args)
            .with_context(|| format!("failed to render '{}'", self.template))?;
        println!("{}", display(&rendered, self.show_codes));
        Ok(())
    }
}
