//! `mobportals init`

use anyhow::{Context, Result};
use clap::Args;

use portal_core::catalog;

/// Write the default message catalog if none exists yet.
#[derive(Args, Debug)]
pub struct InitArgs {}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let path = catalog::catalog_path().context("cannot locate message catalog")?;
        let existed = path.exists();
        let config = catalog::init().context("failed to write default message catalog")?;

        if existed {
            println!("Catalog already present; left unchanged.");
        } else {
            println!("✓ Wrote {} default messages", config.messages.len());
        }
        println!("  Catalog: {}", path.display());
        Ok(())
    }
}
