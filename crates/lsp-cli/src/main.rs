mod repl;

use anyhow::Context as _;
use rustyline::DefaultEditor;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let editor = DefaultEditor::new().context("failed to initialize the line editor")?;

    let mut repl = repl::Repl::new(editor, io::stdout().lock());
    repl.banner()?;
    repl.run()
}
