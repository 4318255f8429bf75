use clap::Parser;
use count2tpm::{commands, Cli};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    commands::normalize(
        cli.counts_file,
        cli.length_file,
        cli.out_file,
        cli.length_policy,
    )?;

    Ok(())
}
