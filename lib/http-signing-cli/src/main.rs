use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;

mod args;
mod parse_header;
mod sign;
mod util;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = ToolArgs::parse();
    match args.subcommand {
        ToolSubcommand::ParseHeader(args) => parse_header::do_it(args.header.leak()),
        ToolSubcommand::Sign(args) => sign::sign(&args).await,
        ToolSubcommand::SigningString(args) => sign::signing_string(&args),
    }
}
