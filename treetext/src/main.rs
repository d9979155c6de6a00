use std::path::PathBuf;

use structopt::clap::AppSettings::*;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(
        name = "concatenate",
        visible_alias = "c",
        about = "Concatenate every file below a directory into one text archive"
    )]
    Concatenate {
        #[structopt(long, parse(from_os_str), help = "Source directory to read files from")]
        source_dir: PathBuf,

        #[structopt(long, parse(from_os_str), help = "Text archive to write")]
        output_file: PathBuf,
    },

    #[structopt(
        name = "reconstruct",
        visible_alias = "x",
        about = "Reconstruct files from a text archive"
    )]
    Reconstruct {
        #[structopt(long, parse(from_os_str), help = "Text archive to read")]
        input_file: PathBuf,

        #[structopt(
            long,
            parse(from_os_str),
            help = "Destination directory to reconstruct files into"
        )]
        dest_dir: PathBuf,

        #[structopt(
            long,
            parse(from_os_str),
            help = "Source directory the archive was made from; strips it by path component \
                    instead of by common prefix"
        )]
        source_root: Option<PathBuf>,
    },

    #[structopt(name = "list", visible_alias = "l", about = "List records of a text archive")]
    List {
        #[structopt(long, parse(from_os_str), help = "Text archive to read")]
        input_file: PathBuf,

        #[structopt(short, long, help = "Output in JSON format")]
        json: bool,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "treetext",
    about = "Flatten a directory tree into a single text archive and back.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands]
)]
struct CliOpts {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    verbose: bool,

    #[structopt(short, long, help = "Suppress per-file output", global = true)]
    quiet: bool,

    #[structopt(subcommand)]
    cmd: Commands,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = CliOpts::from_iter(wild::args_os());
    init_tracing(opts.verbose);

    let result = match opts.cmd {
        Commands::Concatenate {
            source_dir,
            output_file,
        } => commands::concatenate(&source_dir, &output_file, opts.quiet),
        Commands::Reconstruct {
            input_file,
            dest_dir,
            source_root,
        } => commands::reconstruct(&input_file, &dest_dir, source_root, opts.quiet),
        Commands::List { input_file, json } => commands::list(&input_file, json),
    };

    if let Err(e) = result {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
