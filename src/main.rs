mod author;
mod config;
mod lookup;
mod ops;
mod pipeline;
mod regex;

use std::path::PathBuf;

use anyhow::Result;
use clap::{command, Parser, Subcommand, ValueHint};
use tracing_subscriber::EnvFilter;

use self::lookup::openalex;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file that should be used
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve DBLP and Google Scholar identifiers for the committee rosters
    Resolve {
        /// CSV roster of the technical program committee
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        tpc_file: PathBuf,

        /// CSV roster of the extended review committee
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        erc_file: PathBuf,

        /// Where to write the TPC records; the ERC records land next to it
        /// as erc.json (defaults to <data_dir>/pc.json)
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        out_file: Option<PathBuf>,

        /// Ignore any existing output and resolve everyone again
        #[arg(long)]
        fresh: bool,
    },

    /// Attach OpenAlex identifiers by fuzzy-matching publication titles
    Openalex {
        /// Merged author records with carried publication titles
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        pc_file: PathBuf,

        /// Where to write the name-keyed mapping (defaults to <data_dir>/openalex.json)
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        out_file: Option<PathBuf>,

        /// Ignore any existing output and resolve everyone again
        #[arg(long)]
        fresh: bool,
    },

    /// Download one page of publication metadata per resolved author
    Download {
        /// Name-keyed author mapping with OpenAlex identifiers
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        pc_file: PathBuf,

        /// Directory for per-author JSON files (defaults to <output_dir>)
        #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
        out_dir: Option<PathBuf>,

        /// Publications to request per author, a single page
        #[arg(long)]
        count: Option<usize>,

        /// Overwrite existing per-author files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli_args = CliArgs::parse();
    let conf = config::load(cli_args.config)?;

    match cli_args.command {
        Command::Resolve {
            tpc_file,
            erc_file,
            out_file,
            fresh,
        } => {
            let pc_out = out_file.unwrap_or_else(|| conf.data_dir.join("pc.json"));
            let erc_out = pc_out.with_file_name("erc.json");
            pipeline::resolve_roster(&tpc_file, &pc_out, fresh)?;
            pipeline::resolve_roster(&erc_file, &erc_out, fresh)?;
        }
        Command::Openalex {
            pc_file,
            out_file,
            fresh,
        } => {
            let out = out_file.unwrap_or_else(|| conf.data_dir.join("openalex.json"));
            let client = openalex::Client::default();
            pipeline::resolve_openalex(&client, &pc_file, &out, fresh)?;
        }
        Command::Download {
            pc_file,
            out_dir,
            count,
            force,
        } => {
            let out = out_dir.unwrap_or(conf.output_dir);
            let client = openalex::Client::default();
            pipeline::download_publications(
                &client,
                &pc_file,
                &out,
                count.unwrap_or(conf.per_page),
                force,
            )?;
        }
    }
    Ok(())
}
