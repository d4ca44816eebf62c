use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use unarr::{DefaultTarget, ExtractOptions, ListOptions, ResponseShape};

use crate::config::Settings;

#[derive(Clone, Debug, Parser)]
#[command(name = "unarr", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    /// More logging; repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path of the unar executable
    #[arg(long, global = true, value_name = "PATH")]
    pub unar: Option<PathBuf>,

    /// Path of the lsar executable
    #[arg(long, global = true, value_name = "PATH")]
    pub lsar: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "x", name = "extract", about = "Extract files from an archive")]
    Extract(ExtractArg),
    #[command(alias = "ls", name = "list", about = "List the entries of an archive")]
    List(ListArg),
    #[command(name = "completions", about = "Print shell completions")]
    Completions(CompletionsArg),
}

#[derive(Args, Clone, Debug)]
pub struct ExtractArg {
    pub archive: PathBuf,

    /// Entries to extract; everything when empty
    pub files: Vec<String>,

    /// Destination directory
    #[arg(short = 'o', long = "output-directory", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Extract into the system temp directory when no -o is given
    #[arg(long)]
    pub temp: bool,

    /// Extract the entry at this index; may be repeated
    #[arg(short = 'i', long = "index", value_name = "N")]
    pub indexes: Vec<String>,

    /// Only the named entries into -o, overwriting, flat, keeping times
    #[arg(long)]
    pub only: bool,

    #[arg(short = 'f', long, overrides_with = "keep_existing")]
    pub force_overwrite: bool,
    /// Do not overwrite existing files
    #[arg(long)]
    pub keep_existing: bool,

    #[arg(short = 'r', long)]
    pub force_rename: bool,

    #[arg(short = 's', long)]
    pub force_skip: bool,

    /// Always create a containing directory
    #[arg(short = 'd', long)]
    pub force_directory: bool,

    /// Never create a containing directory
    #[arg(short = 'D', long, overrides_with = "allow_directory")]
    pub no_directory: bool,
    /// Let unar decide whether to create a containing directory
    #[arg(long)]
    pub allow_directory: bool,

    /// Do not extract archives contained in the archive
    #[arg(long)]
    pub no_recursion: bool,

    /// Copy the archive's timestamp to the extracted files
    #[arg(short = 't', long)]
    pub copy_time: bool,

    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[arg(short = 'p', long)]
    pub password: Option<String>,

    #[arg(short = 'E', long, value_name = "ENCODING")]
    pub password_encoding: Option<String>,

    /// Encoding of file names
    #[arg(short = 'e', long)]
    pub encoding: Option<String>,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "dir_only")]
    pub json: bool,

    /// Print only the destination directory
    #[arg(long)]
    pub dir_only: bool,
}

impl ExtractArg {
    /// Command-line flags over config file values over library defaults.
    pub fn options(&self, settings: &Settings) -> ExtractOptions {
        let base = if self.only {
            ExtractOptions::only(self.output.clone().unwrap_or_default(), self.files.clone())
        } else {
            let mut options = ExtractOptions::default().files(self.files.clone());
            if let Some(output) = &self.output {
                options = options.target_dir(output);
            }
            options
        };

        let default_target = if self.temp {
            DefaultTarget::TempDir
        } else {
            settings.default_target()
        };

        let mut options = base
            .default_target(default_target)
            .force_overwrite(flag(
                self.force_overwrite,
                self.keep_existing,
                settings.force_overwrite.unwrap_or(true),
            ))
            .no_directory(flag(
                self.no_directory,
                self.allow_directory,
                settings.no_directory.unwrap_or(true),
            ))
            .force_rename(self.force_rename)
            .force_skip(self.force_skip)
            .force_directory(self.force_directory)
            .no_recursion(self.no_recursion)
            .quiet(self.quiet)
            .response(if self.dir_only {
                ResponseShape::DirectoryOnly
            } else {
                ResponseShape::Detailed
            });

        if self.copy_time {
            options = options.copy_time(true);
        }
        if !self.indexes.is_empty() {
            options = options.indexes(self.indexes.iter());
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(encoding) = &self.password_encoding {
            options = options.password_encoding(encoding);
        }
        if let Some(encoding) = &self.encoding {
            options = options.encoding(encoding);
        }
        options
    }
}

fn flag(on: bool, off: bool, fallback: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => fallback,
    }
}

#[derive(Args, Clone, Debug)]
pub struct ListArg {
    pub archive: PathBuf,

    #[arg(long)]
    pub no_recursion: bool,

    #[arg(short = 'p', long)]
    pub password: Option<String>,

    #[arg(short = 'E', long, value_name = "ENCODING")]
    pub password_encoding: Option<String>,

    #[arg(short = 'e', long)]
    pub encoding: Option<String>,

    /// Value passed to lsar -pe
    #[arg(long, value_name = "VALUE")]
    pub print_encoding: Option<String>,

    /// Ask lsar for its JSON listing
    #[arg(long)]
    pub json_listing: bool,

    /// With --json-listing, escape non-ASCII characters
    #[arg(long, requires = "json_listing")]
    pub json_ascii: bool,

    /// Print the names as a JSON array
    #[arg(long)]
    pub json: bool,

    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl ListArg {
    pub fn options(&self) -> ListOptions {
        let mut options = ListOptions::default()
            .no_recursion(self.no_recursion)
            .json(self.json_listing)
            .json_ascii(self.json_ascii)
            .quiet(self.quiet);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(encoding) = &self.password_encoding {
            options = options.password_encoding(encoding);
        }
        if let Some(encoding) = &self.encoding {
            options = options.encoding(encoding);
        }
        if let Some(value) = &self.print_encoding {
            options = options.print_encoding(value);
        }
        options
    }
}

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    #[arg(value_enum)]
    pub shell: Shell,
}
