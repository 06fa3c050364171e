use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::Pattern;
use texheaders_tools::{classify_line, format_inspect, inspect_file, rewrite_bytes};

#[derive(Parser)]
#[command(
    name = "texheaders",
    version,
    about = "texHeaders.bin inspection and maintenance tools"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize an index file, or every matching file in a directory.
    Inspect {
        path: PathBuf,
        /// Glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
    },
    /// Decode and validate an index; exits non-zero on any violation.
    Validate { path: PathBuf },
    /// Decode an index and print it as JSON.
    Dump {
        path: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Decode and re-encode an index.
    Rewrite {
        input: PathBuf,
        output: PathBuf,
        /// Fail unless the re-encoded bytes match the input.
        #[arg(long)]
        check: bool,
    },
    /// Print the suffix class of each texture path.
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect { path, glob } => {
            if path.is_dir() {
                for file in collect_index_files(&path, glob.as_deref())? {
                    let index = codec::read_file(&file)?;
                    println!("== {} ==", file.display());
                    print!("{}", format_inspect(&inspect_file(&index)));
                }
            } else {
                let index = codec::read_file(&path)?;
                print!("{}", format_inspect(&inspect_file(&index)));
            }
        }
        Command::Validate { path } => {
            let index = codec::read_file(&path)?;
            if let Err(err) = codec::validate_file(&index) {
                for violation in err.violations() {
                    println!("{violation}");
                }
                eprintln!("{}: {} violation(s)", path.display(), err.len());
                return Ok(ExitCode::FAILURE);
            }
            println!("{}: ok ({} textures)", path.display(), index.textures.len());
        }
        Command::Dump { path, pretty } => {
            let index = codec::read_file(&path)?;
            let json = if pretty {
                serde_json::to_string_pretty(&index)
            } else {
                serde_json::to_string(&index)
            }
            .context("serialize json")?;
            println!("{json}");
        }
        Command::Rewrite {
            input,
            output,
            check,
        } => {
            let bytes =
                fs::read(&input).with_context(|| format!("read index {}", input.display()))?;
            let rewrite = rewrite_bytes(&bytes)?;
            if check && !rewrite.identical {
                bail!(
                    "{} does not re-encode identically ({} bytes in, {} bytes out)",
                    input.display(),
                    bytes.len(),
                    rewrite.bytes.len()
                );
            }
            fs::write(&output, &rewrite.bytes)
                .with_context(|| format!("write index {}", output.display()))?;
            log::info!("wrote {} bytes to {}", rewrite.bytes.len(), output.display());
        }
        Command::Classify { paths } => {
            for path in &paths {
                println!("{}", classify_line(path));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn collect_index_files(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        files.push(path);
    }
    if files.is_empty() {
        bail!("no index files found in {}", dir.display());
    }
    files.sort();
    Ok(files)
}
