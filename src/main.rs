use anyhow::Context;
use clap::{Parser, Subcommand};
use nemtex::{DescriptorFields, ExportConfig, ImportConfig, OutputFormat, Session, TabRouter};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nemtex", version, about = "NotEnoughMatter texture tools")]
struct Cli {
    /// Log decode and export steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the palette rows of a 16x16 texture
    Rows {
        image: PathBuf,
    },
    /// Print one palette row (1-based) and the row to copy next
    Copy {
        image: PathBuf,
        row: usize,
    },
    /// Write an item descriptor for a texture
    Export {
        image: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        material: String,
        #[arg(long)]
        category: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// yaml or json
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
        /// Print the descriptor instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Print the texture as a PNG data URI
    Preview {
        image: PathBuf,
    },
    /// Navigate a wiki page manifest
    Wiki {
        manifest: PathBuf,
        /// Page key to open
        #[arg(long)]
        page: Option<String>,
        /// Sidebar search query
        #[arg(long)]
        filter: Option<String>,
    },
}

fn load(image: &Path) -> anyhow::Result<Session> {
    let mut session = Session::new(ImportConfig::default());
    session
        .import_file(image)
        .with_context(|| format!("importing {}", image.display()))?;
    Ok(session)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Rows { image } => {
            let session = load(&image)?;
            for (i, row) in session.row_texts().iter().enumerate() {
                println!("{:>2}. {}", i + 1, row);
            }
        }
        Commands::Copy { image, row } => {
            let mut session = load(&image)?;
            let idx = row
                .checked_sub(1)
                .context("rows are numbered from 1")?;
            let text = session.copy_row(idx)?;
            println!("{}", text);
            match session.next_row() {
                Some(next) => eprintln!("Copied row {}. Next: row {}", row, next + 1),
                None => eprintln!("Copied row {}. That was the last row.", row),
            }
        }
        Commands::Export {
            image,
            id,
            name,
            material,
            category,
            out,
            format,
            stdout,
        } => {
            let mut session = load(&image)?;
            session.fields = DescriptorFields {
                id,
                name,
                category,
                material,
            };
            if stdout {
                print!("{}", session.export()?.render(format)?);
            } else {
                let config = ExportConfig {
                    format,
                    out_dir: out,
                };
                let path = session.export_to(&config)?;
                println!("{}", path.display());
            }
        }
        Commands::Preview { image } => {
            let session = load(&image)?;
            if let Some(preview) = session.preview()? {
                println!("{}", preview.data_uri());
            }
        }
        Commands::Wiki {
            manifest,
            page,
            filter,
        } => {
            let json = std::fs::read_to_string(&manifest)
                .with_context(|| format!("reading {}", manifest.display()))?;
            let mut router = TabRouter::from_json(&json)?;
            if let Some(key) = page {
                router
                    .select(&key)
                    .with_context(|| format!("no wiki page '{}'", key))?;
            }
            if let Some(q) = filter {
                router.set_filter(&q);
            }
            for p in router.visible_selectors() {
                let marker = if router.is_active(&p.key) { '*' } else { ' ' };
                println!("{} {}", marker, p.label);
            }
            println!();
            println!("{}", router.active().body);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
