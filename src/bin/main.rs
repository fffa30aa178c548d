//! Pack Variant Editor CLI
//!
//! Inspect and edit the texture variants of resource pack blocks.

use clap::{Parser, Subcommand};
use pack_variant_editor::resource_pack::PACK_FORMATS;
use pack_variant_editor::{
    create_pack, default_resource_pack_dir, is_resource_pack_root, EditorConfig, EditorError,
    PackFormat, Session, VariantView,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pack-variant-editor")]
#[command(
    author,
    version,
    about = "Edit the texture variants of resource pack blocks",
    long_about = None
)]
struct Cli {
    /// Asset namespace to edit
    #[arg(long, global = true, default_value = "minecraft")]
    namespace: String,

    /// Indent width for rewritten JSON files
    #[arg(long, global = true, default_value = "4")]
    indent: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a directory is a resource pack root
    Check {
        /// Directory to check
        dir: PathBuf,
    },

    /// Show information about a resource pack
    Info {
        /// Path to the resource pack directory
        #[arg(short, long)]
        pack: PathBuf,
    },

    /// List blocks that have a blockstate file
    Blocks {
        /// Path to the resource pack directory
        #[arg(short, long)]
        pack: PathBuf,

        /// Only list blocks starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
    },

    /// Prepare a block and list its variants
    Show {
        /// Path to the resource pack directory
        #[arg(short, long)]
        pack: PathBuf,

        /// Block name (e.g., "stone")
        #[arg(short, long)]
        block: String,
    },

    /// Add a PNG texture as a new variant of a block
    Add {
        /// Path to the resource pack directory
        #[arg(short, long)]
        pack: PathBuf,

        /// Block name (e.g., "stone")
        #[arg(short, long)]
        block: String,

        /// PNG file to copy in
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Set the weight and rotation of a variant
    Set {
        /// Path to the resource pack directory
        #[arg(short, long)]
        pack: PathBuf,

        /// Block name (e.g., "stone")
        #[arg(short, long)]
        block: String,

        /// Variant index as listed by `show`
        #[arg(short = 'n', long)]
        index: usize,

        /// New weight (unchanged if omitted)
        #[arg(long)]
        weight: Option<String>,

        /// New X rotation in degrees (unchanged if omitted)
        #[arg(long)]
        x: Option<String>,

        /// New Y rotation in degrees (unchanged if omitted)
        #[arg(long)]
        y: Option<String>,
    },

    /// Create a new, empty resource pack
    New {
        /// Directory to create the pack in
        dir: PathBuf,

        /// Pack description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Pack format number, version range or game version (e.g., "1.16.5")
        #[arg(short, long)]
        format: Option<String>,
    },

    /// List known pack formats
    Formats,

    /// Print the default resource pack directory
    DefaultDir,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Err(e) if e.is_recoverable() => {
            eprintln!("Rejected: {}", e);
            std::process::exit(2);
        }
        other => Ok(other?),
    }
}

fn run(cli: Cli) -> Result<(), EditorError> {
    let config = EditorConfig::default()
        .with_namespace(&cli.namespace)
        .with_json_indent(cli.indent);

    match cli.command {
        Commands::Check { dir } => {
            if is_resource_pack_root(&dir) {
                println!("{:?} is a resource pack", dir);
            } else {
                println!("{:?} is not a resource pack (no pack.mcmeta)", dir);
            }
        }
        Commands::Info { pack } => {
            let mut session = Session::new(config);
            let pack = session.set_pack_root(&pack)?;
            let meta = pack.metadata()?;
            let format = PackFormat::from_number(meta.pack_format)
                .map(|f| f.versions)
                .unwrap_or("unknown");

            println!("Resource pack {:?}", pack.root());
            println!("  Description: {}", meta.description_text());
            println!("  Pack format: {} ({})", meta.pack_format, format);
            println!("  Blockstates: {}", pack.block_names()?.len());
        }
        Commands::Blocks { pack, prefix } => {
            let mut session = Session::new(config);
            session.set_pack_root(&pack)?;
            for name in session.search_blocks(&prefix)? {
                println!("{}", name);
            }
        }
        Commands::Show { pack, block } => {
            let mut session = Session::new(config);
            session.set_pack_root(&pack)?;
            let variants = session.select_block(&block)?;
            print_variants(&block, &variants);
        }
        Commands::Add { pack, block, image } => {
            let mut session = Session::new(config);
            session.set_pack_root(&pack)?;
            session.select_block(&block)?;
            let variants = session.add_texture(&image)?;
            println!("Added {:?} to {}", image, block);
            print_variants(&block, &variants);
        }
        Commands::Set {
            pack,
            block,
            index,
            weight,
            x,
            y,
        } => {
            let mut session = Session::new(config);
            session.set_pack_root(&pack)?;
            let variants = session.select_block(&block)?;
            let current = variants
                .get(index)
                .ok_or(EditorError::VariantIndexOutOfRange {
                    block: block.clone(),
                    index,
                    len: variants.len(),
                })?;

            let weight = weight.unwrap_or_else(|| current.weight.to_string());
            let x = x.unwrap_or_else(|| current.x.to_string());
            let y = y.unwrap_or_else(|| current.y.to_string());
            session.edit_variant(index, &weight, &x, &y)?;

            print_variants(&block, &session.variants()?);
        }
        Commands::New {
            dir,
            description,
            format,
        } => {
            let format = match format {
                Some(input) => PackFormat::parse(&input)?,
                None => PackFormat::latest(),
            };
            let pack = create_pack(&dir, &description, format, config)?;
            println!(
                "Created resource pack {:?} (pack_format {}, {})",
                pack.root(),
                format.format,
                format.versions
            );
        }
        Commands::Formats => {
            for format in PACK_FORMATS {
                println!("{:>3}  {}", format.format, format.versions);
            }
        }
        Commands::DefaultDir => match default_resource_pack_dir() {
            Some(dir) => println!("{}", dir.display()),
            None => println!("No home directory found"),
        },
    }

    Ok(())
}

fn print_variants(block: &str, variants: &[VariantView]) {
    println!("{} ({} variants)", block, variants.len());
    println!("  {:>3}  {:<8} {:>6} {:>4} {:>4}  texture", "#", "model", "weight", "x", "y");

    for variant in variants {
        let size = match variant.texture_dimensions() {
            Some((w, h)) => format!("{}x{}", w, h),
            None => "missing".to_string(),
        };
        println!(
            "  {:>3}  {:<8} {:>6} {:>4} {:>4}  {} ({})",
            variant.index,
            variant.model_id,
            variant.weight,
            variant.x,
            variant.y,
            variant.texture_path.display(),
            size
        );
    }
}
