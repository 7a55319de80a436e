use std::path::PathBuf;

use alb_tools_lib::archive::ArchiveFamily;
use alb_tools_lib::paths::AssetPaths;
use alb_tools_lib::GameData;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Inspect Albion maps and tilesets")]
struct Cli {
    /// Path to the game's XLDLIBS directory
    #[arg(long, conflicts_with = "config")]
    xldlibs: Option<PathBuf>,

    /// JSON file with archive path templates
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a map header and optionally render it to PNG
    Map {
        id: u32,
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Print the tile descriptors of a tileset as JSON
    Tileset {
        /// One-based tileset id
        id: u16,
    },
    /// Print the number of blocks in a block list
    Blocks { id: u32 },
    /// List the archive files found for every family
    Files,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("map_inspect failed: {:?}", e);
        std::process::exit(1);
    }
}

fn asset_paths(cli: &Cli) -> Result<AssetPaths> {
    match (&cli.xldlibs, &cli.config) {
        (Some(dir), _) => Ok(AssetPaths::from_xldlibs(dir)),
        (None, Some(config)) => AssetPaths::from_json_file(config)
            .with_context(|| format!("Failed to read path config: {}", config.display())),
        (None, None) => bail!("either --xldlibs or --config is required"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = asset_paths(&cli)?;

    let data = GameData::from_paths(paths.clone());

    match cli.command {
        Command::Map { id, png } => {
            let map = data
                .load_map(id)
                .with_context(|| format!("Failed to load map {}", id))?;
            println!("map {}", id);
            println!("  type:       {:?}", map.map_type);
            println!("  size:       {}x{}", map.width(), map.height());
            println!("  tileset:    {}", map.tileset);
            println!("  palette:    {}", map.palette);
            println!("  npcs:       {}", map.npc_count);
            println!("  flags:      {:#04x}", map.flags);
            println!("  sound:      {}", map.sound);
            println!("  combat gfx: {}", map.combat_gfx);
            println!("  anim rate:  {}", map.anim_rate);

            if let Some(png) = png {
                let plane = data
                    .assembler()
                    .combine(&map)
                    .with_context(|| format!("Failed to combine map {}", id))?;
                eprintln!("Rendering {} objects ...", plane.objects.len());
                plane
                    .render()?
                    .save(&png)
                    .with_context(|| format!("Failed to write map PNG: {}", png.display()))?;
                eprintln!("Wrote {}", png.display());
            }
        }
        Command::Tileset { id } => {
            let index = id
                .checked_sub(1)
                .context("tileset ids are one-based")?;
            let tiles = data
                .metadata()
                .tileset(index)
                .with_context(|| format!("Failed to load tileset {}", id))?;
            let graphics = data.images().storage_order(id)?;
            eprintln!("tileset {}: {} tiles, {} graphics", id, tiles.len(), graphics.len());
            println!("{}", serde_json::to_string_pretty(&*tiles)?);
        }
        Command::Blocks { id } => {
            let blocks = data
                .load_blocks(id)
                .with_context(|| format!("Failed to load block list {}", id))?;
            println!("block list {}: {} block(s)", id, blocks.len());
            for (i, block) in blocks.iter().enumerate() {
                println!("  [{}] {}x{}", i, block.width(), block.height());
            }
        }
        Command::Files => {
            for family in [
                ArchiveFamily::IconGraphics,
                ArchiveFamily::IconData,
                ArchiveFamily::MapData,
                ArchiveFamily::BlockList,
                ArchiveFamily::Palette,
            ] {
                let template = paths.template(family);
                let files = template.existing_files();
                println!("{} ({}): {} file(s)", family, template.search_pattern(), files.len());
                for file in files {
                    println!("  {}", file.display());
                }
            }
        }
    }

    Ok(())
}
