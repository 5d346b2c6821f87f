use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use sprite_packer_core::{GrowingPacker, PackerConfig, Placement, pack_sheets};
use tracing::{debug, error, info, warn};

mod assets;
mod render;
mod sheet;

use assets::Sprite;
use sheet::{SheetConfig, SheetsFile};

#[derive(Parser, Debug)]
#[command(
    name = "sprite-packer",
    about = "Pack folders of icons into CSS spritesheets",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv). -v prints per-sprite coordinates
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every sheet listed in a YAML config file
    Build(BuildArgs),
    /// Build a single sheet from command-line options
    Sheet(SheetArgs),
    /// Layout-only export (no PNG/CSS): pack a directory and print placements as JSON
    Layout(LayoutArgs),
}

#[derive(Parser, Debug, Clone)]
struct BuildArgs {
    /// YAML file with a `sheets:` list
    #[arg(short, long, default_value = "sprites.yaml")]
    config: PathBuf,
    /// Print the parsed configuration and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "yaml", value_parser = ["json", "yaml"])]
    print_config_format: String,
    /// Dry run: pack and report stats but do not write files
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct SheetArgs {
    /// Directory of icons
    #[arg(help_heading = "Input/Output")]
    directory: PathBuf,
    /// Output sheet image (PNG)
    #[arg(long, help_heading = "Input/Output")]
    image: PathBuf,
    /// Output stylesheet
    #[arg(long, help_heading = "Input/Output")]
    css: PathBuf,
    /// Output preview page (defaults to the stylesheet path with .html)
    #[arg(long, help_heading = "Input/Output")]
    html: Option<PathBuf>,
    #[command(flatten)]
    naming: NamingArgs,
    /// Dry run: pack and report stats but do not write files
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    /// Directory of icons
    directory: PathBuf,
    #[command(flatten)]
    naming: NamingArgs,
    /// Metadata format: json-array | json-hash (keyed by CSS class)
    #[arg(long, default_value = "json-array", value_parser = ["json-array", "json-hash"])]
    metadata: String,
    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Export packing stats (JSON) to this file
    #[arg(long)]
    export_stats: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
struct NamingArgs {
    /// CSS class prefix
    #[arg(long, default_value = "", help_heading = "Naming")]
    prefix: String,
    /// CSS class suffix
    #[arg(long, default_value = "", help_heading = "Naming")]
    suffix: String,
    /// Resize icons to SIZE x SIZE before packing (0 keeps source size)
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    size: u32,
    /// Minimum initial canvas width
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    min_width: u32,
    /// Minimum initial canvas height
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    min_height: u32,
}

impl NamingArgs {
    fn into_sheet(
        self,
        directory: PathBuf,
        image: PathBuf,
        css: PathBuf,
        html: Option<PathBuf>,
    ) -> SheetConfig {
        SheetConfig {
            directory,
            icon_name_prefix: self.prefix,
            icon_name_suffix: self.suffix,
            sprite_image_file: image,
            sprite_css_file: css,
            html_file: html,
            sprite_size: self.size,
            packer: PackerConfig::builder()
                .with_min_dimensions(self.min_width, self.min_height)
                .build(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let progress = cli.progress && !cli.quiet;
    match cli.command {
        Commands::Build(args) => run_build(&args, progress),
        Commands::Sheet(args) => {
            let sheet = args
                .naming
                .into_sheet(args.directory, args.image, args.css, args.html);
            run_sheets(&[sheet], progress, args.dry_run)
        }
        Commands::Layout(args) => run_layout(args),
    }
}

fn run_build(args: &BuildArgs, progress: bool) -> anyhow::Result<()> {
    let file = SheetsFile::load(&args.config)?;
    if args.print_config {
        match args.print_config_format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&file)?),
            _ => println!("{}", serde_yaml::to_string(&file)?),
        }
        return Ok(());
    }
    run_sheets(&file.sheets, progress, args.dry_run)
}

/// Loads every sheet, packs them all, then renders each one.
/// A failing sheet is reported and skipped; the others still run.
fn run_sheets(sheets: &[SheetConfig], progress: bool, dry_run: bool) -> anyhow::Result<()> {
    let mut failed = 0usize;
    let mut loaded: Vec<(&SheetConfig, Vec<Sprite>)> = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        match load_sheet(sheet, progress) {
            Ok(sprites) if sprites.is_empty() => {
                warn!(sheet = %sheet.label(), "no images found, skipping");
            }
            Ok(sprites) => loaded.push((sheet, sprites)),
            Err(e) => {
                error!(sheet = %sheet.label(), error = %format!("{:#}", e), "sheet failed");
                failed += 1;
            }
        }
    }

    let packers = loaded
        .iter()
        .map(|(sheet, sprites)| sheet_packer(sheet, sprites))
        .collect();
    let results = pack_sheets(packers);

    for ((sheet, sprites), result) in loaded.iter().zip(results) {
        let outcome = result
            .context("packing failed")
            .and_then(|placement| write_sheet(sheet, sprites, &placement, dry_run));
        if let Err(e) = outcome {
            error!(sheet = %sheet.label(), error = %format!("{:#}", e), "sheet failed");
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} sheets failed", failed, sheets.len());
    }
    Ok(())
}

fn load_sheet(sheet: &SheetConfig, progress: bool) -> anyhow::Result<Vec<Sprite>> {
    info!(sheet = %sheet.label(), "scanning");
    let paths = assets::gather_paths(&sheet.directory)?;
    let sprites = assets::load_sprites(&paths, sheet, progress);
    info!(sheet = %sheet.label(), count = sprites.len(), "found images");
    {
        let mut classes = HashSet::new();
        for sprite in &sprites {
            if !classes.insert(sprite.class.as_str()) {
                warn!(
                    sheet = %sheet.label(),
                    class = %sprite.class,
                    file = %sprite.file_name,
                    "duplicate CSS class"
                );
            }
        }
    }
    Ok(sprites)
}

/// Registers each sprite under its index in `sprites`.
fn sheet_packer(sheet: &SheetConfig, sprites: &[Sprite]) -> GrowingPacker<usize> {
    let mut packer = GrowingPacker::new(sheet.packer.clone());
    for (idx, sprite) in sprites.iter().enumerate() {
        let (w, h) = sprite.image.dimensions();
        if let Err(e) = packer.register(w, h, idx) {
            warn!(sheet = %sheet.label(), file = %sprite.file_name, error = %e, "skipping sprite");
        }
    }
    packer
}

fn write_sheet(
    sheet: &SheetConfig,
    sprites: &[Sprite],
    placement: &Placement<usize>,
    dry_run: bool,
) -> anyhow::Result<()> {
    for r in placement {
        debug!(
            name = %sprites[r.id].class,
            x = r.x,
            y = r.y,
            x2 = r.x + r.width,
            y2 = r.y + r.height,
            width = r.width,
            height = r.height,
            "sprite"
        );
    }
    let stats = placement.stats();
    info!(
        sheet = %sheet.label(),
        sprites = stats.num_rects,
        width = stats.canvas_width,
        height = stats.canvas_height,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "packed"
    );
    if dry_run {
        return Ok(());
    }

    let canvas = render::compose(sprites, placement);
    render::write_png(&sheet.sprite_image_file, &canvas)?;
    info!(sheet = %sheet.label(), path = ?sheet.sprite_image_file, "wrote");

    let rendered = render::render_text(sheet, sprites, placement)?;
    render::write_css(&sheet.sprite_css_file, &rendered)?;
    info!(sheet = %sheet.label(), path = ?sheet.sprite_css_file, "wrote");

    let html_path = sheet.html_path();
    render::write_html(&html_path, &rendered)?;
    info!(sheet = %sheet.label(), path = ?html_path, "wrote");
    Ok(())
}

fn run_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let sheet = args.naming.into_sheet(
        args.directory,
        PathBuf::from("sprites.png"),
        PathBuf::from("sprites.css"),
        None,
    );
    let sprites = load_sheet(&sheet, false)?;
    let placement = sheet_packer(&sheet, &sprites)
        .pack()
        .context("packing failed")?;

    // key placements by CSS class instead of the internal index
    let keyed = Placement {
        canvas_width: placement.canvas_width,
        canvas_height: placement.canvas_height,
        rects: placement
            .rects
            .into_iter()
            .map(|r| sprite_packer_core::PackedRectangle {
                id: sprites[r.id].class.clone(),
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
            })
            .collect(),
    };
    let value = match args.metadata.as_str() {
        "json-hash" => sprite_packer_core::to_json_hash(&keyed),
        _ => sprite_packer_core::to_json_array(&keyed),
    };
    let json = serde_json::to_string_pretty(&value)?;
    match &args.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(?path, sprites = keyed.len(), "layout written");
        }
        None => println!("{}", json),
    }

    if let Some(stats_path) = &args.export_stats {
        let stats = keyed.stats();
        fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats exported");
    }
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::path::Path;

    fn sheet(directory: PathBuf, out: &Path, name: &str) -> SheetConfig {
        SheetConfig {
            directory,
            icon_name_prefix: String::new(),
            icon_name_suffix: String::new(),
            sprite_image_file: out.join(format!("{name}.png")),
            sprite_css_file: out.join(format!("{name}.css")),
            html_file: None,
            sprite_size: 0,
            packer: PackerConfig::default(),
        }
    }

    #[test]
    fn failing_sheet_does_not_stop_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir(&icons).unwrap();
        RgbaImage::new(10, 10).save(icons.join("a.png")).unwrap();
        RgbaImage::new(20, 10).save(icons.join("b.png")).unwrap();
        let out = dir.path().join("out");

        let sheets = vec![
            sheet(dir.path().join("missing"), &out, "missing"),
            sheet(icons, &out, "items"),
        ];
        let err = run_sheets(&sheets, false, false).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 sheets failed");

        assert!(out.join("items.png").is_file());
        assert!(out.join("items.css").is_file());
        assert!(out.join("items.html").is_file());
        assert!(!out.join("missing.png").exists());
        let packed = image::open(out.join("items.png")).unwrap();
        assert_eq!((packed.width(), packed.height()), (20, 20));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::new(8, 8).save(dir.path().join("a.png")).unwrap();
        let out = dir.path().join("out");
        run_sheets(&[sheet(dir.path().to_path_buf(), &out, "items")], false, true).unwrap();
        assert!(!out.exists());
    }
}
