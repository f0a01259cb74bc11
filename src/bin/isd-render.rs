use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use isd_render::{
    BoxId, BoxKind, GeometryOracle as _, HandlerVerdict, IsdDocument, LayoutSurface, NodeKind,
    ParleyShaper, RenderOptions, SceneState, Size, WritingMode, isd::names,
    render::rollup::normalize_region_id,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "isd-render", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one ISD and write the laid-out box tree as JSON.
    Render(RenderArgs),
    /// Render one ISD and print the visual lines inferred from its leaves.
    Lines(SurfaceArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Input ISD JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Measure text with this TrueType/OpenType font instead of fixed-pitch metrics.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Fail on the first reported render error instead of skipping the offending value.
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output path for the box tree; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Scene state written by the previous render.
    #[arg(long)]
    state_in: Option<PathBuf>,

    /// Where to write the scene state for the next render.
    #[arg(long)]
    state_out: Option<PathBuf>,

    /// Animate regions that scroll up by one line.
    #[arg(long)]
    roll_up: bool,

    /// Only show content marked for forced display.
    #[arg(long)]
    forced_only: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Lines(args) => cmd_lines(args),
    }
}

fn read_isd_json(path: &Path) -> anyhow::Result<IsdDocument> {
    let f = File::open(path).with_context(|| format!("open ISD '{}'", path.display()))?;
    let doc: IsdDocument =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse ISD JSON")?;
    Ok(doc)
}

fn make_surface(args: &SurfaceArgs) -> anyhow::Result<LayoutSurface> {
    let size = Size::new(args.width, args.height);
    let Some(path) = &args.font else {
        return Ok(LayoutSurface::monospace(size));
    };
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    let shaper = ParleyShaper::from_font_bytes(&bytes)?;
    tracing::info!(family = shaper.family_name(), "using font");
    Ok(LayoutSurface::new(size, shaper))
}

fn render(
    doc: &IsdDocument,
    args: &SurfaceArgs,
    surface: &mut LayoutSurface,
    previous: Option<&SceneState>,
    options: &RenderOptions,
) -> anyhow::Result<isd_render::RenderOutput> {
    let strict = args.strict;
    let mut errors = move |message: &str| {
        if strict {
            eprintln!("error: {message}");
            HandlerVerdict::Abort
        } else {
            HandlerVerdict::Continue
        }
    };
    let output = isd_render::render_isd_with(
        doc,
        surface,
        previous,
        options,
        &mut isd_render::PassthroughImages,
        &mut errors,
    )?;
    Ok(output)
}

fn write_output(path: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let previous = match &args.state_in {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("read state '{}'", path.display()))?;
            Some(SceneState::from_json(&s)?)
        }
        None => None,
    };
    let options = RenderOptions {
        dimensions: None,
        display_forced_only: args.forced_only,
        enable_roll_up: args.roll_up,
    };

    let doc = read_isd_json(&args.surface.in_path)?;
    let mut surface = make_surface(&args.surface)?;
    let output = render(&doc, &args.surface, &mut surface, previous.as_ref(), &options)?;

    let dump = isd_render::dump_tree(&mut surface, output.root);
    let json = serde_json::to_string_pretty(&dump).with_context(|| "serialize box tree")?;
    write_output(args.out.as_deref(), &json)?;

    if let Some(path) = &args.state_out {
        write_output(Some(path), &output.state.to_json()?)?;
    }
    Ok(())
}

fn cmd_lines(args: SurfaceArgs) -> anyhow::Result<()> {
    let doc = read_isd_json(&args.in_path)?;
    let mut surface = make_surface(&args)?;
    let output = render(&doc, &args, &mut surface, None, &RenderOptions::default())?;

    // every ISD region gets one region box, in document order
    let region_nodes = doc.contents.iter().filter(|n| n.kind == NodeKind::Region);
    let region_boxes: Vec<BoxId> = surface
        .children(output.root)
        .into_iter()
        .filter(|&id| surface.kind(id) == BoxKind::Region)
        .collect();

    for (node, region) in region_nodes.zip(region_boxes) {
        let axes = node
            .keyword(names::WRITING_MODE)
            .and_then(WritingMode::parse)
            .unwrap_or_default()
            .axes();
        let lines = isd_render::construct_line_list(&mut surface, region, axes);
        println!("region {}", normalize_region_id(&node.id));
        for line in &lines {
            println!(
                "{:>8.2} {:>8.2} {:>8.2} {:>8.2}  {}",
                line.before, line.after, line.start, line.end, line.text
            );
        }
        tracing::debug!(region = node.id.as_str(), lines = lines.len(), "line list built");
    }
    Ok(())
}
