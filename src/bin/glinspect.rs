use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use glinspect::{
    Compositor, DebugAction, DebugServer, HttpDebugServer, ImageView, InspectConfig, MagFilter,
    ObjectKind, OpacityMode, PropertyView, RenderedImage, SourceImage,
};

#[derive(Parser, Debug)]
#[command(name = "glinspect", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug server base URL (overrides the configuration).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a local image over the checkerboard and write a PNG.
    Composite(CompositeArgs),
    /// Fetch the current framebuffer snapshot and write it composited as a PNG.
    Snapshot(SnapshotArgs),
    /// Advance playback and print the log tail.
    Step {
        /// One of play, nextFrame, nextGroup, nextFbo, nextDraw, next.
        action: DebugAction,
    },
    /// Print the log tail.
    Log {
        /// Number of entries (defaults to the configured value).
        #[arg(long)]
        lines: Option<u32>,
    },
    /// List object names of one kind.
    List {
        /// Object kind.
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Print the property tree of one object.
    Show {
        /// Object kind.
        #[arg(value_enum)]
        kind: KindArg,
        /// Object name as listed by the server.
        name: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Opacity in `[0, 1]`.
    #[arg(long, default_value_t = 1.0)]
    opacity: f32,

    /// Output width; derived from the image aspect when omitted.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height; derived from the image aspect when omitted.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Magnification filter (linear or nearest).
    #[arg(long, default_value = "linear")]
    filter: MagFilter,

    /// Opacity blend mode (reveal-alpha or fade); defaults to the configured mode.
    #[arg(long)]
    mode: Option<OpacityMode>,

    /// Also print the output as a `data:image/png;base64,` URI.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Opacity in `[0, 1]`; defaults to the configured slider position.
    #[arg(long)]
    opacity: Option<f32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    #[value(alias = "texture")]
    Textures,
    #[value(alias = "program")]
    Programs,
    #[value(alias = "shader")]
    Shaders,
}

impl From<KindArg> for ObjectKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Textures => ObjectKind::Texture,
            KindArg::Programs => ObjectKind::Program,
            KindArg::Shaders => ObjectKind::Shader,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config(cli.config.as_deref(), cli.server)?;
    match cli.cmd {
        Command::Composite(args) => cmd_composite(&cfg, args),
        Command::Snapshot(args) => cmd_snapshot(&cfg, args),
        Command::Step { action } => cmd_step(&cfg, action),
        Command::Log { lines } => cmd_log(&cfg, lines),
        Command::List { kind } => cmd_list(&cfg, kind.into()),
        Command::Show { kind, name } => cmd_show(&cfg, kind.into(), &name),
        Command::Config => {
            print!("{}", cfg.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, server: Option<String>) -> anyhow::Result<InspectConfig> {
    let mut cfg = match path {
        Some(p) => InspectConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => InspectConfig::default(),
    };
    if let Some(url) = server {
        cfg.server.url = url;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn connect(cfg: &InspectConfig) -> anyhow::Result<HttpDebugServer> {
    Ok(HttpDebugServer::new(&cfg.server)?)
}

fn slider_position(opacity: f32) -> anyhow::Result<u8> {
    if !(0.0..=1.0).contains(&opacity) {
        anyhow::bail!("opacity must be within [0, 1], got {opacity}");
    }
    Ok((opacity * 100.0).round() as u8)
}

fn write_output(img: &RenderedImage, out: &Path) -> anyhow::Result<()> {
    img.save_png(out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {} ({}x{})", out.display(), img.width, img.height);
    Ok(())
}

fn cmd_composite(cfg: &InspectConfig, args: CompositeArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let source = SourceImage::decode(&bytes)
        .with_context(|| format!("decode image '{}'", args.in_path.display()))?
        .with_filter(args.filter);

    let mut program = cfg.compositor;
    if let Some(mode) = args.mode {
        program.mode = mode;
    }

    let slider = slider_position(args.opacity)?;
    let img = match (args.width, args.height) {
        // An explicit output size bypasses the view's container envelope.
        (Some(w), Some(h)) => {
            if w == 0 || h == 0 {
                anyhow::bail!("output size must be non-zero, got {w}x{h}");
            }
            Compositor::new(program)
                .render(&source, f32::from(slider) / 100.0, w, h)?
                .context("nothing rendered")?
        }
        _ => {
            let mut view = ImageView::new(
                "composite",
                args.in_path.display().to_string(),
                &cfg.view,
                program,
            )?;
            view.on_opacity_changed(slider)?;
            view.on_image_loaded(source)?;
            view.last_output().cloned().context("nothing rendered")?
        }
    };

    write_output(&img, &args.out)?;
    if args.data_uri {
        println!("{}", img.to_data_uri()?);
    }
    Ok(())
}

fn cmd_snapshot(cfg: &InspectConfig, args: SnapshotArgs) -> anyhow::Result<()> {
    let mut server = connect(cfg)?;
    server.begin().context("begin debug session")?;
    let source = server
        .framebuffer_color(0, 0)
        .context("fetch framebuffer snapshot")?;

    let mut view = ImageView::new(
        glinspect::COLOR0_VIEW,
        "/fbo/0/color0",
        &cfg.view,
        cfg.compositor,
    )?;
    if let Some(opacity) = args.opacity {
        view.on_opacity_changed(slider_position(opacity)?)?;
    }
    view.on_image_loaded(source)?;
    let img = view
        .last_output()
        .context("framebuffer snapshot is empty")?;
    write_output(img, &args.out)
}

fn print_log(entries: &[String]) {
    for line in entries {
        println!("{line}");
    }
}

fn cmd_step(cfg: &InspectConfig, action: DebugAction) -> anyhow::Result<()> {
    let mut server = connect(cfg)?;
    server
        .step(action)
        .with_context(|| format!("debug action '{}'", action.id()))?;
    let entries = server.log_tail(cfg.server.log_lines).context("fetch log")?;
    print_log(&entries);
    Ok(())
}

fn cmd_log(cfg: &InspectConfig, lines: Option<u32>) -> anyhow::Result<()> {
    let mut server = connect(cfg)?;
    let entries = server
        .log_tail(lines.unwrap_or(cfg.server.log_lines))
        .context("fetch log")?;
    print_log(&entries);
    Ok(())
}

fn cmd_list(cfg: &InspectConfig, kind: ObjectKind) -> anyhow::Result<()> {
    let mut server = connect(cfg)?;
    let names = server
        .list(kind)
        .with_context(|| format!("list {} objects", kind.segment()))?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn cmd_show(cfg: &InspectConfig, kind: ObjectKind, name: &str) -> anyhow::Result<()> {
    let mut server = connect(cfg)?;
    let meta = server
        .detail(kind, name)
        .with_context(|| format!("fetch {} '{name}'", kind.segment()))?;
    print!("{}", PropertyView::from_json(&meta).render_text());
    Ok(())
}
