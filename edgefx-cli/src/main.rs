use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use edgefx::{
    Bounds, CookContext, EdgeEnhance, EdgeSide, FilterConfig, Image, Kernel3x3, OutputSpec,
    ParamTrack, PixelFormat, Plane, PlaneBuf,
};
use half::f16;

#[derive(Parser, Debug)]
#[command(name = "edgefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edge enhance an image file and write the result as a PNG.
    Filter(FilterArgs),
    /// Print the kernel for a set of parameters as JSON.
    Kernel(KernelArgs),
}

#[derive(Parser, Debug)]
struct EdgeArgs {
    /// Filter config JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Left enhance.
    #[arg(long, allow_negative_numbers = true)]
    left: Option<f32>,

    /// Right enhance.
    #[arg(long, allow_negative_numbers = true)]
    right: Option<f32>,

    /// Top enhance.
    #[arg(long, allow_negative_numbers = true)]
    top: Option<f32>,

    /// Bottom enhance.
    #[arg(long, allow_negative_numbers = true)]
    bottom: Option<f32>,

    /// Effect fade, multiplied into every side.
    #[arg(long)]
    fade: Option<f32>,

    /// Time the parameters are sampled at.
    #[arg(long, default_value_t = 0.0)]
    time: f32,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    edge: EdgeArgs,

    /// Channel representation to cook in: u8, u16, f16 or f32.
    #[arg(long)]
    format: Option<PixelFormat>,

    /// Use the fast integer conversion.
    #[arg(long, default_value_t = false)]
    fast: bool,

    /// Square tile size in pixels.
    #[arg(long)]
    tile: Option<u32>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Cook tiles on the calling thread.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Also write the one pixel border the filter grows the image by.
    #[arg(long, default_value_t = false)]
    expand: bool,
}

#[derive(Parser, Debug)]
struct KernelArgs {
    #[command(flatten)]
    edge: EdgeArgs,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Filter(args) => cmd_filter(args),
        Command::Kernel(args) => cmd_kernel(args),
    }
}

fn load_config(edge: &EdgeArgs) -> anyhow::Result<FilterConfig> {
    let mut cfg = match &edge.config {
        Some(path) => FilterConfig::from_path(path)?,
        None => FilterConfig::default(),
    };
    for (side, value) in [
        (EdgeSide::Left, edge.left),
        (EdgeSide::Right, edge.right),
        (EdgeSide::Top, edge.top),
        (EdgeSide::Bottom, edge.bottom),
    ] {
        if let Some(v) = value {
            *cfg.params.track_mut(side) = ParamTrack::constant(v);
        }
    }
    if let Some(fade) = edge.fade {
        cfg.fade = fade;
    }
    Ok(cfg)
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.edge)?;
    if let Some(format) = args.format {
        cfg.format = format;
    }
    if args.fast {
        cfg.fast = true;
    }
    if let Some(tile) = args.tile {
        cfg.tile.width = tile;
        cfg.tile.height = tile;
    }
    if args.threads.is_some() {
        cfg.threading.threads = args.threads;
    }
    if args.sequential {
        cfg.threading.parallel = false;
    }
    cfg.validate()?;

    let decoded = image::open(&args.in_path)
        .with_context(|| format!("decode image '{}'", args.in_path.display()))?;
    let input = decode_planes(&decoded, &cfg)?;

    let ctx = CookContext::new(&cfg.params, cfg.cook_request(args.edge.time))?;
    let node = EdgeEnhance::new(&input)
        .with_fast(cfg.fast)
        .with_bypass(cfg.bypass)
        .with_boundary(cfg.boundary);
    let area = if args.expand {
        edgefx::image_bounds(input.bounds())
    } else {
        input.bounds()
    };
    let (out, stats) = node.cook_image(&ctx, area, &OutputSpec::like(&input), &cfg.cook_opts())?;
    tracing::info!(
        tiles = stats.tiles_total,
        sub_tiles = stats.sub_tiles_cooked,
        format = %cfg.format,
        "cooked image"
    );

    write_png(&out, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_kernel(args: KernelArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.edge)?;
    cfg.validate()?;
    let ctx = CookContext::new(&cfg.params, cfg.cook_request(args.edge.time))?;
    let kernel: &Kernel3x3 = ctx.kernel();
    println!("{}", serde_json::to_string_pretty(kernel)?);
    Ok(())
}

/// Split a decoded image into four RGBA planes of `cfg.format`.
///
/// Image rows run top-down; planes run bottom-up, so plane row 0 is the last image row.
fn decode_planes(decoded: &image::DynamicImage, cfg: &FilterConfig) -> anyhow::Result<Image> {
    let (w, h) = (decoded.width() as usize, decoded.height() as usize);
    let bounds = Bounds::from_size(decoded.width(), decoded.height())?;
    let flip = |y: usize| (h - 1 - y) as u32;

    let planes: Vec<PlaneBuf> = match cfg.format {
        PixelFormat::U8 => {
            let rgba = decoded.to_rgba8();
            (0..4)
                .map(|c| Plane::from_fn(w, h, |x, y| rgba.get_pixel(x as u32, flip(y))[c]).into())
                .collect()
        }
        PixelFormat::U16 => {
            let rgba = decoded.to_rgba16();
            (0..4)
                .map(|c| Plane::from_fn(w, h, |x, y| rgba.get_pixel(x as u32, flip(y))[c]).into())
                .collect()
        }
        PixelFormat::F16 => {
            let rgba = decoded.to_rgba32f();
            (0..4)
                .map(|c| {
                    Plane::from_fn(w, h, |x, y| {
                        f16::from_f32(rgba.get_pixel(x as u32, flip(y))[c])
                    })
                    .into()
                })
                .collect()
        }
        PixelFormat::F32 => {
            let rgba = decoded.to_rgba32f();
            (0..4)
                .map(|c| Plane::from_fn(w, h, |x, y| rgba.get_pixel(x as u32, flip(y))[c]).into())
                .collect()
        }
    };

    let (black, white) = cfg.black_white();
    let img = Image::from_planes(bounds, planes)?;
    if cfg.format.is_float() {
        Ok(img)
    } else {
        Ok(img.with_black_white(black, white)?)
    }
}

fn write_png(img: &Image, path: &Path) -> anyhow::Result<()> {
    let bounds = img.bounds();
    let (w, h) = (bounds.width(), bounds.height());
    let (black, white) = if img.format().is_float() {
        (0.0, 1.0)
    } else {
        (img.black(), img.white())
    };
    let scale = 1.0 / (white - black);

    let mut data = Vec::with_capacity(w * h * 4);
    for row in (0..h).rev() {
        for x in 0..w {
            for plane in img.planes() {
                let v = (plane.sample_f32(x, row) - black) * scale;
                data.push((v.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &data,
        w as u32,
        h as u32,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
