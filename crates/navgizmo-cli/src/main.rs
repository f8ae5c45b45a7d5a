use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use navgizmo_base::GizmoOptions;
use navgizmo_view::{
    GizmoRenderer, GizmoScene, HandleName, LabelRasterizer, LabelStyle, ManualClock, MaterialId,
    NavigatorGizmo, NoPointerLock, OrthoProjection, PointerEvent, Rect, SceneCamera, Surface,
    Vec3, Viewport, pos2, vec2,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "navgizmo")]
#[command(about = "Headless driver for the navigation gizmo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replays clicks and drags against a camera and reports where it ends up.
    Simulate(SimulateArgs),
    /// Prints the default options as JSON.
    Defaults,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "0,0,5")]
    camera: String,
    #[arg(long, default_value = "0,0,0")]
    target: String,
    /// Handle to click, e.g. `X` or `-Z`. Repeatable.
    #[arg(long = "click")]
    clicks: Vec<HandleName>,
    /// Drag delta in unit-square coordinates, e.g. `0.1,0`. Repeatable.
    #[arg(long = "drag")]
    drags: Vec<String>,
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    #[arg(long, default_value_t = 600)]
    max_frames: usize,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(args) => simulate(args),
        Command::Defaults => print_defaults(),
    }
}

fn print_defaults() -> Result<()> {
    let json = GizmoOptions::default()
        .to_json_pretty()
        .context("failed to serialize default options")?;
    println!("{json}");
    Ok(())
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let options = match &args.config {
        Some(path) => GizmoOptions::from_path(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None => GizmoOptions::default(),
    };
    let position = parse_vec3(&args.camera).context("invalid --camera")?;
    let target = parse_vec3(&args.target).context("invalid --target")?;
    if position == target {
        bail!("--camera and --target must differ");
    }
    let drags = args
        .drags
        .iter()
        .map(|text| parse_pair(text))
        .collect::<Result<Vec<_>>>()?;

    let clock = ManualClock::default();
    let renderer = HeadlessRenderer::new(args.width, args.height);
    let camera = SceneCamera::looking_at(position, target, Vec3::unit_y());
    let mut gizmo = NavigatorGizmo::new(
        camera,
        renderer,
        Box::new(SequentialRasterizer::default()),
        Box::new(NoPointerLock),
        Box::new(clock.clone()),
        options,
    )
    .context("failed to create navigator gizmo")?;
    gizmo.set_target(target);
    gizmo.update();

    for (dx, dy) in drags {
        drag(&mut gizmo, dx, dy);
        gizmo.update();
        report("drag", gizmo.camera());
    }

    for name in args.clicks {
        let client = gizmo.handle_client_position(name);
        gizmo.handle_event(PointerEvent::Down { client });
        gizmo.handle_event(PointerEvent::Up { client });
        if !gizmo.is_animating() {
            warn!(handle = %name, "click did not start a snap; handle may be hidden");
            continue;
        }
        let mut frames = 0;
        while gizmo.is_animating() && frames < args.max_frames {
            clock.advance_ms(args.frame_ms);
            gizmo.update();
            frames += 1;
        }
        if gizmo.is_animating() {
            bail!("snap toward {name} did not finish within {} frames", args.max_frames);
        }
        info!(handle = %name, frames, "snap complete");
        report("click", gizmo.camera());
    }

    info!(frames = gizmo.renderer().frames, "simulation finished");
    report("final", gizmo.camera());
    gizmo.dispose();
    Ok(())
}

fn drag<R: GizmoRenderer>(gizmo: &mut NavigatorGizmo<SceneCamera, R>, dx: f64, dy: f64) {
    let size = gizmo.options().size;
    let center = gizmo.client_position(pos2(size * 0.5, size * 0.5));
    let movement = vec2(dx * size, -dy * size);
    let end = center + movement;
    gizmo.handle_event(PointerEvent::Down { client: center });
    gizmo.handle_event(PointerEvent::Move {
        client: end,
        movement,
    });
    gizmo.handle_event(PointerEvent::Up { client: end });
}

fn report(stage: &str, camera: &SceneCamera) {
    let p = camera.position;
    let u = camera.up;
    info!(
        stage,
        position = %format!("{:.4},{:.4},{:.4}", p.x, p.y, p.z),
        up = %format!("{:.4},{:.4},{:.4}", u.x, u.y, u.z),
        "camera"
    );
}

fn parse_vec3(text: &str) -> Result<Vec3> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        bail!("expected three comma-separated numbers, e.g. 0,0,5");
    }

    let x: f64 = parts[0].trim().parse().context("invalid x")?;
    let y: f64 = parts[1].trim().parse().context("invalid y")?;
    let z: f64 = parts[2].trim().parse().context("invalid z")?;
    Ok(Vec3::new(x, y, z))
}

fn parse_pair(text: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 {
        bail!("--drag expects two comma-separated numbers, e.g. 0.1,0");
    }

    let dx: f64 = parts[0].trim().parse().context("invalid dx")?;
    let dy: f64 = parts[1].trim().parse().context("invalid dy")?;
    Ok((dx, dy))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

struct HeadlessRenderer {
    width: f64,
    height: f64,
    viewport: Viewport,
    auto_clear: bool,
    frames: usize,
    standalone: Option<Viewport>,
}

impl HeadlessRenderer {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            viewport: Viewport::new(0.0, 0.0, width, height),
            auto_clear: true,
            frames: 0,
            standalone: None,
        }
    }
}

impl GizmoRenderer for HeadlessRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn auto_clear(&self) -> bool {
        self.auto_clear
    }

    fn set_auto_clear(&mut self, auto_clear: bool) {
        self.auto_clear = auto_clear;
    }

    fn clear_depth(&mut self) {}

    fn render(&mut self, surface: Surface, scene: &GizmoScene, projection: &OrthoProjection) {
        self.frames += 1;
        debug!(
            ?surface,
            objects = scene.objects().count(),
            disc = scene.disc_visible(),
            forward = ?projection.forward(),
            "frame"
        );
    }

    fn surface_rect(&self, surface: Surface) -> Rect {
        match (surface, self.standalone) {
            (Surface::Standalone(_), Some(placement)) => Rect::from_min_size(
                pos2(placement.x, self.height - placement.y - placement.height),
                vec2(placement.width, placement.height),
            ),
            _ => Rect::from_min_size(pos2(0.0, 0.0), vec2(self.width, self.height)),
        }
    }

    fn attach_standalone_surface(&mut self, placement: Viewport) -> Surface {
        self.standalone = Some(placement);
        Surface::Standalone(0)
    }

    fn detach_standalone_surface(&mut self, _surface: Surface) {
        self.standalone = None;
    }
}

#[derive(Default)]
struct SequentialRasterizer {
    next: u64,
}

impl LabelRasterizer for SequentialRasterizer {
    fn rasterize(&mut self, style: &LabelStyle) -> Option<MaterialId> {
        self.next += 1;
        debug!(text = %style.text, fill = %style.fill, "label rasterized");
        Some(MaterialId(self.next))
    }
}
