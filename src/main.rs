use anyhow::{Context, Result};
use clap::Parser;
use pixels::{Pixels, SurfaceTexture};
use snake_glide::app::Flow;
use snake_glide::draw::Canvas;
use snake_glide::input::{KeyTracker, window_intent};
use snake_glide::render::Renderer;
use snake_glide::{FrameClock, GameConfig, Session};
use std::path::PathBuf;
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

#[derive(Parser)]
#[command(name = "snake-glide")]
#[command(version, about = "Grid Snake with smooth movement")]
struct Cli {
    /// JSON file with startup settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board columns
    #[arg(long)]
    cols: Option<u32>,

    /// Board rows
    #[arg(long)]
    rows: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Starting speed in grid moves per second
    #[arg(long)]
    speed: Option<f32>,

    /// RNG seed for a reproducible round
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Hide the background grid lines
    #[arg(long)]
    no_grid: bool,
}

impl Cli {
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_grid {
            config.show_grid = false;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    let (width, height) = config.window_size();

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("creating window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture).context("creating pixel surface")?
    };

    let renderer = Renderer::new(config.cell_size, config.grid_visible());
    let mut clock = FrameClock::new(config.target_fps);
    let mut session = Session::new(config);
    let mut keys = KeyTracker::new();
    log::info!(
        "{}x{} board, {}px cells, speed {}, seed {}",
        session.config.cols,
        session.config.rows,
        session.config.cell_size,
        session.config.initial_speed,
        session.seed
    );

    event_loop.run(move |event, _, control_flow| {
        // Key presses go straight to the session so turns are checked in press order.
        if let Event::WindowEvent {
            event: window_event,
            ..
        } = &event
        {
            if let Some(intent) = keys.on_window_event(window_event) {
                if session.handle(intent) == Flow::Quit {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }
        }

        if let Event::RedrawRequested(_) = event {
            let mut canvas = Canvas::new(pixels.frame_mut(), width, height);
            renderer.render(&mut canvas, &session);
            if let Err(err) = pixels.render() {
                log::error!("presenting frame failed: {err}");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if let Some(intent) = window_intent(&input) {
                if session.handle(intent) == Flow::Quit {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            let elapsed_ms = clock.tick();
            session.update(elapsed_ms);
            window.request_redraw();
            *control_flow = ControlFlow::WaitUntil(clock.next_deadline());
        }
    });
}
