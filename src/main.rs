//! Pac-Man Duel entry point
//!
//! Loads settings and sprites, opens the window and runs one round at a fixed
//! frame rate. The process exits when the round ends.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use pacman_duel::Settings;
use pacman_duel::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use pacman_duel::platform::{FramePacer, InputState};
use pacman_duel::renderer::{RenderError, RenderState, Scene, SpriteSheet, build_scene};
use pacman_duel::sim::{GamePhase, GameState, RoundConfig, tick};

const WINDOW_TITLE: &str = "Pac-Man Duel: beware the blue dots!";

/// Game instance holding all state
struct Game {
    settings: Settings,
    sheet: SpriteSheet,
    state: GameState,
    input: InputState,
    pacer: FramePacer,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    /// Result screen stays up until this instant, then the app exits
    hold_until: Option<Instant>,
    /// Startup failure raised inside the event loop
    fatal: Option<anyhow::Error>,
}

impl Game {
    fn new(settings: Settings, sheet: SpriteSheet, seed: u64) -> Self {
        let state = GameState::new(seed, RoundConfig::from(&settings));
        let pacer = FramePacer::new(settings.frame_duration(), Instant::now());
        Self {
            settings,
            sheet,
            state,
            input: InputState::new(winit::dpi::PhysicalSize::new(
                CANVAS_WIDTH as u32,
                CANVAS_HEIGHT as u32,
            )),
            pacer,
            window: None,
            render_state: None,
            hold_until: None,
            fatal: None,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let scale = f64::from(self.settings.window_scale);
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                f64::from(CANVAS_WIDTH) * scale,
                f64::from(CANVAS_HEIGHT) * scale,
            ))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("cannot open game window")?,
        );

        let size = window.inner_size();
        let render_state = pollster::block_on(init_gpu(window.clone(), size, &self.sheet))
            .context("cannot initialise graphics")?;

        self.input.resized(size);
        self.window = Some(window);
        self.render_state = Some(render_state);
        // The round clock starts once the window is up
        self.pacer = FramePacer::new(self.settings.frame_duration(), Instant::now());
        Ok(())
    }

    /// Run one simulation frame and present it
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.hold_until.is_some() {
            // Result screen already decided; only repaint it
            self.draw(&build_scene(&self.state), event_loop);
            return;
        }

        let elapsed = self.pacer.begin_frame(Instant::now());
        tick(&mut self.state, &self.input.poll(), elapsed);

        if self.state.phase == GamePhase::RoundOver && self.state.outcome.is_none() {
            log::info!("Window closed, exiting");
            event_loop.exit();
            return;
        }

        self.draw(&build_scene(&self.state), event_loop);

        if self.state.outcome.is_some() {
            let hold = Duration::from_secs_f32(self.settings.result_display_secs);
            self.hold_until = Some(Instant::now() + hold);
        }
    }

    fn draw(&mut self, scene: &Scene, event_loop: &ActiveEventLoop) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        match render_state.render(scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for Game {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.open_window(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if self.hold_until.is_some() {
                    event_loop.exit();
                    return;
                }
                // Handled by the next tick so the round ends without a result
                self.input.close_requested();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.input.pointer_moved(position),
            WindowEvent::Resized(size) => {
                self.input.resized(size);
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if let Some(until) = self.hold_until {
            if now >= until {
                log::info!("Result shown, exiting");
                event_loop.exit();
            } else {
                event_loop.set_control_flow(ControlFlow::WaitUntil(until));
            }
            return;
        }

        let Some(window) = &self.window else {
            return;
        };
        if self.pacer.is_due(now) {
            window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
        }
    }
}

async fn init_gpu(
    window: Arc<Window>,
    size: winit::dpi::PhysicalSize<u32>,
    sheet: &SpriteSheet,
) -> Result<RenderState, RenderError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });

    let surface = instance.create_surface(window)?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(surface, &adapter, size.width, size.height, sheet).await
}

/// Seed from the wall clock when settings don't pin one
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::load(&Settings::default_path());

    let sheet = SpriteSheet::load(&settings.asset_dir)
        .with_context(|| format!("cannot load sprites from {}", settings.asset_dir.display()))?;

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);

    let event_loop = EventLoop::new().context("cannot create event loop")?;
    let mut game = Game::new(settings, sheet, seed);
    event_loop.run_app(&mut game).context("event loop failed")?;

    match game.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pac-Man Duel starting...");

    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
