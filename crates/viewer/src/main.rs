//! Musicverse - fly a camera through a music library rendered as a galaxy.

mod config;
mod jukebox;
mod view;

use anyhow::Result;
use audio::AudioSystem;
use engine_core::Time;
use galaxy::MusicGalaxy;
use input::InputState;
use input::NavMapper;
use navigation::{NavEvent, Navigator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use config::ViewerConfig;
use jukebox::StarJukebox;
use view::View;

/// Cap on fixed sub-steps drained per frame; keeps a long hitch from
/// turning into a burst of catch-up integration.
const MAX_STEPS_PER_FRAME: usize = 4;

/// Listener updates are skipped when hierarchy coordinates leave this
/// range (f32 audio space cannot hold cosmological distances).
const LISTENER_RANGE: f64 = 1.0e6;

/// File extensions considered music tracks.
const TRACK_EXTENSIONS: &[&str] = &["ogg", "mp3", "flac", "wav"];

struct ViewerState {
    window: Arc<Window>,
    time: Time,
    input: InputState,
    nav: Navigator,
    mapper: NavMapper,
    view: View,
    jukebox: StarJukebox,
    running: bool,
}

impl ViewerState {
    fn new(window: Arc<Window>, config: ViewerConfig) -> Result<Self> {
        let track_paths = scan_music_dir(Path::new(&config.music_dir));
        if track_paths.is_empty() {
            log::warn!(
                "No tracks found under {:?}; stars will select silently",
                config.music_dir
            );
        }

        let mut audio = match AudioSystem::new() {
            Ok(mut audio) => {
                audio.set_master_volume(config.master_volume);
                Some(audio)
            }
            Err(e) => {
                log::warn!("Audio unavailable: {}", e);
                None
            }
        };

        let mut track_names = Vec::new();
        for path in &track_paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            if let Some(audio) = &mut audio {
                if let Err(e) = audio.load_track(&name, path) {
                    log::warn!("Skipping {:?}: {}", path, e);
                    continue;
                }
            }
            track_names.push(name);
        }
        log::info!("Loaded {} tracks", track_names.len());

        let galaxy = MusicGalaxy::generate(
            config.galaxy_seed,
            config.star_count,
            track_names.len().max(1),
        );
        let jukebox = StarJukebox::new(galaxy, audio, track_names);

        let nav = Navigator::new();
        let size = window.inner_size();
        let mut view = View::new(size.width, size.height);
        view.update(&nav);
        nav.push_near_far(&mut view);

        Ok(Self {
            window,
            time: Time::new(),
            input: InputState::new(),
            nav,
            mapper: NavMapper::new(config.sensitivity),
            view,
            jukebox,
            running: true,
        })
    }

    /// Returns true when the app should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::Resized(size) => {
                self.view.set_size(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape && event.state == ElementState::Pressed {
                        self.running = false;
                        return true;
                    }
                    self.input.process_keyboard(code, event.state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / 100.0,
                };
                if amount > 0.0 {
                    self.input.set_scroll_up();
                } else if amount < 0.0 {
                    self.input.set_scroll_down();
                }
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.window.request_redraw();
            }
            _ => {}
        }
        false
    }

    fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }

    /// One frame: drain fixed navigation steps, then sync collaborators.
    fn update(&mut self) {
        self.time.update();
        let now = self.time.elapsed_seconds();

        self.mapper
            .apply(&self.input, &mut self.nav, &self.view, &mut self.jukebox, now);

        let dt = self.time.fixed_timestep_seconds();
        let mut steps = 0;
        while self.time.should_fixed_update() && steps < MAX_STEPS_PER_FRAME {
            self.nav.step(dt, &mut self.view);
            steps += 1;
        }

        self.view.update(&self.nav);

        for event in self.nav.take_events() {
            match event {
                NavEvent::LevelChanged { from, to } => {
                    log::info!("Crossed hierarchy level {} -> {}", from, to);
                }
                NavEvent::ModeChanged { from, to } => {
                    log::debug!("Flight mode {:?} -> {:?}", from, to);
                }
            }
        }

        let pose = *self.nav.pose();
        if pose.position.length() < LISTENER_RANGE {
            self.jukebox.update_listener(
                pose.position.as_vec3(),
                pose.forward().as_vec3(),
                pose.up().as_vec3(),
            );
        }
        self.jukebox.cleanup();

        if self.time.frame_count() % 300 == 0 {
            log::debug!(
                "level {} mode {:?} radius {:.3} fps {:.0}",
                self.nav.level(),
                self.nav.mode(),
                self.nav.target_distance(),
                self.time.fps()
            );
        }

        self.input.begin_frame();
    }
}

/// Collect playable files under the music directory, sorted for a stable
/// star-to-track mapping.
fn scan_music_dir(dir: &Path) -> Vec<PathBuf> {
    let mut tracks: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| TRACK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                        .unwrap_or(false)
                })
                .collect()
        })
        .unwrap_or_default();
    tracks.sort();
    tracks
}

/// Application handler for winit.
struct App {
    state: Option<ViewerState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = ViewerConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title("Musicverse")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match ViewerState::new(window.clone(), config) {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize viewer: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Musicverse");
    println!("  Drag            - steer toward a point (zoom with vertical drag)");
    println!("  Right drag      - orbit look");
    println!("  Scroll          - zoom");
    println!("  Double-click    - select a star and play its track (galaxy view)");
    println!("  G / J           - fly to selection / jump via home");
    println!("  H               - fly home");
    println!("  U               - ultimate zoom");
    println!("  Escape          - quit");

    log::info!("Starting Musicverse");

    let event_loop = EventLoop::new()?;
    // Poll continuously so navigation keeps integrating between sparse
    // window events.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
