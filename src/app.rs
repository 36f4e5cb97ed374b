use crate::config::{self, IniStore, SettingsStore, POLL_INTERVAL};
use crate::core::gamepad;
use crate::core::gfx::Presenter;
use crate::core::input::{self, EventQueue, InputEvent};
use crate::core::midi::MidiTaps;
use crate::game::gameplay::{self, TrainerAction};
use crate::ui::frame::Frame;
use gilrs::{GamepadId, Gilrs};
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::{error::Error, sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

pub struct App {
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    queue: EventQueue,
    trainer: gameplay::State,
    store: IniStore,
    gilrs: Option<Gilrs>,
    active_pad: Option<GamepadId>,
    pad_events: Vec<InputEvent>,
    _midi: Option<MidiTaps>,
}

impl App {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let mut attributes = Window::default_attributes().with_title(config::WINDOW_TITLE);
        if config::FULLSCREEN {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(event_loop.primary_monitor())));
        } else {
            attributes = attributes.with_inner_size(PhysicalSize::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT));
        }

        let window = Arc::new(event_loop.create_window(attributes)?);
        self.presenter = Some(Presenter::new(window.clone())?);
        window.request_redraw();
        self.window = Some(window);
        info!("Starting event loop...");
        Ok(())
    }

    /// One scheduler step: collect input from every source, advance the
    /// trainer to now, and schedule the next wake-up.
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(gilrs) = self.gilrs.as_mut() {
            gamepad::poll_and_collect(gilrs, &mut self.active_pad, &mut self.pad_events);
            for event in self.pad_events.drain(..) {
                self.queue.push(event);
            }
        }
        for event in self.queue.drain() {
            gameplay::queue_event(&mut self.trainer, event);
        }

        let now = Instant::now();
        if gameplay::update(&mut self.trainer, now, &self.store) == TrainerAction::Exit {
            event_loop.exit();
            return;
        }

        if gameplay::take_redraw(&mut self.trainer) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        let wait = gameplay::wait_budget(&self.trainer, now, POLL_INTERVAL);
        event_loop.set_control_flow(ControlFlow::WaitUntil(now + wait));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = Frame::capture(&self.trainer);
        if let Some(window) = &self.window {
            window.set_title(&frame.title());
        }
        if let Some(presenter) = self.presenter.as_mut() {
            if let Err(e) = presenter.present(&frame) {
                error!("Failed to draw frame: {}", e);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                error!("Failed to create the trainer window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else { return; };
        if window_id != window.id() { return; }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested. Shutting down.");
                self.queue.push(InputEvent::Quit);
            }
            WindowEvent::Resized(_) => window.request_redraw(),
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = input::event_from_key(&key_event, Instant::now()) {
                    self.queue.push(event);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.tick(event_loop);
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let store = IniStore::in_home_dir();
    info!("Settings file: {}", store.path().display());
    let settings = store.load();
    let options = config::scheduler_options();

    let queue = EventQueue::new();
    let port_hint = std::env::var(config::ENV_MIDI_PORT).ok();
    let midi = match MidiTaps::connect(queue.sender(), port_hint.as_deref()) {
        Ok(midi) => midi,
        Err(e) => {
            warn!("MIDI input disabled: {}", e);
            None
        }
    };

    let trainer = gameplay::init(settings, options, StdRng::from_os_rng(), Instant::now());

    let event_loop = EventLoop::new()?;
    let mut app = App {
        window: None,
        presenter: None,
        queue,
        trainer,
        store,
        gilrs: gamepad::try_init(),
        active_pad: None,
        pad_events: Vec::with_capacity(16),
        _midi: midi,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
