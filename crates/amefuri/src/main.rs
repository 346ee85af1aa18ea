use std::{
    fs::{self, File},
    time::{Duration, Instant},
};

use amefuri_config::{Config, project_dirs};
use amefuri_rain::{CellCanvas, FrameQueue, RainController};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();
    let config = Config::load()?;
    let terminal = ratatui::init();
    let result = run(terminal, config);
    ratatui::restore();
    result
}

/// Send logs to a file in the data directory; the terminal belongs to the UI.
fn init_logging() {
    let Some(dirs) = project_dirs() else {
        return;
    };
    let dir = dirs.data_local_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("amefuri.log")) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn run(terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    App::new(config, size.width, size.height).run(terminal)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Visibility last requested from the rain.
    visible: bool,
    /// Host settings.
    config: Config,
    /// The rain and the canvas it paints on.
    rain: RainController<CellCanvas, FrameQueue>,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `cols` x `rows`.
    pub fn new(config: Config, cols: u16, rows: u16) -> Self {
        let canvas = CellCanvas::new(cols, rows, config.cell_width, config.cell_height);
        Self {
            running: false,
            visible: config.start_visible,
            rain: RainController::new(canvas, FrameQueue::new()),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        info!("starting with {:?}", self.config);
        self.rain.load();
        self.rain.set_visibility(self.visible);

        let interval = self.config.frame_interval();
        let mut last_frame = Instant::now();
        self.running = true;
        while self.running {
            if last_frame.elapsed() >= interval {
                last_frame = Instant::now();
                self.rain.run_due_frame();
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(interval.saturating_sub(last_frame.elapsed()))?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let opacity = self.rain.opacity_at(Instant::now());
        frame.render_widget(self.rain.surface().view(opacity), area);

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let help = Line::from(vec![
            "q".bold().green(),
            " quit  ".dark_gray(),
            "v".bold().green(),
            " toggle rain".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so frames keep their pace.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('v') | KeyCode::Char(' ')) => self.toggle_visibility(),
            _ => {}
        }
    }

    /// Rebuild the rain for a new terminal size.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        let (cell_width, cell_height) = self.rain.surface().cell_size();
        self.rain.resize(cols as f32 * cell_width, rows as f32 * cell_height);
    }

    /// Show or hide the rain.
    fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        self.rain.set_visibility(self.visible);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
