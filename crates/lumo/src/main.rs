use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lumo_config::Settings;
use lumo_engine::{Player, Registry};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

mod present;

use present::CanvasWidget;

/// Built-in cycling order for the variant keys.
const VARIANTS: [&str; 20] = [
    "waves", "aurora", "flow", "breathing", "bubbles", "clouds", "constellation", "embers",
    "fireworks", "flames", "floating", "helix", "leaves", "orbit", "plasma", "rain", "ripples",
    "snowfall", "spirals", "starfield",
];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = Settings::load()?;
    let terminal = ratatui::init();
    let result = App::new(settings).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current settings, remounted on every change.
    settings: Settings,
    registry: Registry,
    player: Player,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: Settings) -> Self {
        Self {
            running: false,
            settings,
            registry: Registry::with_builtins(),
            player: Player::new(0, 0),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.remount()?;
        while self.running {
            self.player.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Mount the configured variant, replacing whatever runs now.
    fn remount(&mut self) -> color_eyre::Result<()> {
        let config = self.settings.to_animation_config();
        self.player.mount(&self.registry, &config)?;
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Animation surface
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        let (width, height) = CanvasWidget::surface_size(chunks[0]);
        self.player.resize(width, height);
        frame.render_widget(CanvasWidget::new(self.player.canvas()), chunks[0]);

        let help = Line::from(vec![
            format!(" {} ", self.settings.variant).bold(),
            format!("x{:.2}  ", self.settings.speed).dark_gray(),
            "q".bold(),
            " quit  ".dark_gray(),
            "←/→".bold(),
            " variant  ".dark_gray(),
            "+/-".bold(),
            " speed  ".dark_gray(),
            "r".bold(),
            " restart".dark_gray(),
        ]);
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout to pace the animation near 30fps.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Right | KeyCode::Char(' ')) => self.cycle_variant(1)?,
            (_, KeyCode::Left) => self.cycle_variant(-1)?,
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.adjust_speed(0.25)?,
            (_, KeyCode::Char('-')) => self.adjust_speed(-0.25)?,
            (_, KeyCode::Char('r')) => self.remount()?,
            _ => {}
        }
        Ok(())
    }

    /// Switch to the next or previous built-in variant.
    fn cycle_variant(&mut self, step: isize) -> color_eyre::Result<()> {
        let current = VARIANTS
            .iter()
            .position(|&v| v == self.settings.variant)
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(VARIANTS.len() as isize) as usize;
        self.settings.variant = VARIANTS[next].to_string();
        self.remount()
    }

    /// Nudge the speed multiplier. Speed is captured at mount time, so
    /// the change takes effect through a remount.
    fn adjust_speed(&mut self, delta: f64) -> color_eyre::Result<()> {
        self.settings.speed = (self.settings.speed + delta).clamp(0.25, 5.0);
        self.remount()
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
