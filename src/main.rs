use std::io;
use std::io::Write;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quadlife::WorldOffset;
use quadlife::camera::Camera;
use quadlife::config::Config;
use quadlife::quadtree::format_grid;
use quadlife::universe::Universe;

enum Event {
    Step,
    Exit,
}

fn handle_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CtEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Exit),
            _ => Some(Event::Step),
        },
        _ => None,
    }
}

/// The current generation as text
fn frame(universe: &Universe, cam: Option<&mut Camera>) -> String {
    let header = format!(
        "generation {}, population {}, {}x{} from {:?}\n",
        universe.generation(),
        universe.population(),
        universe.width(),
        universe.width(),
        universe.origin()
    );

    let body = match cam {
        Some(cam) => {
            cam.reset();
            cam.draw(universe);
            cam.render().to_string()
        }
        None => format_grid(&universe.render(), universe.width()),
    };

    header + &body
}

fn run_batch(universe: &mut Universe, steps: u64, mut cam: Option<Camera>) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", frame(universe, cam.as_mut()))?;

    for _ in 0..steps {
        universe.step();
        writeln!(stdout, "{}", frame(universe, cam.as_mut()))?;
    }

    Ok(())
}

/// Keeps the terminal in raw mode until dropped, including on an early return.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn run_interactive(universe: &mut Universe, mut cam: Option<Camera>) -> io::Result<()> {
    let _raw = RawMode::enable()?;
    let mut stdout = io::stdout();

    loop {
        let s = frame(universe, cam.as_mut());

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in s.lines() {
            execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        match handle_event(event::read()?) {
            None => {}
            Some(Event::Step) => universe.step(),
            Some(Event::Exit) => break,
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_args(std::env::args().skip(1))?;
    let seed = config.seed()?;
    let mut universe =
        Universe::from_pattern(&seed).context("Failed to build the universe")?;

    info!(?config, width = universe.width(), "starting");

    let cam = if config.braille {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let mut cam = Camera::new(2 * cols as usize, 4 * rows.saturating_sub(1) as usize);
        cam.center_on(
            (seed.width() / 2) as WorldOffset,
            (seed.height() / 2) as WorldOffset,
        );

        Some(cam)
    } else {
        None
    };

    match config.steps {
        Some(steps) => run_batch(&mut universe, steps, cam)?,
        None => run_interactive(&mut universe, cam)?,
    }

    Ok(())
}
