use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    path::PathBuf,
    time::{Duration, Instant},
};
use textscramble::{
    Config, ScrambleAnimator,
    driver::{HoverBinding, PhraseCycler},
    logging::{self, LogTarget},
    slot::{MemorySlot, OutputSlot, TerminalSlot},
};

/// Scramble text from one phrase to another, one frame at a time.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The path to the configuration file.
    #[clap(short, long, env = "TEXTSCRAMBLE_CONFIG")]
    config: Option<PathBuf>,

    /// Seed the random source for reproducible transitions.
    #[clap(long)]
    seed: Option<u64>,

    /// Log more; repeat for even more.
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive terminal demo.
    Play {
        /// Cycle through the configured phrases instead of toggling hover.
        #[clap(long)]
        cycle: bool,
    },

    /// Print every frame of one transition and exit.
    Dump {
        /// The text shown before the transition.
        #[clap(long, default_value = "")]
        from: String,

        /// The text to settle on.
        #[clap(long)]
        to: String,

        /// Print markup with tagged placeholders instead of plain text.
        #[clap(long)]
        markup: bool,
    },
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map(fastrand::Rng::with_seed).unwrap_or_else(fastrand::Rng::new)
}

fn dump(config: &Config, rng: fastrand::Rng, from: &str, to: &str, markup: bool) -> anyhow::Result<()> {
    let mut animator = ScrambleAnimator::bind_with_rng(MemorySlot::new(from).with_history(), &config.scramble, rng)?;
    let completion = animator.set_text(to);
    animator.settle();

    let class = &config.scramble.placeholder_class;
    let mut stdout = io::stdout().lock();
    let frames = animator.slot_mut().take_history();
    for frame in &frames {
        let line = if markup { frame.to_markup(class) } else { frame.plain_text() };
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout, "frames: {}", frames.len())?;
    anyhow::ensure!(completion.is_resolved(), "transition did not settle");
    Ok(())
}

/// Restores the terminal when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn play(config: &Config, rng: fastrand::Rng, cycle: bool) -> anyhow::Result<()> {
    let demo = &config.demo;
    let (columns, rows) = terminal::size().context("reading terminal size")?;
    let widest = demo.phrases.iter().chain([&demo.resting_phrase, &demo.hover_phrase]).map(|p| p.chars().count()).max();
    let width = u16::try_from(widest.unwrap_or(0)).unwrap_or(u16::MAX);
    let row = rows / 2;
    let column = columns.saturating_sub(width) / 2;

    let _guard = TerminalGuard::enter()?;
    let hint = if cycle { "q: quit" } else { "space: hover   q: quit" };
    execute!(io::stdout(), MoveTo(0, rows.saturating_sub(1)), Print(hint))?;

    let resting = if cycle { "" } else { demo.resting_phrase.as_str() };
    let slot = TerminalSlot::new(io::stdout(), row, column, demo.placeholder_hue).with_text(resting);
    let mut animator = ScrambleAnimator::bind_with_rng(slot, &config.scramble, rng)?;
    animator.slot_mut().redraw()?;

    let mut hover = HoverBinding::new(&demo.resting_phrase, &demo.hover_phrase);
    let mut cycler = if cycle {
        PhraseCycler::new(demo.phrases.clone(), Duration::from_millis(demo.cycle_delay_millis))
    } else {
        None
    };
    let interval = Duration::from_secs(1) / demo.frames_per_second;
    let mut next_frame = Instant::now();

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') if !cycle => {
                        hover.toggle(&mut animator);
                    }
                    _ => {}
                },
                Event::Resize(..) => animator.slot_mut().redraw()?,
                _ => {}
            }
            continue;
        }

        let now = Instant::now();
        if let Some(cycler) = &mut cycler {
            cycler.tick(&mut animator, now);
        }
        animator.tick();
        if let Some(e) = animator.slot_mut().take_error() {
            return Err(e).context("drawing frame");
        }
        next_frame = (next_frame + interval).max(now);
    }
    tracing::debug!(text = %animator.slot().current_text(), "leaving demo");
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Command::Dump { .. }) => LogTarget::Stderr,
        (None, Command::Play { .. }) => LogTarget::Disabled,
    };
    logging::init(cli.verbose, target).context("initializing logging")?;

    let config = Config::resolve(cli.config.as_deref())?;
    let rng = make_rng(cli.seed);
    match cli.command {
        Command::Play { cycle } => play(&config, rng, cycle),
        Command::Dump { from, to, markup } => dump(&config, rng, &from, &to, markup),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
