//! Detective Quest: The Manor Mystery
//!
//! Walk the manor, collect clues, and accuse the culprit.

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use detective_quest::config::Settings;
use detective_quest::tui::App;
use detective_quest::Game;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use tracing::info;

fn main() -> detective_quest::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    settings.init_logging().context("setting up logging")?;
    info!(version = detective_quest::VERSION, "detective-quest starting");

    let scenario = settings.scenario().context("loading scenario")?;
    let game = Game::new(&scenario).context("building the manor")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let outcome = run(&mut terminal, &mut app);

    // Cleanup, even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    if let Some(verdict) = app.game.verdict() {
        println!("\n{}: {}", verdict.headline(), verdict.summary());
    }
    println!("\n═══════════════════════════════════════════════");
    println!("  Thanks for playing Detective Quest!");
    println!("═══════════════════════════════════════════════\n");

    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> std::io::Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
