mod alert;
mod events;
mod state;
mod ui;

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use netwatch::{Coordinator, Probe, Registry, Transition};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use state::BoardState;

/// Poll both registries and draw their status until the user quits
pub async fn run_status_board(
    servers: Registry,
    websites: Registry,
    server_probe: Arc<dyn Probe>,
    website_probe: Arc<dyn Probe>,
    tick: Duration,
    buffer: usize,
) -> Result<()> {
    let mut state = BoardState::new(&servers, &websites);

    let (tx, mut rx) = mpsc::channel(buffer);
    let server_pool = Coordinator::start(&servers, server_probe, tick, tx.clone());
    let website_pool = Coordinator::start(&websites, website_probe, tick, tx);

    // Init terminal in alternate screen
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = draw_loop(&mut stdout, &mut state, &mut rx).await;

    // Cleanup terminal
    let exec_result = execute!(stdout, Show, LeaveAlternateScreen);
    let raw_mode_result = disable_raw_mode();

    tracing::info!("Status board closed, stopping poll loops");
    Coordinator::shutdown_all([server_pool, website_pool]).await;

    result?;
    exec_result.and(raw_mode_result)?;
    Ok(())
}

async fn draw_loop(
    stdout: &mut Stdout,
    state: &mut BoardState,
    rx: &mut mpsc::Receiver<Transition>,
) -> Result<()> {
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        // Drain transitions (non-blocking)
        while let Ok(transition) = rx.try_recv() {
            tracing::info!(%transition, "Status change");
            if state.apply(transition) {
                alert::ring();
            }
        }

        terminal.draw(|f| ui::render(f, state))?;

        // Poll for events
        if event::poll(Duration::from_millis(250))? && events::handle_event(event::read()?) {
            return Ok(());
        }
    }
}
