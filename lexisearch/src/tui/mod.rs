mod app;
mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppEvents};

use crate::controller::{DefinitionSource, SearchController};
use crate::recent::RecentStore;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Runs the interactive UI until the user quits.
pub async fn run<S, D>(controller: SearchController<S>, source: Arc<D>) -> anyhow::Result<()>
where
    S: RecentStore,
    D: DefinitionSource + Send + Sync + 'static,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut app, events) = App::new(controller, source);

    let result = run_loop(&mut terminal, &mut app, events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<S, D>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S, D>,
    mut events: AppEvents,
) -> anyhow::Result<()>
where
    S: RecentStore,
    D: DefinitionSource + Send + Sync + 'static,
{
    let mut input = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);

    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            event = input.next() => match event {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(error)) => return Err(error.into()),
                None => break,
            },
            Some(fired) = events.debounce.recv() => app.on_debounce(fired),
            Some(completed) = events.completed.recv() => app.on_completed(completed).await,
            _ = tick.tick() => app.on_tick(),
        }
    }

    Ok(())
}
