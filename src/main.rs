use color_eyre::Result;
use nimbus_tui::{
    api::WeatherClient,
    app::App,
    config::Config,
    events::{Event, EventHandler},
    logging, ui,
    worker::Worker,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Instant};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let config = Config::load();
    let _log_guard = logging::initialize_logging(&config.ui.log_dir);
    color_eyre::install()?;
    install_panic_hook();

    if config.api.key.is_empty() {
        warn!(
            "No API key configured; set [api].key in config.toml or {}",
            nimbus_tui::config::API_KEY_ENV
        );
    }

    let client = WeatherClient::new(&config.api)?;
    let route_arg = std::env::args().nth(1);

    // Ready terminal and state
    let mut terminal = setup_terminal()?;
    let mut app = App::new(&config);
    let mut events = EventHandler::new(config.ui.tick_rate_ms);
    let worker = Worker::new(client, config.location.clone(), events.tx.clone());

    let route = App::initial_route(&config, route_arg.as_deref());
    info!("Starting on route {}", route);
    worker.spawn_all(app.navigate(route));

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(event) = events.next().await {
            let commands = match event {
                Event::Tick => app.on_tick(Instant::now()),
                Event::Input(key) => app.handle_key(key, Instant::now()),
                Event::Located { generation, at } => app.located(generation, at),
                Event::Weather { generation, stage } => app.apply_stage(generation, stage),
                Event::WeatherDone { generation } => {
                    app.weather_done(generation);
                    Vec::new()
                }
                Event::WeatherFailed {
                    generation,
                    message,
                } => {
                    app.weather_failed(generation, message);
                    Vec::new()
                }
                Event::PlaceResolved { generation, name } => {
                    app.place_resolved(generation, name);
                    Vec::new()
                }
                Event::SearchResults { id, results } => {
                    app.search_results(id, results);
                    Vec::new()
                }
            };
            worker.spawn_all(commands);
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen, crossterm::cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Force terminal cleanup!
        crossterm::terminal::disable_raw_mode().ok();
        crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show).ok();
        original_hook(panic_info);
    }));
}
