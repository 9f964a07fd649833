use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_blokus::prelude::*;

fn main() -> Result<()> {
    // Initialize program options and environment.
    dotenvy::dotenv().ok();
    let options = DuoServerOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(
            match cfg!(debug_assertions) {
                true => AdaptiveFormat::WithThread,
                _    => AdaptiveFormat::Default
            })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    let config = options.agent_config();
    let replay = options.replay.as_deref().map(ReplayLog::open).transpose()?;
    let catalog: &'static PieceCatalog = Box::leak(Box::new(PieceCatalog::new()));

    let result = match options.selfplay {
        true  => self_play(&config, catalog, replay),
        false => {
            let mut server = DuoServer::new(&config, catalog);
            if let Some(replay) = replay {
                server = server.with_replay(replay);
            }
            server.run()
        },
    };

    if let Err(e) = &result {
        log::error!("fatal error: {e:#}");
    }
    result
}

/// Plays one game between the two configured players and prints the final board and result.
fn self_play(config: &AgentConfig, catalog: &'static PieceCatalog, replay: Option<ReplayLog>) -> Result<()> {
    let mut controller = GameController::new(catalog, config.get_policies());
    if let Some(replay) = replay {
        controller = controller.with_replay(replay);
    }

    log::info!("self-play: {:?} against {:?}", config.players[0], config.players[1]);
    let outcome = controller.run()?;
    println!("{}", controller.snapshot().board().pretty());
    println!("{outcome}");
    Ok(())
}
