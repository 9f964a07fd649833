mod options;

use std::{io::BufRead, time::Duration};

use itertools::Itertools;
pub use options::DuoServerOptions;

use crate::prelude::*;

/// A line-based text server over one game. Every command prints its reply, then `ok`; a failed command prints
/// `err` and the reason first.
pub struct DuoServer {
    controller: GameController<'static>,
    engine: Box<dyn Strategy>,
    catalog: &'static PieceCatalog,
    started: bool,
}

impl DuoServer {
    /// Produces a new server with the given engine configuration. Both sides are played through commands.
    pub fn new(config: &AgentConfig, catalog: &'static PieceCatalog) -> DuoServer {
        DuoServer {
            controller: GameController::new(catalog, [None, None]),
            engine: config.get_engine(),
            catalog,
            started: false,
        }
    }

    /// Logs a board snapshot after every ply.
    pub fn with_replay(mut self, replay: ReplayLog) -> DuoServer {
        self.controller = self.controller.with_replay(replay);
        self
    }

    /// Serves commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim() == "quit" {
                break;
            }

            match self.execute(&line) {
                Ok(reply) => {
                    log::debug!("Command completed successfully: {}", line.trim());
                    if !reply.is_empty() {
                        println!("{reply}");
                    }
                },
                Err(err) => {
                    log::warn!("encountered recoverable error:\n{err:#}");
                    println!("err\n{err:#}");
                },
            }
            println!("ok");
        }
        Ok(())
    }

    /// Runs one command line and returns its reply.
    pub fn execute(&mut self, line: &str) -> Result<String> {
        let args = line.split_whitespace().collect::<Vec<&str>>();
        let Some((&cmd, args)) = args.split_first() else {
            return Ok(String::new());
        };

        match cmd {
            "bestmove"   => self.best_move(args),
            "board"      => self.board(),
            "info"       => Ok(self.info()),
            "newgame"    => self.new_game(args),
            "pass"       => self.pass(),
            "pieces"     => self.pieces(args),
            "play"       => self.play_move(args),
            "score"      => self.score(),
            "undo"       => self.undo_move(),
            "validmoves" => self.valid_moves(),
            _            => Err(anyhow!("unrecognized command {cmd}")),
        }
    }

    fn best_move(&mut self, args: &[&str]) -> Result<String> {
        self.ensure_started()?;

        if args.len() >= 2 {
            match args[0] {
                "depth" => {
                    let depth = args[1].parse::<u8>()?;
                    if depth == 0 {
                        return Err(anyhow!("search depth must be at least 1"));
                    }
                    self.engine.set_max_depth(depth);
                },
                "time"  => {
                    let time = parse_hhmmss(args[1])?;
                    self.engine.set_timeout(Some(time));
                },
                _       => { return Err(anyhow!("unrecognized search option {}", args[0])); }
            };
        }

        let position = self.controller.snapshot();
        if position.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        Ok(self.engine.choose_move(position).map_or("pass".into(), |mv| mv.notate()))
    }

    fn board(&self) -> Result<String> {
        self.ensure_started()?;
        Ok(self.controller.snapshot().board().pretty())
    }

    /// Starts a new game, potentially from an advanced position (i.e. with a setup or a move history).
    fn new_game(&mut self, args: &[&str]) -> Result<String> {
        match args.is_empty() {
            true  => self.controller.reset(),
            false => {
                let game = args.join(" ").parse::<GameString>()?;
                if let Err(e) = self.controller.load(&game) {
                    self.controller.reset();
                    return Err(e);
                }
            },
        };
        self.started = true;
        Ok(self.status())
    }

    fn pass(&mut self) -> Result<String> {
        self.ensure_started()?;
        self.controller.pass()?;
        Ok(self.status())
    }

    /// Lists the unplaced pieces of a player, or of the player to move, with their drawn orientations.
    fn pieces(&self, args: &[&str]) -> Result<String> {
        self.ensure_started()?;
        let player = match args.first() {
            Some(s) => Player::parse(s)?.ok_or(anyhow!("expected a player, received {s}"))?,
            None    => self.controller.snapshot().player_to_move(),
        };
        Ok(self.controller.snapshot().player(player).pool().iter().map(|&id| self.catalog.notate(id)).join("\n\n"))
    }

    fn play_move(&mut self, args: &[&str]) -> Result<String> {
        self.ensure_started()?;
        let Some(arg) = args.first() else {
            return Err(anyhow!("no move provided"));
        };

        let player = self.controller.snapshot().player_to_move();
        match arg.parse::<MoveString>()?.request {
            Some(request) => {
                let mv = self.controller.try_apply(player, request)?;
                log::debug!("{player} plays {mv}");
            },
            None => self.controller.pass()?,
        };
        Ok(self.status())
    }

    fn score(&self) -> Result<String> {
        self.ensure_started()?;
        let position = self.controller.snapshot();
        let [one, two] = Player::all().map(|p| position.remaining_squares(p));
        Ok(format!("{} {one} {two} {}", position.score(), self.controller.outcome()))
    }

    fn undo_move(&mut self) -> Result<String> {
        self.ensure_started()?;
        self.controller.undo()?;
        Ok(self.status())
    }

    fn valid_moves(&self) -> Result<String> {
        self.ensure_started()?;
        let moves = self.controller.snapshot().legal_moves();
        Ok(format!("{}\n{}", moves.len(), moves.iter().map(|mv| mv.notate()).join("; ")))
    }

    /// The setup string of the current board and whose turn it is, or the result once the game has ended.
    fn status(&self) -> String {
        let position = self.controller.snapshot();
        let state = match position.is_terminal() {
            true  => format!("over; {}", self.controller.outcome()),
            false => format!("{} to move", position.player_to_move().notate()),
        };
        format!("{}\n{state}", position.board().notate())
    }

    fn ensure_started(&self) -> Result<()> {
        match self.started {
            true  => Ok(()),
            false => Err(anyhow!("no game in progress")),
        }
    }

    /// Identifies the server.
    fn info(&self) -> String {
        format!("id {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

fn parse_hhmmss(time: &str) -> Result<Duration> {
    let mut toks = time.split(':');
    let hours = toks.next().unwrap_or("").parse::<u64>()?;
    let minutes = toks.next().unwrap_or("").parse::<u64>()?;
    let seconds = toks.next().unwrap_or("").parse::<u64>()?;
    let total = hours.checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or(anyhow!("time {time} is out of range"))?;
    Ok(Duration::from_secs(total))
}
