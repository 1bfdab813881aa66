use crate::core::{Action, Color};
use crate::game::{Game, GameSummary};
use crate::network::protocol::{colour_byte, parse_reply, write_command, Command};
use crate::player::{PlayerController, RandomAI};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;

#[derive(Debug, Clone, Default)]
pub struct ArbiterConfig {
    /// White is played in-process by a random player instead of a second
    /// connection.
    pub house_random: bool,
    pub seed: Option<u64>,
}

enum Seat {
    Remote {
        peer: String,
        reader: BufReader<OwnedReadHalf>,
        writer: OwnedWriteHalf,
    },
    House(RandomAI),
}

impl Seat {
    fn name(&self) -> &str {
        match self {
            Seat::Remote { peer, .. } => peer,
            Seat::House(ai) => ai.name(),
        }
    }

    /// 手番のプレイヤーから一手を受け取る
    async fn request(&mut self, game: &Game) -> anyhow::Result<Action> {
        match self {
            Seat::Remote { reader, writer, .. } => {
                write_command(writer, &Command::GenMove).await?;
                let mut line = String::new();
                if reader.read_line(&mut line).await? == 0 {
                    anyhow::bail!("connection closed");
                }
                Ok(parse_reply(&line)?)
            }
            Seat::House(ai) => ai.choose_move(&game.board, game.current_player),
        }
    }

    async fn notify(&mut self, cmd: &Command) -> anyhow::Result<()> {
        if let Seat::Remote { writer, .. } = self {
            write_command(writer, cmd).await?;
        }
        Ok(())
    }
}

async fn accept_seat(listener: &TcpListener, color: Color) -> anyhow::Result<Seat> {
    let (socket, addr) = listener.accept().await?;
    let (reader, mut writer) = socket.into_split();
    writer.write_all(&[colour_byte(color)]).await?;
    writer.flush().await?;
    log::info!("{} seated as {}", addr, color);
    Ok(Seat::Remote {
        peer: addr.to_string(),
        reader: BufReader::new(reader),
        writer,
    })
}

/// Referees one game between the engines connecting to `listener`.
///
/// The first connection plays black. A seat that sends an unparsable or
/// illegal reply, or hangs up, forfeits.
pub async fn run_arbiter(listener: TcpListener, config: ArbiterConfig) -> anyhow::Result<GameSummary> {
    log::info!("arbiter listening on {}", listener.local_addr()?);

    let black = accept_seat(&listener, Color::Black).await?;
    let white = if config.house_random {
        Seat::House(match config.seed {
            Some(seed) => RandomAI::with_seed("house", seed),
            None => RandomAI::new("house"),
        })
    } else {
        accept_seat(&listener, Color::White).await?
    };
    let mut seats = [black, white];

    let mut game = Game::default();
    let mut forfeit = None;
    while !game.is_over() {
        let color = game.current_player;
        let (mover, other) = match color {
            Color::Black => (0, 1),
            Color::White => (1, 0),
        };

        let action = match seats[mover].request(&game).await {
            Ok(action) => action,
            Err(e) => {
                forfeit = Some((color, e.to_string()));
                break;
            }
        };
        if let Err(e) = game.play(action) {
            forfeit = Some((color, e.to_string()));
            break;
        }
        log::info!("{} ({}) played {}", seats[mover].name(), color, action);
        log::debug!("\n{}", game.board);

        if let Err(e) = seats[other].notify(&Command::PlayMove(action)).await {
            forfeit = Some((color.opponent(), e.to_string()));
            break;
        }
    }

    for seat in seats.iter_mut() {
        if let Err(e) = seat.notify(&Command::GameOver).await {
            log::warn!("could not tell {} the game is over: {}", seat.name(), e);
        }
    }

    let summary = game.summary(forfeit);
    match (&summary.winner, &summary.forfeit) {
        (_, Some(reason)) => log::warn!("{}", reason),
        (Some(winner), None) => log::info!(
            "{} wins {}-{}",
            winner,
            summary.black_discs.max(summary.white_discs),
            summary.black_discs.min(summary.white_discs)
        ),
        (None, None) => log::info!("draw {}-{}", summary.black_discs, summary.white_discs),
    }
    Ok(summary)
}
