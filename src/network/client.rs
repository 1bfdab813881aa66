use crate::cluster::Scheduler;
use crate::network::protocol::{read_colour, read_command, write_reply, Command};
use std::time::Duration;
use tokio::io::BufReader;
use tokio::net::TcpStream;

/// How a session with the arbiter ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver,
    /// I/O or engine failure; the game was shut down anyway.
    Aborted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub moves_sent: usize,
}

/// Connection to an external arbiter, driving one game with a scheduler.
///
/// Searches run inside `block_in_place`, so the session needs the
/// multi-threaded tokio runtime.
pub struct ArbiterSession {
    stream: TcpStream,
    scheduler: Scheduler,
    time_limit: Duration,
}

impl ArbiterSession {
    pub async fn connect(
        addr: &str,
        scheduler: Scheduler,
        time_limit: Duration,
    ) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        log::info!("connected to arbiter at {}", addr);
        Ok(Self::new(stream, scheduler, time_limit))
    }

    pub fn new(stream: TcpStream, scheduler: Scheduler, time_limit: Duration) -> Self {
        Self {
            stream,
            scheduler,
            time_limit,
        }
    }

    /// Plays until `game_over` or the first failure, then always releases
    /// the workers.
    pub async fn run(mut self) -> SessionReport {
        // The limit is advisory: searches are never preempted.
        log::info!("time limit {:?} (not enforced)", self.time_limit);

        let mut moves_sent = 0;
        let end = match serve(&mut self.stream, &mut self.scheduler, &mut moves_sent).await {
            Ok(()) => {
                log::info!("game over");
                SessionEnd::GameOver
            }
            Err(e) => {
                log::error!("session aborted: {:#}", e);
                SessionEnd::Aborted(e.to_string())
            }
        };
        log::info!("final board\n{}", self.scheduler.board());
        self.scheduler.shutdown();
        SessionReport { end, moves_sent }
    }
}

async fn serve(
    stream: &mut TcpStream,
    scheduler: &mut Scheduler,
    moves_sent: &mut usize,
) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);

    let color = read_colour(&mut reader).await?;
    scheduler.begin(color)?;
    log::debug!("\n{}", scheduler.board());

    loop {
        match read_command(&mut reader).await? {
            Command::GenMove => {
                let action = tokio::task::block_in_place(|| scheduler.choose_move())?;
                write_reply(&mut writer, action).await?;
                *moves_sent += 1;
            }
            Command::PlayMove(action) => {
                log::info!("opponent played {}", action);
                scheduler.play_opponent(action)?;
            }
            Command::GameOver => return Ok(()),
            Command::Unknown(cmd) => {
                log::warn!("ignoring unknown command {:?}", cmd);
                continue;
            }
        }
        log::debug!("\n{}", scheduler.board());
    }
}
