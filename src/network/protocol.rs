//! Arbiter wire format.
//!
//! Arbiter → engine: one colour byte (`'1'` black, `'2'` white) at game
//! start, then commands framed as a two-digit ASCII length followed by the
//! payload (`gen_move`, `play_move <rc|pass>`, `game_over`).
//! Engine → arbiter: the reply to `gen_move`, as `"rc\n"` or `"pass\n"`,
//! unframed.

use crate::core::{Action, Color};
use crate::error::EngineError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const GEN_MOVE: &str = "gen_move";
pub const PLAY_MOVE: &str = "play_move";
pub const GAME_OVER: &str = "game_over";

/// Largest payload a two-digit length prefix can carry.
pub const MAX_FRAME: usize = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GenMove,
    PlayMove(Action),
    GameOver,
    Unknown(String),
}

impl Command {
    pub fn parse(payload: &str) -> Result<Command, EngineError> {
        let mut parts = payload.split_whitespace();
        match parts.next() {
            Some(GEN_MOVE) => Ok(Command::GenMove),
            Some(GAME_OVER) => Ok(Command::GameOver),
            Some(PLAY_MOVE) => {
                let arg = parts.next().ok_or_else(|| {
                    EngineError::ProtocolViolation("play_move without a move".to_string())
                })?;
                Ok(Command::PlayMove(Action::from_notation(arg)?))
            }
            Some(other) => Ok(Command::Unknown(other.to_string())),
            None => Err(EngineError::ProtocolViolation("empty command".to_string())),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Command::GenMove => GEN_MOVE.to_string(),
            Command::PlayMove(action) => format!("{} {}", PLAY_MOVE, action.to_notation()),
            Command::GameOver => GAME_OVER.to_string(),
            Command::Unknown(s) => s.clone(),
        }
    }
}

pub fn colour_byte(color: Color) -> u8 {
    b'0' + color.to_wire()
}

pub fn parse_colour_byte(byte: u8) -> Result<Color, EngineError> {
    if !byte.is_ascii_digit() {
        return Err(EngineError::InvalidPlayer(byte));
    }
    Color::from_wire(byte - b'0')
}

pub async fn read_colour<R: AsyncRead + Unpin>(reader: &mut R) -> anyhow::Result<Color> {
    let byte = reader.read_u8().await?;
    Ok(parse_colour_byte(byte)?)
}

pub async fn read_command<R: AsyncRead + Unpin>(reader: &mut R) -> anyhow::Result<Command> {
    let mut len_buf = [0u8; 2];
    reader.read_exact(&mut len_buf).await?;
    let len: usize = std::str::from_utf8(&len_buf)?.trim().parse().map_err(|_| {
        EngineError::ProtocolViolation(format!("bad length prefix {:?}", len_buf))
    })?;

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    let payload = String::from_utf8(payload)?;
    Ok(Command::parse(&payload)?)
}

pub async fn write_command<W: AsyncWrite + Unpin>(writer: &mut W, cmd: &Command) -> anyhow::Result<()> {
    let payload = cmd.encode();
    if payload.len() > MAX_FRAME {
        anyhow::bail!("command too long for a two-digit frame: {}", payload);
    }
    writer
        .write_all(format!("{:02}{}", payload.len(), payload).as_bytes())
        .await?;
    writer.flush().await?;
    Ok(())
}

pub async fn write_reply<W: AsyncWrite + Unpin>(writer: &mut W, action: Action) -> anyhow::Result<()> {
    writer
        .write_all(format!("{}\n", action.to_notation()).as_bytes())
        .await?;
    writer.flush().await?;
    Ok(())
}

pub fn parse_reply(line: &str) -> Result<Action, EngineError> {
    Action::from_notation(line.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("gen_move"), Ok(Command::GenMove));
        assert_eq!(Command::parse("game_over"), Ok(Command::GameOver));
        assert_eq!(
            Command::parse("play_move 45"),
            Ok(Command::PlayMove(Action::Play(Move::from_notation("45").unwrap())))
        );
        assert_eq!(Command::parse("play_move pass"), Ok(Command::PlayMove(Action::Pass)));
        assert_eq!(Command::parse("hello"), Ok(Command::Unknown("hello".to_string())));
        assert!(Command::parse("play_move").is_err());
        assert!(Command::parse("play_move 9x").is_err());
        assert!(Command::parse("").is_err());
    }

    #[test]
    fn test_colour_byte() {
        assert_eq!(parse_colour_byte(b'1'), Ok(Color::Black));
        assert_eq!(parse_colour_byte(b'2'), Ok(Color::White));
        assert_eq!(parse_colour_byte(b'0'), Err(EngineError::InvalidPlayer(0)));
        assert_eq!(colour_byte(Color::White), b'2');
    }

    #[tokio::test]
    async fn test_framing_over_a_pipe() {
        let (mut client, mut server) = tokio::io::duplex(64);
        write_command(&mut server, &Command::PlayMove(Action::Pass)).await.unwrap();
        write_command(&mut server, &Command::GenMove).await.unwrap();
        assert_eq!(
            read_command(&mut client).await.unwrap(),
            Command::PlayMove(Action::Pass)
        );
        assert_eq!(read_command(&mut client).await.unwrap(), Command::GenMove);

        write_reply(&mut client, Action::Play(Move::from_notation("23").unwrap()))
            .await
            .unwrap();
        let mut buf = [0u8; 3];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"23\n");
        assert_eq!(
            parse_reply("23\n").unwrap(),
            Action::Play(Move::from_notation("23").unwrap())
        );
    }
}
