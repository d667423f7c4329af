//! Slash-command parsing for the lobby prompt.
//!
//! Anything that is not a recognized command is treated as a chat
//! message to the current room.

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/rooms`: request a fresh lobby list
    Rooms,
    /// `/create <title> <maxPlayers> <stageId>`
    Create {
        title: String,
        max_players: usize,
        stage_id: String,
    },
    /// `/join <roomId>`
    Join { room_id: String },
    /// `/leave`
    Leave,
    /// `/ready`
    Ready,
    /// `/start`
    Start,
    /// `/emote <emoteId>`
    Emote { emote_id: String },
    /// `/help`
    Help,
    /// Plain text: chat to the current room
    Chat(String),
    /// Unrecognized or malformed slash command
    Invalid(String),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if !line.starts_with('/') {
        return Command::Chat(line.to_string());
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    match head {
        "/rooms" => Command::Rooms,
        "/create" => {
            let rest: Vec<&str> = parts.collect();
            // Title may contain spaces; capacity and stage come last
            if rest.len() < 3 {
                return Command::Invalid(
                    "usage: /create <title> <maxPlayers> <stageId>".to_string(),
                );
            }
            let stage_id = rest[rest.len() - 1].to_string();
            let max_players = match rest[rest.len() - 2].parse::<usize>() {
                Ok(n) => n,
                Err(_) => {
                    return Command::Invalid(
                        "usage: /create <title> <maxPlayers> <stageId>".to_string(),
                    );
                }
            };
            let title = rest[..rest.len() - 2].join(" ");
            Command::Create {
                title,
                max_players,
                stage_id,
            }
        }
        "/join" => match parts.next() {
            Some(room_id) => Command::Join {
                room_id: room_id.to_string(),
            },
            None => Command::Invalid("usage: /join <roomId>".to_string()),
        },
        "/leave" => Command::Leave,
        "/ready" => Command::Ready,
        "/start" => Command::Start,
        "/emote" => match parts.next() {
            Some(emote_id) => Command::Emote {
                emote_id: emote_id.to_string(),
            },
            None => Command::Invalid("usage: /emote <emoteId>".to_string()),
        },
        "/help" => Command::Help,
        other => Command::Invalid(format!("unknown command: {}", other)),
    }
}

/// Help text shown for `/help` and invalid input.
pub const HELP_TEXT: &str = "\
Commands:
  /rooms                               list open rooms
  /create <title> <maxPlayers> <stage> create a room and become host
  /join <roomId>                       join a room as guest
  /leave                               leave the current room
  /ready                               toggle your ready flag
  /start                               start the game (host only)
  /emote <emoteId>                     send an emote
  <text>                               chat to the current room
";
