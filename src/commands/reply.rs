//! Structured command replies.
//!
//! Each `Reply` carries the data a chat adapter needs to render rich
//! output. The `Display` impl gives a plain-text rendering.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::command::{LifeChange, OPENING_HAND_SIZE};
use super::dice::{CoinFlips, DiceRoll, DiceSpec};
use crate::rules::{LossReason, LETHAL_COMMANDER_DAMAGE, LETHAL_POISON};
use crate::session::{Phase, SessionSnapshot};

/// A player eliminated by the command, and the winner if that ended it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub player: String,
    pub reason: LossReason,
    pub winner: Option<String>,
}

/// Successful command result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Started {
        host: String,
        starting_life: i64,
        max_players: usize,
    },
    Joined {
        player: String,
        players: Vec<String>,
        max_players: usize,
        /// Enough players to begin and the game has not begun.
        ready: bool,
    },
    Begun {
        /// (display name, life) in join order.
        players: Vec<(String, i64)>,
    },
    Left {
        player: String,
        /// The roster emptied and the game was discarded.
        game_ended: bool,
    },
    Ended,
    Status(SessionSnapshot),
    LifeChanged {
        player: String,
        change: LifeChange,
        life: i64,
        elimination: Option<Elimination>,
    },
    CommanderDamage {
        attacker: String,
        defender: String,
        amount: i64,
        total: i64,
        elimination: Option<Elimination>,
    },
    CounterChanged {
        player: String,
        counter: String,
        count: i64,
        elimination: Option<Elimination>,
    },
    CountersReset {
        player: String,
        /// `None` when every counter was cleared.
        counter: Option<String>,
    },
    Rolled {
        player: String,
        spec: DiceSpec,
        roll: DiceRoll,
    },
    Flipped {
        player: String,
        flips: CoinFlips,
    },
    Mulligan {
        player: String,
        cards: i64,
    },
}

impl Reply {
    /// The elimination this reply announces, if any.
    #[must_use]
    pub fn elimination(&self) -> Option<&Elimination> {
        match self {
            Reply::LifeChanged { elimination, .. }
            | Reply::CommanderDamage { elimination, .. }
            | Reply::CounterChanged { elimination, .. } => elimination.as_ref(),
            _ => None,
        }
    }
}

impl Display for Elimination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\n💀 {} has been eliminated! ({})", self.player, self.reason)?;
        if let Some(winner) = &self.winner {
            write!(f, "\n🏆 {} wins the game!", winner)?;
        }
        Ok(())
    }
}

fn write_elimination(f: &mut Formatter<'_>, elimination: &Option<Elimination>) -> fmt::Result {
    match elimination {
        Some(e) => write!(f, "{}", e),
        None => Ok(()),
    }
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Started { host, starting_life, max_players } => write!(
                f,
                "Commander game started by {}. Starting life: {} | Players: 1/{}",
                host, starting_life, max_players
            ),
            Reply::Joined { player, players, max_players, ready } => {
                write!(f, "{} joined the game. Players ({}/{}):", player, players.len(), max_players)?;
                for (i, name) in players.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, name)?;
                }
                if *ready {
                    write!(f, "\nReady to begin! Begin the game, or wait for more players.")?;
                }
                Ok(())
            }
            Reply::Begun { players } => {
                write!(f, "The Commander game has started!")?;
                for (name, life) in players {
                    write!(f, "\n{}: {} life", name, life)?;
                }
                Ok(())
            }
            Reply::Left { player, game_ended } => {
                write!(f, "{} left the game.", player)?;
                if *game_ended {
                    write!(f, "\nGame ended - no players remaining.")?;
                }
                Ok(())
            }
            Reply::Ended => write!(f, "Game ended."),
            Reply::Status(snapshot) => write_status(f, snapshot),
            Reply::LifeChanged { player, change, life, elimination } => {
                match change {
                    LifeChange::Relative(delta) => {
                        let action = if *delta > 0 { "gained" } else { "lost" };
                        write!(f, "{} {} {} life. Now at {} life.", player, action, delta.unsigned_abs(), life)?;
                    }
                    LifeChange::Set(_) => write!(f, "{} set life to {}.", player, life)?,
                }
                write_elimination(f, elimination)
            }
            Reply::CommanderDamage { attacker, defender, amount, total, elimination } => {
                write!(
                    f,
                    "⚔️ {} dealt {} commander damage to {}! (Total: {}/{})",
                    attacker, amount, defender, total, LETHAL_COMMANDER_DAMAGE
                )?;
                write_elimination(f, elimination)
            }
            Reply::CounterChanged { player, counter, count, elimination } => {
                write!(f, "{} now has {} {} counter{}", player, count, counter, plural(*count))?;
                if counter == crate::rules::POISON_COUNTER && *count >= LETHAL_POISON {
                    write!(f, "\n⚠️ {} or more poison counters!", LETHAL_POISON)?;
                }
                write_elimination(f, elimination)
            }
            Reply::CountersReset { player, counter } => match counter {
                Some(name) => write!(f, "Reset {} counters for {}", name, player),
                None => write!(f, "Reset all counters for {}", player),
            },
            Reply::Rolled { player, spec, roll } => {
                write!(f, "🎲 {} rolled {}: {}", player, spec, roll)
            }
            Reply::Flipped { player, flips } => {
                let n = flips.results.len();
                write!(f, "🪙 {} flipped {} coin{}: {}", player, n, plural(n as i64), flips)
            }
            Reply::Mulligan { player, cards } => {
                write!(f, "🔄 {} mulliganed to {} card{}", player, cards, plural(*cards))?;
                if *cards < OPENING_HAND_SIZE {
                    write!(f, "\nDon't forget to scry 1 if you mulliganed! (Free mulligan if first)")?;
                }
                Ok(())
            }
        }
    }
}

fn write_status(f: &mut Formatter<'_>, snapshot: &SessionSnapshot) -> fmt::Result {
    let phase = match snapshot.phase {
        Phase::Forming => "forming",
        Phase::Active => "in progress",
        Phase::Ended => "ended",
    };
    write!(f, "Commander Game Status ({})", phase)?;

    for player in &snapshot.players {
        write!(f, "\n{}: Life {}", player.display_name, player.life)?;
        if !player.commander_damage.is_empty() {
            let damage: Vec<String> = player
                .commander_damage
                .iter()
                .map(|d| format!("{}: {}", d.from_name, d.amount))
                .collect();
            write!(f, " | Commander Damage: {}", damage.join(", "))?;
        }
        if !player.counters.is_empty() {
            let counters: Vec<String> = player
                .counters
                .iter()
                .map(|(name, count)| format!("{}: {}", name, count))
                .collect();
            write!(f, " | Counters: {}", counters.join(", "))?;
        }
        if player.eliminated.is_some() {
            write!(f, " | 💀 ELIMINATED")?;
        }
    }

    if let Some(winner) = snapshot.winner.and_then(|id| snapshot.player(id)) {
        write!(f, "\n🏆 {} is the last player standing!", winner.display_name)?;
    }
    Ok(())
}
