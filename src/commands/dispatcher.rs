//! Command dispatch.
//!
//! `CommandDispatcher` owns the session registry and the dice RNG. Hosts
//! call `dispatch` once per inbound command and render the result.
//!
//! Sessions are created only by `Start` and deleted by `End` or when the
//! last player leaves. Other commands never create a session.
//!
//! The dispatcher takes `&mut self` and does no locking. Hosts that
//! handle channels concurrently must serialise access, for instance
//! behind a `Mutex`.

use super::command::{Command, Invocation, LifeChange, OPENING_HAND_SIZE};
use super::dice::{flip_coins, DiceSpec};
use super::reply::{Elimination, Reply};
use crate::core::{GameConfig, GameRng, PlayerId};
use crate::error::{CommandError, ConfigError};
use crate::rules::GameResult;
use crate::session::{Phase, Session, SessionRegistry};

/// Maps commands onto sessions.
///
/// ## Example
///
/// ```
/// use commander_tracker::commands::{Command, CommandDispatcher, Invocation, LifeChange};
/// use commander_tracker::core::{ChannelId, GameConfig, GameRng, PlayerId};
///
/// let mut bot = CommandDispatcher::with_rng(GameConfig::default(), GameRng::new(1)).unwrap();
/// let channel = ChannelId::new(10);
/// let alice = Invocation::new(channel, PlayerId::new(1), "Alice");
/// let bob = Invocation::new(channel, PlayerId::new(2), "Bob");
///
/// bot.dispatch(&alice, Command::Start).unwrap();
/// bot.dispatch(&bob, Command::Join).unwrap();
/// bot.dispatch(&alice, Command::Begin).unwrap();
///
/// let reply = bot.dispatch(&bob, Command::Life(LifeChange::Set(0))).unwrap();
/// assert_eq!(reply.elimination().unwrap().winner.as_deref(), Some("Alice"));
/// ```
#[derive(Debug)]
pub struct CommandDispatcher {
    registry: SessionRegistry,
    rng: GameRng,
}

impl CommandDispatcher {
    /// Create a dispatcher with an entropy-seeded RNG.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create a dispatcher with a specific RNG. Fails if `config` does not
    /// validate.
    pub fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        Ok(Self {
            registry: SessionRegistry::new(config)?,
            rng,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Handle one command.
    pub fn dispatch(&mut self, inv: &Invocation, command: Command) -> Result<Reply, CommandError> {
        tracing::debug!(channel = %inv.channel, actor = %inv.actor, ?command, "dispatching command");

        let result = match command {
            Command::Start => self.start(inv),
            Command::Join => self.join(inv),
            Command::Begin => self.begin(inv),
            Command::Leave => self.leave(inv),
            Command::End => self.end(inv),
            Command::Status => self.status(inv),
            Command::Life(change) => self.life(inv, change),
            Command::CommanderDamage { target, amount } => self.commander_damage(inv, target, amount),
            Command::Counter { name, amount } => self.counter(inv, &name, amount),
            Command::ResetCounters { name } => self.reset_counters(inv, name.as_deref()),
            Command::Roll(spec) => Ok(self.roll(inv, spec)),
            Command::Flip { times } => self.flip(inv, times),
            Command::Mulligan { cards } => mulligan(inv, cards),
        };

        if let Err(err) = &result {
            tracing::debug!(channel = %inv.channel, actor = %inv.actor, %err, "command rejected");
        }
        result
    }

    // === Lifecycle ===

    fn start(&mut self, inv: &Invocation) -> Result<Reply, CommandError> {
        if self
            .registry
            .get(inv.channel)
            .is_some_and(|s| s.phase() == Phase::Active)
        {
            return Err(CommandError::GameInProgress);
        }

        let mut session = self.registry.new_session(inv.channel);
        session.try_add_player(inv.actor, inv.display_name.clone())?;
        let session = self.registry.replace(session);

        Ok(Reply::Started {
            host: inv.display_name.clone(),
            starting_life: session.config().starting_life,
            max_players: session.config().max_players,
        })
    }

    fn join(&mut self, inv: &Invocation) -> Result<Reply, CommandError> {
        let session = self
            .registry
            .get_mut(inv.channel)
            .filter(|s| s.player_count() > 0)
            .ok_or(CommandError::NoGame)?;

        session.try_add_player(inv.actor, inv.display_name.clone())?;

        let min_players = session.config().min_players;
        Ok(Reply::Joined {
            player: inv.display_name.clone(),
            players: roster_names(session),
            max_players: session.config().max_players,
            ready: session.phase() == Phase::Forming && session.player_count() >= min_players,
        })
    }

    fn begin(&mut self, inv: &Invocation) -> Result<Reply, CommandError> {
        let session = self
            .registry
            .get_mut(inv.channel)
            .filter(|s| s.player_count() > 0)
            .ok_or(CommandError::NoGame)?;

        if session.phase() != Phase::Forming {
            return Err(CommandError::AlreadyBegun);
        }
        if !session.contains(inv.actor) {
            return Err(CommandError::NotAPlayer);
        }
        session.try_begin()?;

        let players = session
            .roster()
            .iter()
            .map(|p| (p.display_name().to_string(), p.life()))
            .collect();
        Ok(Reply::Begun { players })
    }

    fn leave(&mut self, inv: &Invocation) -> Result<Reply, CommandError> {
        let session = self
            .registry
            .get_mut(inv.channel)
            .ok_or(CommandError::NotInGame)?;

        if !session.remove_player(inv.actor) {
            return Err(CommandError::NotInGame);
        }

        let game_ended = session.player_count() == 0;
        if game_ended {
            session.end();
            self.registry.remove(inv.channel);
        }

        Ok(Reply::Left {
            player: inv.display_name.clone(),
            game_ended,
        })
    }

    fn end(&mut self, inv: &Invocation) -> Result<Reply, CommandError> {
        let session = self
            .registry
            .get_mut(inv.channel)
            .filter(|s| s.player_count() > 0)
            .ok_or(CommandError::NoGame)?;

        if !session.contains(inv.actor) {
            return Err(CommandError::NotAPlayer);
        }

        session.end();
        self.registry.remove(inv.channel);
        Ok(Reply::Ended)
    }

    fn status(&self, inv: &Invocation) -> Result<Reply, CommandError> {
        let session = self
            .registry
            .get(inv.channel)
            .filter(|s| s.player_count() > 0)
            .ok_or(CommandError::NoGame)?;

        Ok(Reply::Status(session.snapshot()))
    }

    // === Gameplay ===

    fn life(&mut self, inv: &Invocation, change: LifeChange) -> Result<Reply, CommandError> {
        let session = self.session_of(inv)?;
        let player = session
            .player_mut(inv.actor)
            .ok_or(CommandError::NotInGame)?;

        match change {
            LifeChange::Relative(delta) => player.modify_life(delta),
            LifeChange::Set(amount) => player.set_life(amount),
        }
        let life = player.life();

        Ok(Reply::LifeChanged {
            player: inv.display_name.clone(),
            change,
            life,
            elimination: check_elimination(session, inv.actor),
        })
    }

    fn commander_damage(
        &mut self,
        inv: &Invocation,
        target: PlayerId,
        amount: i64,
    ) -> Result<Reply, CommandError> {
        let session = self.session_of(inv)?;

        if !session.contains(inv.actor) {
            return Err(CommandError::NotInGame);
        }
        if target == inv.actor {
            return Err(CommandError::SelfDamage);
        }
        let defender = session
            .player_mut(target)
            .ok_or(CommandError::TargetNotInGame(target))?;

        defender.add_commander_damage(inv.actor, amount);
        let total = defender.commander_damage(inv.actor);
        let defender_name = defender.display_name().to_string();

        Ok(Reply::CommanderDamage {
            attacker: inv.display_name.clone(),
            defender: defender_name,
            amount,
            total,
            elimination: check_elimination(session, target),
        })
    }

    fn counter(&mut self, inv: &Invocation, name: &str, amount: i64) -> Result<Reply, CommandError> {
        let session = self.session_of(inv)?;
        let player = session
            .player_mut(inv.actor)
            .ok_or(CommandError::NotInGame)?;

        let counter = name.to_lowercase();
        player.add_counter(&counter, amount);
        let count = player.counter(&counter);

        Ok(Reply::CounterChanged {
            player: inv.display_name.clone(),
            counter,
            count,
            elimination: check_elimination(session, inv.actor),
        })
    }

    fn reset_counters(&mut self, inv: &Invocation, name: Option<&str>) -> Result<Reply, CommandError> {
        let session = self.session_of(inv)?;
        let player = session
            .player_mut(inv.actor)
            .ok_or(CommandError::NotInGame)?;

        let counter = match name {
            Some(name) => {
                let name = name.to_lowercase();
                if !player.reset_counter(&name) {
                    return Err(CommandError::NoSuchCounter(name));
                }
                Some(name)
            }
            None => {
                player.clear_counters();
                None
            }
        };

        Ok(Reply::CountersReset {
            player: inv.display_name.clone(),
            counter,
        })
    }

    // === Utilities ===

    fn roll(&mut self, inv: &Invocation, spec: DiceSpec) -> Reply {
        Reply::Rolled {
            player: inv.display_name.clone(),
            spec,
            roll: spec.roll(&mut self.rng),
        }
    }

    fn flip(&mut self, inv: &Invocation, times: i64) -> Result<Reply, CommandError> {
        Ok(Reply::Flipped {
            player: inv.display_name.clone(),
            flips: flip_coins(&mut self.rng, times)?,
        })
    }

    /// The actor's channel session. Missing sessions read as "not in game".
    fn session_of(&mut self, inv: &Invocation) -> Result<&mut Session, CommandError> {
        self.registry
            .get_mut(inv.channel)
            .ok_or(CommandError::NotInGame)
    }
}

fn mulligan(inv: &Invocation, cards: i64) -> Result<Reply, CommandError> {
    if !(0..=OPENING_HAND_SIZE).contains(&cards) {
        return Err(CommandError::InvalidHandSize { max: OPENING_HAND_SIZE });
    }
    Ok(Reply::Mulligan {
        player: inv.display_name.clone(),
        cards,
    })
}

fn roster_names(session: &Session) -> Vec<String> {
    session
        .roster()
        .iter()
        .map(|p| p.display_name().to_string())
        .collect()
}

/// Report `id`'s elimination, and the winner if an active game just ended.
fn check_elimination(session: &Session, id: PlayerId) -> Option<Elimination> {
    let player = session.player(id)?;
    let reason = player.loss_reason()?;

    let winner = match session.outcome() {
        Some(GameResult::Winner(winner)) => session
            .player(winner)
            .map(|p| p.display_name().to_string()),
        _ => None,
    };

    tracing::info!(
        channel = %session.channel(),
        player = %id,
        ?reason,
        winner = winner.as_deref().unwrap_or("-"),
        "player eliminated"
    );

    Some(Elimination {
        player: player.display_name().to_string(),
        reason,
        winner,
    })
}
