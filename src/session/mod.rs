//! Game session: the round state machine and everything it drives.
//!
//! ## Key Types
//!
//! - `GameSession`: Owns combatants, economy, round flags and the clock
//! - `RoundPhase` / `GameStatus`: Where the round and the game stand
//! - `Scheduler`: Virtual clock for AI pacing and result delays
//! - `SessionSnapshot`: Read-only view for hosts
//!
//! ## Driving a session
//!
//! ```
//! use blackjack_battler::core::SessionConfig;
//! use blackjack_battler::session::{GameSession, RoundPhase};
//!
//! let mut session = GameSession::new(SessionConfig::default().with_seed(7));
//! session.hit();
//! assert_eq!(session.phase(), RoundPhase::AiTurn);
//!
//! // The AI acts after its thinking delay, then hands the turn back
//! session.run_pending();
//! assert_eq!(session.phase(), RoundPhase::PlayerTurn);
//! ```

mod economy;
mod encounter;
mod machine;
mod resolution;
mod scheduler;
mod snapshot;
mod state;

pub use machine::{GameSession, LOG_CAPACITY};
pub use resolution::RoundRecord;
pub use scheduler::{Continuation, ScheduledTask, Scheduler};
pub use snapshot::{CombatantView, SessionSnapshot};
pub use state::{GameStatus, RoundPhase, RoundState};
