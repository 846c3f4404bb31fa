//! Server channel: where emitted packs become battle state.
//!
//! - `ServerCallback`: what an effect sees while it resolves
//! - `BattleServer`: records packs in emission order
//! - `BattleSession`: owns one battle and drives casts end to end

mod callback;
mod session;

pub use callback::{BattleServer, ServerCallback};
pub use session::{BattleSession, CastOutcome, CastRequest, CasterRef, SessionError};
