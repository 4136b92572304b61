pub mod clock;
pub mod journal;
pub mod ledger;
pub mod player;
pub mod role;
pub mod roster;
