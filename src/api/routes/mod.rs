pub mod players;
pub mod ranking;
