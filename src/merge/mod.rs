pub mod matcher;
pub mod opponents;
pub mod probability;
pub mod roster;
pub mod schedule;
pub mod standings;
