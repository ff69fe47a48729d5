pub mod participant;
pub mod roster;
