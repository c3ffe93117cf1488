pub mod recruitment;
pub mod roster;
