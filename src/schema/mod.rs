/// Dice and dice pools, plus `NdF` notation parsing and rendering.
pub mod die;
pub mod notation;
