pub mod grid;
pub mod nearest;
