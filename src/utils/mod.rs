pub mod clock;
pub mod coordinate;
pub mod landmark;
