pub use chip8::Chip8;
pub use constants::{CLOCK_SPEED, TIMER_INTERVAL};

mod chip8;
pub mod constants;
mod instruction;
mod operations;
pub mod state;
