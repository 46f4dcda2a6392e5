use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_DEPTH,
};

/// A snapshot of the machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag output for carry/borrow/collision
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter; always points at the next fetch
///
/// Pointer
/// - (sp) the number of active stack entries (0..=16)
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz by the frontend
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the hex sprite sheet, baked in at construction
///     - 0x200.. holds the loaded program
/// - 64x32 frame buffer storing the contents of the next frame to be drawn
///
/// The pressed-key array and the random source live on the Chip8 wrapper so
/// that State stays Copy and can be cheaply snapshotted for rewinding.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_BASE as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]; each cell is 1 (lit) or 0 (dark)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_points_at_program_start() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
    }

    #[test]
    fn test_new_state_bakes_in_sprite_sheet() {
        let state = State::new();
        assert_eq!(state.memory[0x050..0x0A0], SPRITE_SHEET);
        // everything outside the sprite sheet is zeroed
        assert_eq!(state.memory[..0x050], [0; 0x050]);
        assert_eq!(state.memory[0x0A0..], [0; MEMORY_SIZE - 0x0A0]);
    }
}
