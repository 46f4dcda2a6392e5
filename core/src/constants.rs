/// Dimensions of the monochrome display measured in pixels
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded and where the program counter starts
pub const PROGRAM_START: u16 = 0x200;

/// Where the built-in hex sprite sheet is baked into memory
pub const FONT_BASE: u16 = 0x050;

/// How many return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// The largest ROM that fits between PROGRAM_START and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Nanoseconds per CPU cycle (500Hz clock)
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Nanoseconds per timer tick (60Hz, driven by the frontend)
pub const TIMER_INTERVAL: u64 = 16_666_667;

/// How many previous states are retained for rewinding
pub const MAX_SAVED_STATES: usize = 500;

/// # Sprite sheet
/// Sprites for the hex digits 0..F.
///
/// Each sprite is 8x5 pixels and is encoded as 5 bytes where each bit
/// represents whether or not a pixel is lit.
///
/// e.g. 0x2:
/// ```text
/// 0xF0 -> 1111 -> XXXX
/// 0x10 -> 0001 ->    X
/// 0xF0 -> 1111 -> XXXX
/// 0x80 -> 1000 -> X
/// 0xF0 -> 1111 -> XXXX
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
