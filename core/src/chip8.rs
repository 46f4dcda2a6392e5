use std::collections::VecDeque;
use std::io::{Error, ErrorKind, Read};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{MAX_ROM_SIZE, MAX_SAVED_STATES, MEMORY_SIZE, PROGRAM_START};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///  - a per-machine random source, seeded once at construction
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers (called by the frontend at 60Hz; the machine does
///   not pace itself)
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    pressed_keys: [bool; 16],
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            pressed_keys: [false; 16],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Load a rom from a source file
    ///
    /// ROMs land at 0x200 and may fill memory to its very end; anything
    /// larger than the space between 0x200 and the end of memory is rejected
    /// before a single byte is copied in.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "ROM is {} bytes but at most {} fit in memory",
                    rom.len(),
                    MAX_ROM_SIZE
                ),
            ));
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        Ok(())
    }

    /// Returns the FrameBuffer and clears the draw flag if the display
    /// should be redrawn
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[key as usize] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[key as usize] = false;
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at pc and advances pc past it
    /// - decodes and executes it as a pure State transition
    ///
    /// A key-wait instruction with nothing pressed rewinds pc onto itself,
    /// so repeated cycles stall there until a key arrives.
    pub fn advance_cpu(&mut self) {
        let op = self.fetch();
        let instruction = Instruction::decode(op);
        let rand_byte: u8 = self.rng.gen();
        self.save_state();
        let mut fetched = self.state;
        fetched.pc = fetched.pc.wrapping_add(0x2);
        self.state = instruction.execute(&fetched, self.pressed_keys, rand_byte);
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    pub fn reverse_cpu(&mut self) {
        if let Some(state) = self.previous_states.pop_front() {
            self.state = state;
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }

    /// Decrements whichever timers are running
    ///
    /// The frontend calls this at a fixed 60Hz, independent of the
    /// instruction rate.
    pub fn advance_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// Whether the frontend should be producing a tone right now
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two
    /// subsequent bytes. Fetch addresses are masked into the 4096-byte space.
    fn fetch(&self) -> u16 {
        let mask = MEMORY_SIZE - 1;
        let left = u16::from(self.state.memory[self.state.pc as usize & mask]);
        let right = u16::from(self.state.memory[self.state.pc.wrapping_add(1) as usize & mask]);
        left << 8 | right
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip8_fetches_op() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch(), 0xAABB);
    }

    #[test]
    fn test_advance_cpu_moves_past_the_opcode() {
        let mut chip8 = Chip8::new();
        let starting_pc = chip8.state.pc;
        // a cls opcode; empty memory would decode as Nop and also advance
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        chip8.advance_cpu();
        assert_eq!(chip8.state.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_key_wait_stalls_then_resumes() {
        let mut chip8 = Chip8::new();
        // F10A: wait for a key and put it in V1
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xF1, 0x0A]);
        chip8.advance_cpu();
        chip8.advance_cpu();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.key_press(0xE);
        chip8.advance_cpu();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0xE);
    }

    #[test]
    fn test_key_presses_set_and_clear() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0xE);
        assert!(chip8.pressed_keys[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.pressed_keys[0xE]);
    }

    #[test]
    fn test_chip8_saves_state() {
        let mut chip8 = Chip8::new();
        chip8.save_state();
        assert_eq!(chip8.previous_states.len(), 1);
    }

    // TODO this test is unnecessarily slow because we can't parameterize MAX_SAVED_STATES
    #[test]
    fn test_chip8_drops_old_saved_states() {
        let mut chip8 = Chip8::new();
        for _ in 0..MAX_SAVED_STATES {
            chip8.save_state();
        }
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
        chip8.save_state();
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
    }

    #[test]
    fn test_reverse_cpu_restores_the_previous_state() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x61, 0x22]);
        chip8.advance_cpu();
        assert_eq!(chip8.state.v[0x1], 0x22);
        chip8.reverse_cpu();
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.state.v[0x1], 0x0);
    }

    #[test]
    fn test_advance_timers_decrements_both() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 2;
        chip8.state.sound_timer = 1;
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer, 1);
        assert_eq!(chip8.state.sound_timer, 0);
        assert!(!chip8.sound_active());
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer, 0);
    }

    #[test]
    fn test_sound_active_while_timer_runs() {
        let mut chip8 = Chip8::new();
        chip8.state.sound_timer = 3;
        assert!(chip8.sound_active());
    }

    #[test]
    fn test_take_frame_clears_the_draw_flag() {
        let mut chip8 = Chip8::new();
        assert!(chip8.take_frame().is_none());
        chip8.state.draw_flag = true;
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_load_rom_copies_bytes_to_program_start() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x00, 0xE0, 0x12, 0x00];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.state.memory[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_load_rom_accepts_a_rom_that_exactly_fills_memory() {
        let mut chip8 = Chip8::new();
        let rom = vec![0xAB; MAX_ROM_SIZE];
        chip8.load_rom(&mut rom.as_slice()).unwrap();
        assert_eq!(chip8.state.memory[0xFFF], 0xAB);
    }

    #[test]
    fn test_load_rom_rejects_an_oversized_rom() {
        let mut chip8 = Chip8::new();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        let err = chip8.load_rom(&mut rom.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        // nothing was copied in
        assert_eq!(chip8.state.memory[0x200], 0x0);
    }
}
