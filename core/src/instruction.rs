use crate::operations;
use crate::state::State;

/// # Instructions
///
/// Chip-8 opcodes are 16 bits each. Which operation they encode is cased on
/// some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. Clr)
///
/// Nibbles not used to select the operation carry its operands:
/// - `nnn` the low 12 bits; a memory address
/// - `kk` the low byte; data assigned to and/or compared with Vx
/// - `x` the second nibble; the register Vx or the range of registers V0..Vx
/// - `y` the third nibble; the register Vy
/// - `n` the low nibble; a sprite height
///
/// Decoding is total: `0nnn` (SYS, ignored on modern interpreters) and any
/// encoding with no defined meaning decode to `Nop` so that a buggy ROM can
/// never halt the machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the frame buffer
    Clr,
    /// 00EE: return from a subroutine
    Rts,
    /// 1nnn: PC = nnn
    Jump { nnn: u16 },
    /// 2nnn: STACK.push(PC); PC = nnn
    Call { nnn: u16 },
    /// 3xkk: skip if Vx == kk
    Ske { x: u8, kk: u8 },
    /// 4xkk: skip if Vx != kk
    Skne { x: u8, kk: u8 },
    /// 5xy0: skip if Vx == Vy
    Skre { x: u8, y: u8 },
    /// 6xkk: Vx = kk
    Load { x: u8, kk: u8 },
    /// 7xkk: Vx += kk
    Add { x: u8, kk: u8 },
    /// 8xy0: Vx = Vy
    Mv { x: u8, y: u8 },
    /// 8xy1: Vx |= Vy
    Or { x: u8, y: u8 },
    /// 8xy2: Vx &= Vy
    And { x: u8, y: u8 },
    /// 8xy3: Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// 8xy4: Vx += Vy; VF = carry
    Addr { x: u8, y: u8 },
    /// 8xy5: Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// 8xy6: Vx >>= 1; VF = shifted-out bit
    Shr { x: u8 },
    /// 8xy7: Vx = Vy - Vx; VF = !borrow
    Subn { x: u8, y: u8 },
    /// 8xyE: Vx <<= 1; VF = shifted-out bit
    Shl { x: u8 },
    /// 9xy0: skip if Vx != Vy
    Skrne { x: u8, y: u8 },
    /// Annn: I = nnn
    Loadi { nnn: u16 },
    /// Bnnn: PC = V0 + nnn
    Jumpi { nnn: u16 },
    /// Cxkk: Vx = random byte & kk
    Rnd { x: u8, kk: u8 },
    /// Dxyn: draw the n-byte sprite at memory[I..] at (Vx, Vy); VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E: skip if the key in Vx is pressed
    Skpr { x: u8 },
    /// ExA1: skip if the key in Vx is not pressed
    Skup { x: u8 },
    /// Fx07: Vx = DT
    Moved { x: u8 },
    /// Fx0A: stall until a key is pressed, then Vx = that key
    Keyd { x: u8 },
    /// Fx15: DT = Vx
    Loads { x: u8 },
    /// Fx18: ST = Vx
    Loadst { x: u8 },
    /// Fx1E: I += Vx
    Addi { x: u8 },
    /// Fx29: I = address of the sprite for the hex digit in Vx
    Ldspr { x: u8 },
    /// Fx33: memory[I..I+3] = BCD of Vx
    Bcd { x: u8 },
    /// Fx55: memory[I..=I+x] = V0..=Vx
    Stor { x: u8 },
    /// Fx65: V0..=Vx = memory[I..=I+x]
    Read { x: u8 },
    /// anything else: do nothing
    Nop,
}

impl Instruction {
    /// Decodes an opcode into the Instruction it encodes with its operand
    /// fields already extracted
    pub fn decode(op: u16) -> Self {
        let x = ((op & 0x0F00) >> 8) as u8;
        let y = ((op & 0x00F0) >> 4) as u8;
        let n = (op & 0x000F) as u8;
        let kk = (op & 0x00FF) as u8;
        let nnn = op & 0x0FFF;

        match (((op & 0xF000) >> 12) as u8, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clr,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Rts,
            // 0nnn jumps to a machine routine on the original hardware
            (0x0, ..) => Instruction::Nop,
            (0x1, ..) => Instruction::Jump { nnn },
            (0x2, ..) => Instruction::Call { nnn },
            (0x3, ..) => Instruction::Ske { x, kk },
            (0x4, ..) => Instruction::Skne { x, kk },
            (0x5, .., 0x0) => Instruction::Skre { x, y },
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::Add { x, kk },
            (0x8, .., 0x0) => Instruction::Mv { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::Addr { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x },
            (0x8, .., 0x7) => Instruction::Subn { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x },
            (0x9, .., 0x0) => Instruction::Skrne { x, y },
            (0xA, ..) => Instruction::Loadi { nnn },
            (0xB, ..) => Instruction::Jumpi { nnn },
            (0xC, ..) => Instruction::Rnd { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => Instruction::Skpr { x },
            (0xE, .., 0xA, 0x1) => Instruction::Skup { x },
            (0xF, .., 0x0, 0x7) => Instruction::Moved { x },
            (0xF, .., 0x0, 0xA) => Instruction::Keyd { x },
            (0xF, .., 0x1, 0x5) => Instruction::Loads { x },
            (0xF, .., 0x1, 0x8) => Instruction::Loadst { x },
            (0xF, .., 0x1, 0xE) => Instruction::Addi { x },
            (0xF, .., 0x2, 0x9) => Instruction::Ldspr { x },
            (0xF, .., 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, .., 0x5, 0x5) => Instruction::Stor { x },
            (0xF, .., 0x6, 0x5) => Instruction::Read { x },
            _ => Instruction::Nop,
        }
    }

    /// Executes the Instruction as a pure transition from one State to the
    /// next.
    ///
    /// The caller has already advanced `pc` past this instruction, so jump
    /// targets land exactly, a satisfied skip adds 2 more, and a key-wait
    /// stall rewinds by 2 to refetch itself.
    ///
    /// # Arguments
    /// * `state` the machine state to transition from
    /// * `pressed_keys` the pressed status of keys 0..F
    /// * `rand_byte` one uniformly distributed byte, consumed by Rnd
    pub fn execute(&self, state: &State, pressed_keys: [bool; 16], rand_byte: u8) -> State {
        match *self {
            Instruction::Clr => operations::clr(state),
            Instruction::Rts => operations::rts(state),
            Instruction::Jump { nnn } => operations::jump(nnn, state),
            Instruction::Call { nnn } => operations::call(nnn, state),
            Instruction::Ske { x, kk } => operations::ske(x, kk, state),
            Instruction::Skne { x, kk } => operations::skne(x, kk, state),
            Instruction::Skre { x, y } => operations::skre(x, y, state),
            Instruction::Load { x, kk } => operations::load(x, kk, state),
            Instruction::Add { x, kk } => operations::add(x, kk, state),
            Instruction::Mv { x, y } => operations::mv(x, y, state),
            Instruction::Or { x, y } => operations::or(x, y, state),
            Instruction::And { x, y } => operations::and(x, y, state),
            Instruction::Xor { x, y } => operations::xor(x, y, state),
            Instruction::Addr { x, y } => operations::addr(x, y, state),
            Instruction::Sub { x, y } => operations::sub(x, y, state),
            Instruction::Shr { x } => operations::shr(x, state),
            Instruction::Subn { x, y } => operations::subn(x, y, state),
            Instruction::Shl { x } => operations::shl(x, state),
            Instruction::Skrne { x, y } => operations::skrne(x, y, state),
            Instruction::Loadi { nnn } => operations::loadi(nnn, state),
            Instruction::Jumpi { nnn } => operations::jumpi(nnn, state),
            Instruction::Rnd { x, kk } => operations::rnd(x, kk, rand_byte, state),
            Instruction::Draw { x, y, n } => operations::draw(x, y, n, state),
            Instruction::Skpr { x } => operations::skpr(x, pressed_keys, state),
            Instruction::Skup { x } => operations::skup(x, pressed_keys, state),
            Instruction::Moved { x } => operations::moved(x, state),
            Instruction::Keyd { x } => operations::keyd(x, pressed_keys, state),
            Instruction::Loads { x } => operations::loads(x, state),
            Instruction::Loadst { x } => operations::loadst(x, state),
            Instruction::Addi { x } => operations::addi(x, state),
            Instruction::Ldspr { x } => operations::ldspr(x, state),
            Instruction::Bcd { x } => operations::bcd(x, state),
            Instruction::Stor { x } => operations::stor(x, state),
            Instruction::Read { x } => operations::read(x, state),
            Instruction::Nop => operations::nop(state),
        }
    }
}

#[cfg(test)]
mod test_decode {
    use super::*;

    #[test]
    fn test_decodes_fixed_function_opcodes() {
        assert_eq!(Instruction::decode(0x00E0), Instruction::Clr);
        assert_eq!(Instruction::decode(0x00EE), Instruction::Rts);
    }

    #[test]
    fn test_decodes_address_opcodes() {
        assert_eq!(Instruction::decode(0x1ABC), Instruction::Jump { nnn: 0xABC });
        assert_eq!(Instruction::decode(0x2ABC), Instruction::Call { nnn: 0xABC });
        assert_eq!(Instruction::decode(0xAABC), Instruction::Loadi { nnn: 0xABC });
        assert_eq!(Instruction::decode(0xBABC), Instruction::Jumpi { nnn: 0xABC });
    }

    #[test]
    fn test_decodes_register_byte_opcodes() {
        assert_eq!(Instruction::decode(0x31AB), Instruction::Ske { x: 0x1, kk: 0xAB });
        assert_eq!(Instruction::decode(0x41AB), Instruction::Skne { x: 0x1, kk: 0xAB });
        assert_eq!(Instruction::decode(0x61AB), Instruction::Load { x: 0x1, kk: 0xAB });
        assert_eq!(Instruction::decode(0x71AB), Instruction::Add { x: 0x1, kk: 0xAB });
        assert_eq!(Instruction::decode(0xC1AB), Instruction::Rnd { x: 0x1, kk: 0xAB });
    }

    #[test]
    fn test_decodes_register_register_opcodes() {
        assert_eq!(Instruction::decode(0x5120), Instruction::Skre { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8120), Instruction::Mv { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8121), Instruction::Or { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8122), Instruction::And { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8123), Instruction::Xor { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8124), Instruction::Addr { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8125), Instruction::Sub { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x8126), Instruction::Shr { x: 0x1 });
        assert_eq!(Instruction::decode(0x8127), Instruction::Subn { x: 0x1, y: 0x2 });
        assert_eq!(Instruction::decode(0x812E), Instruction::Shl { x: 0x1 });
        assert_eq!(Instruction::decode(0x9120), Instruction::Skrne { x: 0x1, y: 0x2 });
    }

    #[test]
    fn test_decodes_draw() {
        assert_eq!(
            Instruction::decode(0xD125),
            Instruction::Draw { x: 0x1, y: 0x2, n: 0x5 }
        );
    }

    #[test]
    fn test_decodes_key_opcodes() {
        assert_eq!(Instruction::decode(0xE19E), Instruction::Skpr { x: 0x1 });
        assert_eq!(Instruction::decode(0xE1A1), Instruction::Skup { x: 0x1 });
        assert_eq!(Instruction::decode(0xF10A), Instruction::Keyd { x: 0x1 });
    }

    #[test]
    fn test_decodes_f_family() {
        assert_eq!(Instruction::decode(0xF107), Instruction::Moved { x: 0x1 });
        assert_eq!(Instruction::decode(0xF115), Instruction::Loads { x: 0x1 });
        assert_eq!(Instruction::decode(0xF118), Instruction::Loadst { x: 0x1 });
        assert_eq!(Instruction::decode(0xF11E), Instruction::Addi { x: 0x1 });
        assert_eq!(Instruction::decode(0xF129), Instruction::Ldspr { x: 0x1 });
        assert_eq!(Instruction::decode(0xF133), Instruction::Bcd { x: 0x1 });
        assert_eq!(Instruction::decode(0xF155), Instruction::Stor { x: 0x1 });
        assert_eq!(Instruction::decode(0xF165), Instruction::Read { x: 0x1 });
    }

    #[test]
    fn test_sys_decodes_to_nop() {
        assert_eq!(Instruction::decode(0x0123), Instruction::Nop);
        assert_eq!(Instruction::decode(0x0000), Instruction::Nop);
    }

    #[test]
    fn test_undefined_encodings_decode_to_nop() {
        assert_eq!(Instruction::decode(0x5121), Instruction::Nop);
        assert_eq!(Instruction::decode(0x8128), Instruction::Nop);
        assert_eq!(Instruction::decode(0x9121), Instruction::Nop);
        assert_eq!(Instruction::decode(0xE1FF), Instruction::Nop);
        assert_eq!(Instruction::decode(0xF1FF), Instruction::Nop);
    }
}
