//! Every operation runs with `pc` already advanced past its own opcode, so
//! a skip adds another 2, a jump target lands exactly, and a call pushes the
//! address of the following instruction.
//!
//! Addresses derived from `i` are masked into the 4096-byte space rather
//! than being allowed to index outside memory; CHIP-8 programs are not
//! guaranteed well-formed and no operation is permitted to halt the machine.

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, MEMORY_SIZE, STACK_DEPTH};
use crate::state::State;

const ADDRESS_MASK: usize = MEMORY_SIZE - 1;

/// clear the frame buffer
pub fn clr(state: &State) -> State {
    State {
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop()
/// A return with no active frames is ignored rather than underflowing.
pub fn rts(state: &State) -> State {
    if state.sp == 0 {
        return *state;
    }
    let sp = state.sp - 1;
    State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    }
}

/// PC = nnn
pub fn jump(nnn: u16, state: &State) -> State {
    State { pc: nnn, ..*state }
}

/// STACK.push(PC); PC = nnn
/// A call with all 16 frames active is ignored rather than overflowing.
pub fn call(nnn: u16, state: &State) -> State {
    if state.sp as usize >= STACK_DEPTH {
        return *state;
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    State {
        pc: nnn,
        sp: state.sp + 1,
        stack,
        ..*state
    }
}

/// if Vx == kk then skip
pub fn ske(x: u8, kk: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == kk {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// if Vx != kk then skip
pub fn skne(x: u8, kk: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != kk {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// if Vx == Vy then skip
pub fn skre(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == state.v[y as usize] {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// Vx = kk
pub fn load(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State { v, ..*state }
}

/// Vx += kk
/// Wraps on overflow without touching VF.
pub fn add(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State { v, ..*state }
}

/// Vx = Vy
pub fn mv(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..*state }
}

/// Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State { v, ..*state }
}

/// Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State { v, ..*state }
}

/// Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State { v, ..*state }
}

/// Vx += Vy; VF = carry
pub fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[0xF] = if over { 0x1 } else { 0x0 };
    v[x as usize] = res;
    State { v, ..*state }
}

/// Vx -= Vy; VF = !borrow
pub fn sub(x: u8, y: u8, state: &State) -> State {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    let mut v = state.v;
    v[0xF] = if under { 0x0 } else { 0x1 };
    v[x as usize] = res;
    State { v, ..*state }
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[0xF] = v[x as usize] & 0x1;
    v[x as usize] >>= 1;
    State { v, ..*state }
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(x: u8, y: u8, state: &State) -> State {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    let mut v = state.v;
    v[0xF] = if under { 0x0 } else { 0x1 };
    v[x as usize] = res;
    State { v, ..*state }
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[0xF] = (v[x as usize] & 0x80) >> 7;
    v[x as usize] <<= 1;
    State { v, ..*state }
}

/// if Vx != Vy then skip
pub fn skrne(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != state.v[y as usize] {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// I = nnn
pub fn loadi(nnn: u16, state: &State) -> State {
    State { i: nnn, ..*state }
}

/// PC = V0 + nnn
pub fn jumpi(nnn: u16, state: &State) -> State {
    State {
        pc: u16::from(state.v[0x0]) + nnn,
        ..*state
    }
}

/// Vx = rand_byte & kk
pub fn rnd(x: u8, kk: u8, rand_byte: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = rand_byte & kk;
    State { v, ..*state }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-byte sprite at memory[I..] onto the frame buffer at (Vx, Vy).
///
/// The origin wraps modulo the display size but individual pixels past the
/// right or bottom edge are clipped, never wrapped or written out of bounds.
/// VF accumulates the collision flag across every drawn pixel: it ends up 1
/// if any lit pixel was turned dark.
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> State {
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    let origin_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;

    v[0xF] = 0x0;

    for (row, py) in (origin_y..DISPLAY_HEIGHT).enumerate().take(n as usize) {
        let sprite_byte = state.memory[(state.i as usize + row) & ADDRESS_MASK];
        for (bit, px) in (origin_x..DISPLAY_WIDTH).enumerate().take(8) {
            let pixel = (sprite_byte >> (7 - bit)) & 1;
            v[0xF] |= pixel & frame_buffer[py][px];
            frame_buffer[py][px] ^= pixel;
        }
    }

    State {
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    }
}

/// if Vx.pressed then skip
pub fn skpr(x: u8, pressed_keys: [bool; 16], state: &State) -> State {
    let pc = if pressed_keys[(state.v[x as usize] & 0xF) as usize] {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// if !Vx.pressed then skip
pub fn skup(x: u8, pressed_keys: [bool; 16], state: &State) -> State {
    let pc = if !pressed_keys[(state.v[x as usize] & 0xF) as usize] {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// Vx = DT
pub fn moved(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State { v, ..*state }
}

/// await a keypress, then Vx = the lowest pressed key
///
/// While no key is pressed this rewinds pc onto its own opcode so the same
/// instruction is refetched on the next cycle; the stall is resumable rather
/// than a busy loop inside the cycle.
pub fn keyd(x: u8, pressed_keys: [bool; 16], state: &State) -> State {
    match pressed_keys.iter().position(|&pressed| pressed) {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key as u8;
            State { v, ..*state }
        }
        None => State {
            pc: state.pc.wrapping_sub(0x2),
            ..*state
        },
    }
}

/// DT = Vx
pub fn loads(x: u8, state: &State) -> State {
    State {
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn loadst(x: u8, state: &State) -> State {
    State {
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx
pub fn addi(x: u8, state: &State) -> State {
    State {
        i: state.i.wrapping_add(u16::from(state.v[x as usize])),
        ..*state
    }
}

/// I = FONT_BASE + Vx * 5
/// Points I at the 5-byte sprite for the hex digit in Vx.
/// See constants::SPRITE_SHEET for the sprite layout.
pub fn ldspr(x: u8, state: &State) -> State {
    State {
        i: FONT_BASE + u16::from(state.v[x as usize]) * 5,
        ..*state
    }
}

/// memory[I..I+3] = bcd(Vx)
/// Stores the hundreds, tens, and ones digits of Vx starting at address I.
pub fn bcd(x: u8, state: &State) -> State {
    let value = state.v[x as usize];
    let mut memory = state.memory;
    memory[state.i as usize & ADDRESS_MASK] = value / 100;
    memory[(state.i as usize + 1) & ADDRESS_MASK] = value / 10 % 10;
    memory[(state.i as usize + 2) & ADDRESS_MASK] = value % 10;
    State { memory, ..*state }
}

/// memory[I..=I+x] = V0..=Vx
pub fn stor(x: u8, state: &State) -> State {
    let mut memory = state.memory;
    for offset in 0..=x as usize {
        memory[(state.i as usize + offset) & ADDRESS_MASK] = state.v[offset];
    }
    State { memory, ..*state }
}

/// V0..=Vx = memory[I..=I+x]
pub fn read(x: u8, state: &State) -> State {
    let mut v = state.v;
    for offset in 0..=x as usize {
        v[offset] = state.memory[(state.i as usize + offset) & ADDRESS_MASK];
    }
    State { v, ..*state }
}

/// do nothing; undefined encodings fall through here
pub fn nop(state: &State) -> State {
    *state
}
