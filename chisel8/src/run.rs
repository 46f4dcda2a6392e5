use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chisel8_core::{Chip8, CLOCK_SPEED, TIMER_INTERVAL};
use chisel8_display::Display;

use crate::keymap::keymap;
use crate::sound::Sound;

pub fn run(rom: PathBuf) -> Result<(), String> {
    let mut chip8 = Chip8::new();

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl)?;
    let mut events = sdl.event_pump()?;
    let mut sound = Sound::new();

    // Load ROM; an oversized or unreadable ROM is a configuration error, not
    // something to limp along without
    let file = File::open(&rom).map_err(|e| format!("unable to open {}: {}", rom.display(), e))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .map_err(|e| format!("unable to load {}: {}", rom.display(), e))?;
    println!("successfully loaded ROM {}", rom.display());

    // Set initial timing; the instruction clock and the 60Hz timer clock run
    // on independent schedules
    let cycle_time = Duration::from_nanos(CLOCK_SPEED);
    let timer_time = Duration::from_nanos(TIMER_INTERVAL);
    let mut last_cycle = Instant::now();
    let mut last_timer_tick = Instant::now();

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;

    'event: loop {
        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            chip8.reverse_cpu();
        } else {
            chip8.advance_cpu();
        }

        // Tick the timers at a fixed 60Hz regardless of the instruction rate
        while last_timer_tick.elapsed() >= timer_time {
            chip8.advance_timers();
            last_timer_tick += timer_time;
        }
        sound.set(chip8.sound_active());

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = current_time;
    }

    sound.set(false);
    Ok(())
}
