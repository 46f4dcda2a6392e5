use beep::beep;

const BEEP_PITCH: u16 = 440;

/// PC-speaker tone gated by the machine's sound timer.
///
/// A host without a usable speaker device degrades to permanent silence
/// rather than failing the emulator.
pub struct Sound {
    beeping: bool,
    enabled: bool,
}

impl Sound {
    pub fn new() -> Self {
        Sound {
            beeping: false,
            enabled: true,
        }
    }

    /// Starts or stops the tone to match the sound timer's state
    pub fn set(&mut self, active: bool) {
        if !self.enabled || active == self.beeping {
            return;
        }
        let pitch = if active { BEEP_PITCH } else { 0 };
        match beep(pitch) {
            Ok(()) => self.beeping = active,
            Err(_) => self.enabled = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_starts_silent() {
        let sound = Sound::new();
        assert!(!sound.beeping);
    }
}
