//! Sound cues played as terminal bells

use std::io::{self, Write};

use tracing::debug;

use crate::game::SoundCue;

const BELL: &[u8] = b"\x07";

pub struct Chime {
    enabled: bool,
}

impl Chime {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn play<W: Write>(&self, out: &mut W, cue: SoundCue) -> io::Result<()> {
        debug!(?cue, enabled = self.enabled, "Sound cue");
        if !self.enabled {
            return Ok(());
        }

        // A bonus appearing rings twice so it stands out from eating
        let rings = match cue {
            SoundCue::BonusAppeared => 2,
            SoundCue::Eat | SoundCue::BonusEat | SoundCue::GameOver => 1,
        };
        for _ in 0..rings {
            out.write_all(BELL)?;
        }
        out.flush()
    }
}
