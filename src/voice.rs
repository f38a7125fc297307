//! Sequenced playback of tokenized text.
//!
//! A [`Voice`] owns a [`SoundBank`] and plays token sequences through it.
//! The flow is cue-then-play: [`cue`](Voice::cue) arms a sequence (usually
//! the output of [`parse`](crate::parse)) together with a speed and pitch,
//! then [`play_next`](Voice::play_next) steps through it one clip at a time
//! or [`play_all`](Voice::play_all) runs it to the end.
//!
//! ```
//! use blipspeak::{Sound, SoundBank, Voice};
//!
//! struct Beep(&'static str);
//!
//! impl Sound for Beep {
//!     fn name(&self) -> &str { self.0 }
//!     fn play(&self, _speed: f32, _pitch: f32) -> bool { true }
//!     fn load(&mut self) -> bool { true }
//!     fn is_loaded(&self) -> bool { true }
//! }
//!
//! let bank: SoundBank = ["h", "i"]
//!     .into_iter()
//!     .map(|n| Box::new(Beep(n)) as Box<dyn Sound>)
//!     .collect();
//! let mut voice = Voice::new(bank);
//!
//! assert!(voice.cue(blipspeak::parse("hi").unwrap(), 1.0, 1.0));
//! assert!(voice.play_all(false));
//! assert!(voice.complete());
//! ```

use crate::sound::{Sound, SoundBank};

// --- Voice ---------------------------------------------------------------------

/// Plays sequences of named clips from a [`SoundBank`].
///
/// Playback state is a cursor into the cued sequence. Stepping past a clip
/// the bank does not hold reports failure and moves on; a voice never
/// panics over bank contents.
#[derive(Debug)]
pub struct Voice {
    bank: SoundBank,
    sequence: Vec<String>,
    speed: f32,
    pitch: f32,
    position: usize,
    armed: bool,
}

impl Voice {
    /// Creates a voice over `bank`.
    pub fn new(bank: SoundBank) -> Self {
        Voice {
            bank,
            sequence: Vec::new(),
            speed: 1.0,
            pitch: 1.0,
            position: 0,
            armed: false,
        }
    }

    /// Arms a sequence of clip names for playback at the given speed and
    /// pitch (`1.0` is natural for both). Resets the cursor to the start.
    ///
    /// Returns the same answer as [`valid`](Voice::valid): whether every
    /// cued name exists in the bank. The sequence stays armed either way,
    /// so a caller that tolerates gaps can play through them.
    pub fn cue<I>(&mut self, sequence: I, speed: f32, pitch: f32) -> bool
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sequence = sequence.into_iter().map(Into::into).collect();
        self.speed = speed;
        self.pitch = pitch;
        self.position = 0;
        self.armed = true;
        self.valid()
    }

    /// Whether every name in the cued sequence exists in the bank.
    pub fn valid(&self) -> bool {
        self.sequence.iter().all(|name| self.bank.contains(name))
    }

    /// Plays the clip at the cursor and advances past it.
    ///
    /// Returns `true` if the clip existed and played. A name the bank does
    /// not hold still advances the cursor and reports `false`. Once the
    /// sequence is [`complete`](Voice::complete) this is a no-op returning
    /// `false`.
    pub fn play_next(&mut self) -> bool {
        if self.complete() {
            return false;
        }
        let name = &self.sequence[self.position];
        self.position += 1;
        match self.bank.get(name) {
            Some(sound) => sound.play(self.speed, self.pitch),
            None => false,
        }
    }

    /// Plays from the cursor to the end of the sequence.
    ///
    /// With `stop_fast` the first failed clip stops playback, cursor
    /// already advanced past the failure; otherwise every remaining clip
    /// gets its attempt. Returns `true` only if everything attempted
    /// played.
    pub fn play_all(&mut self, stop_fast: bool) -> bool {
        let mut all_ok = true;
        while !self.complete() {
            let ok = self.play_next();
            if !ok {
                if stop_fast {
                    return false;
                }
                all_ok = false;
            }
        }
        all_ok
    }

    /// Whether the cursor has passed the end of the cued sequence.
    pub fn complete(&self) -> bool {
        self.position >= self.sequence.len()
    }

    /// Whether a sequence has been cued since the voice was created.
    pub fn ready(&self) -> bool {
        self.armed
    }

    /// The underlying bank.
    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    /// Mutable access to the bank, for loading clips after construction.
    pub fn bank_mut(&mut self) -> &mut SoundBank {
        &mut self.bank
    }
}

impl Default for Voice {
    fn default() -> Self {
        Voice::new(SoundBank::new())
    }
}

/// Builds the bank from the clips, keeping the first of each name.
impl FromIterator<Box<dyn Sound>> for Voice {
    fn from_iter<I: IntoIterator<Item = Box<dyn Sound>>>(iter: I) -> Self {
        Voice::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::tests::{TestSound, shared_log};

    fn voice_with(names: &[&'static str]) -> (Voice, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let log = shared_log();
        let mut bank = SoundBank::new();
        for &name in names {
            bank.put(Box::new(TestSound::new(name, &log)));
        }
        (Voice::new(bank), log)
    }

    #[test]
    fn cue_reports_whether_every_clip_exists() {
        let (mut voice, _log) = voice_with(&["h", "i"]);
        assert!(!voice.ready());

        assert!(voice.cue(vec!["h", "i"], 1.0, 1.0));
        assert!(voice.ready());
        assert!(voice.valid());

        assert!(!voice.cue(vec!["h", "ghost"], 1.0, 1.0));
        assert!(voice.ready(), "an invalid sequence still arms");
        assert!(!voice.valid());
    }

    #[test]
    fn play_next_steps_through_in_order_with_speed_and_pitch() {
        let (mut voice, log) = voice_with(&["a", "b"]);
        voice.cue(vec!["b", "a"], 1.5, 0.5);

        assert!(!voice.complete());
        assert!(voice.play_next());
        assert!(voice.play_next());
        assert!(voice.complete());
        assert_eq!(*log.borrow(), vec!["play b 1.5 0.5", "play a 1.5 0.5"]);
    }

    #[test]
    fn play_next_past_the_end_is_a_false_no_op() {
        let (mut voice, log) = voice_with(&["a"]);

        assert!(!voice.play_next(), "nothing cued yet");

        voice.cue(vec!["a"], 1.0, 1.0);
        assert!(voice.play_next());
        assert!(!voice.play_next());
        assert_eq!(log.borrow().len(), 1, "no extra play attempts");
    }

    #[test]
    fn missing_clip_fails_the_step_but_advances() {
        let (mut voice, log) = voice_with(&["a", "b"]);
        voice.cue(vec!["a", "ghost", "b"], 1.0, 1.0);

        assert!(voice.play_next());
        assert!(!voice.play_next(), "unknown name must fail, not panic");
        assert!(voice.play_next(), "the cursor moved past the gap");
        assert!(voice.complete());
        assert_eq!(*log.borrow(), vec!["play a 1 1", "play b 1 1"]);
    }

    #[test]
    fn play_all_plays_the_remainder_from_the_cursor() {
        let (mut voice, log) = voice_with(&["a", "b", "c"]);
        voice.cue(vec!["a", "b", "c"], 1.0, 1.0);

        assert!(voice.play_next());
        assert!(voice.play_all(false));
        assert!(voice.complete());
        assert_eq!(*log.borrow(), vec!["play a 1 1", "play b 1 1", "play c 1 1"]);
    }

    #[test]
    fn play_all_reports_failures_without_stopping() {
        let log = shared_log();
        let mut bank = SoundBank::new();
        bank.put(Box::new(TestSound::new("good", &log)));
        bank.put(Box::new(TestSound::new("bad", &log).failing_play()));
        let mut voice = Voice::new(bank);
        voice.cue(vec!["good", "bad", "good"], 1.0, 1.0);

        assert!(!voice.play_all(false));
        assert!(voice.complete(), "every clip still got its attempt");
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn play_all_stop_fast_stops_after_the_failure() {
        let log = shared_log();
        let mut bank = SoundBank::new();
        bank.put(Box::new(TestSound::new("good", &log)));
        bank.put(Box::new(TestSound::new("bad", &log).failing_play()));
        let mut voice = Voice::new(bank);
        voice.cue(vec!["good", "bad", "good"], 1.0, 1.0);

        assert!(!voice.play_all(true));
        assert!(!voice.complete(), "the last clip was never attempted");
        assert_eq!(*log.borrow(), vec!["play good 1 1", "play bad 1 1"]);

        // The cursor sits just past the failure, so playback can resume.
        assert!(voice.play_all(true));
        assert!(voice.complete());
    }

    #[test]
    fn recueing_restarts_from_the_top() {
        let (mut voice, log) = voice_with(&["a"]);
        voice.cue(vec!["a"], 1.0, 1.0);
        assert!(voice.play_all(false));

        voice.cue(vec!["a", "a"], 2.0, 1.0);
        assert!(!voice.complete());
        assert!(voice.play_all(false));
        assert_eq!(*log.borrow(), vec!["play a 1 1", "play a 2 1", "play a 2 1"]);
    }

    #[test]
    fn collects_clips_into_a_fresh_voice() {
        let log = shared_log();
        let mut voice: Voice = ["x", "y"]
            .into_iter()
            .map(|n| Box::new(TestSound::new(n, &log)) as Box<dyn Sound>)
            .collect();

        assert_eq!(voice.bank().len(), 2);
        assert!(voice.bank_mut().load_all(true));
        assert!(voice.cue(vec!["x", "y"], 1.0, 1.0));
    }
}
