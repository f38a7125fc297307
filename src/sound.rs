//! Sound clips and the bank that holds them.
//!
//! The engine stops at token strings; turning a token into audio is the job
//! of a [`Sound`] implementation supplied by the embedding application. This
//! module defines that seam plus [`SoundBank`], a name-keyed collection with
//! bulk loading. Playback order and sequencing live in
//! [`Voice`](crate::voice::Voice).

use std::collections::BTreeMap;
use std::fmt;

// --- The clip seam -------------------------------------------------------------

/// One playable clip.
///
/// Implementations own the actual audio backend. All three operations
/// report success as a plain `bool`: a clip that fails to load or play is an
/// expected runtime condition (missing file, busy device), not a programming
/// error, and callers decide how much they care.
pub trait Sound {
    /// The clip's name; used as its key in a [`SoundBank`].
    fn name(&self) -> &str;

    /// Plays the clip at the given speed and pitch, where `1.0` is the
    /// clip's natural value for both. Returns `true` on success.
    fn play(&self, speed: f32, pitch: f32) -> bool;

    /// Loads the clip's data. Returns `true` on success, or if the clip was
    /// already loaded.
    fn load(&mut self) -> bool;

    /// Whether the clip's data is loaded.
    fn is_loaded(&self) -> bool;
}

// --- Sound banks ---------------------------------------------------------------

/// A collection of clips keyed by name.
///
/// Names are unique: [`put`](SoundBank::put) refuses a clip whose name is
/// already taken rather than replacing it. Iteration and bulk loading run in
/// name order, so load failures surface deterministically.
#[derive(Default)]
pub struct SoundBank {
    sounds: BTreeMap<String, Box<dyn Sound>>,
}

impl SoundBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self { sounds: BTreeMap::new() }
    }

    /// Adds a clip under its own name.
    ///
    /// Returns `true` if the clip was added, `false` if the name was
    /// already taken (the existing clip stays).
    pub fn put(&mut self, sound: Box<dyn Sound>) -> bool {
        let name = sound.name().to_string();
        if self.sounds.contains_key(&name) {
            return false;
        }
        self.sounds.insert(name, sound);
        true
    }

    /// Looks up a clip by name.
    pub fn get(&self, name: &str) -> Option<&dyn Sound> {
        self.sounds.get(name).map(|s| s.as_ref())
    }

    /// Whether a clip with this name is in the bank.
    pub fn contains(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Loads every clip, in name order.
    ///
    /// With `stop_fast` the first failed load aborts the pass and later
    /// clips stay untouched; otherwise every clip gets its load attempt.
    /// Returns `true` only if all attempted loads succeeded.
    pub fn load_all(&mut self, stop_fast: bool) -> bool {
        let mut all_ok = true;
        for sound in self.sounds.values_mut() {
            let ok = sound.load();
            if stop_fast && !ok {
                return false;
            }
            all_ok = all_ok && ok;
        }
        all_ok
    }

    /// Whether every clip in the bank is loaded.
    pub fn is_loaded(&self) -> bool {
        self.sounds.values().all(|s| s.is_loaded())
    }

    /// Number of clips in the bank.
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// Whether the bank holds no clips.
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Clip names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(|name| name.as_str())
    }
}

impl fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = self.sounds.values().filter(|s| s.is_loaded()).count();
        f.debug_struct("SoundBank")
            .field("len", &self.sounds.len())
            .field("loaded", &loaded)
            .field("names", &self.sounds.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects clips via [`put`](SoundBank::put); on a name collision the clip
/// seen first stays.
impl FromIterator<Box<dyn Sound>> for SoundBank {
    fn from_iter<I: IntoIterator<Item = Box<dyn Sound>>>(iter: I) -> Self {
        let mut bank = Self::new();
        for sound in iter {
            bank.put(sound);
        }
        bank
    }
}
