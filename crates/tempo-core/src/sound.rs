//! The alarm-sound catalog.
//!
//! A fixed set of named sounds; the user's pick is persisted by display
//! name. Unknown stored names resolve to the default so a stale preference
//! can never leave the app without a completion sound.

use serde::{Deserialize, Serialize};

/// Sounds the user can pick for the completion alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlarmSound {
    #[default]
    Beep,
    Glass,
    Hero,
    Morse,
    Ping,
    Pop,
    Purr,
    Sosumi,
    Submarine,
    Tink,
    Rain,
    Wave,
    Train,
    Grass,
    #[serde(rename = "Digital Chime")]
    DigitalChime,
    #[serde(rename = "Soft Bell")]
    SoftBell,
    #[serde(rename = "Ambient Rise")]
    AmbientRise,
    Crystal,
    #[serde(rename = "Zen Bowl")]
    ZenBowl,
    #[serde(rename = "Gentle Wake")]
    GentleWake,
    #[serde(rename = "Morning Birds")]
    MorningBirds,
    Harp,
    Marimba,
    Xylophone,
}

impl AlarmSound {
    /// Catalog in display order.
    pub const ALL: [AlarmSound; 24] = [
        AlarmSound::Beep,
        AlarmSound::Glass,
        AlarmSound::Hero,
        AlarmSound::Morse,
        AlarmSound::Ping,
        AlarmSound::Pop,
        AlarmSound::Purr,
        AlarmSound::Sosumi,
        AlarmSound::Submarine,
        AlarmSound::Tink,
        AlarmSound::Rain,
        AlarmSound::Wave,
        AlarmSound::Train,
        AlarmSound::Grass,
        AlarmSound::DigitalChime,
        AlarmSound::SoftBell,
        AlarmSound::AmbientRise,
        AlarmSound::Crystal,
        AlarmSound::ZenBowl,
        AlarmSound::GentleWake,
        AlarmSound::MorningBirds,
        AlarmSound::Harp,
        AlarmSound::Marimba,
        AlarmSound::Xylophone,
    ];

    /// Display name, also the persisted identifier.
    pub fn name(self) -> &'static str {
        match self {
            AlarmSound::Beep => "Beep",
            AlarmSound::Glass => "Glass",
            AlarmSound::Hero => "Hero",
            AlarmSound::Morse => "Morse",
            AlarmSound::Ping => "Ping",
            AlarmSound::Pop => "Pop",
            AlarmSound::Purr => "Purr",
            AlarmSound::Sosumi => "Sosumi",
            AlarmSound::Submarine => "Submarine",
            AlarmSound::Tink => "Tink",
            AlarmSound::Rain => "Rain",
            AlarmSound::Wave => "Wave",
            AlarmSound::Train => "Train",
            AlarmSound::Grass => "Grass",
            AlarmSound::DigitalChime => "Digital Chime",
            AlarmSound::SoftBell => "Soft Bell",
            AlarmSound::AmbientRise => "Ambient Rise",
            AlarmSound::Crystal => "Crystal",
            AlarmSound::ZenBowl => "Zen Bowl",
            AlarmSound::GentleWake => "Gentle Wake",
            AlarmSound::MorningBirds => "Morning Birds",
            AlarmSound::Harp => "Harp",
            AlarmSound::Marimba => "Marimba",
            AlarmSound::Xylophone => "Xylophone",
        }
    }

    /// Resolve a persisted identifier. `None` for names outside the catalog.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|sound| sound.name() == name)
    }

    /// File stem of the wav asset for this sound.
    pub fn file_stem(self) -> String {
        match self {
            AlarmSound::DigitalChime => "digital_chime".into(),
            AlarmSound::SoftBell => "soft_bell".into(),
            AlarmSound::AmbientRise => "ambient_rise".into(),
            AlarmSound::ZenBowl => "zen_bowl".into(),
            AlarmSound::GentleWake => "gentle_wake".into(),
            AlarmSound::MorningBirds => "morning_birds".into(),
            other => other.name().to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_the_catalog() {
        for sound in AlarmSound::ALL {
            assert_eq!(AlarmSound::from_name(sound.name()), Some(sound));
        }
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        assert_eq!(AlarmSound::from_name("Kazoo"), None);
        assert_eq!(AlarmSound::from_name("beep"), None);
    }

    #[test]
    fn default_is_beep() {
        assert_eq!(AlarmSound::default(), AlarmSound::Beep);
    }

    #[test]
    fn multiword_sounds_map_to_snake_case_stems() {
        assert_eq!(AlarmSound::DigitalChime.file_stem(), "digital_chime");
        assert_eq!(AlarmSound::MorningBirds.file_stem(), "morning_birds");
        assert_eq!(AlarmSound::Crystal.file_stem(), "crystal");
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&AlarmSound::DigitalChime).unwrap();
        assert_eq!(json, "\"Digital Chime\"");
        let parsed: AlarmSound = serde_json::from_str("\"Zen Bowl\"").unwrap();
        assert_eq!(parsed, AlarmSound::ZenBowl);
    }
}
