//! Durable preset list and alarm-sound preference.
//!
//! Single writer over an injected key-value store. Every mutating call
//! persists before returning, so an acknowledged edit survives a crash.

use tracing::warn;

use crate::error::Result;
use crate::presets::{default_presets, Preset};
use crate::sound::AlarmSound;
use crate::storage::KeyValueStore;

const PRESETS_KEY: &str = "SavedTimerPresets";
const ALARM_SOUND_KEY: &str = "SelectedAlarmSound";

pub struct PresetStore {
    kv: Box<dyn KeyValueStore>,
}

impl PresetStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The persisted list, or the seeded defaults on first run or when the
    /// stored blob does not parse. Defaults are written back immediately so
    /// the next load observes the same list.
    pub fn load(&self) -> Result<Vec<Preset>> {
        match self.kv.get_string(PRESETS_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Preset>>(&raw) {
                Ok(presets) => Ok(presets),
                Err(e) => {
                    warn!(error = %e, "stored presets unreadable, reseeding defaults");
                    self.reset_to_defaults()
                }
            },
            None => self.reset_to_defaults(),
        }
    }

    pub fn save(&self, presets: &[Preset]) -> Result<()> {
        let raw = serde_json::to_string(presets)?;
        self.kv.set_string(PRESETS_KEY, &raw)?;
        Ok(())
    }

    /// Append and persist. Returns the new list.
    pub fn add(&self, preset: Preset) -> Result<Vec<Preset>> {
        let mut presets = self.load()?;
        presets.push(preset);
        self.save(&presets)?;
        Ok(presets)
    }

    /// Replace the preset with the same id. Unknown ids are a no-op.
    pub fn update(&self, preset: Preset) -> Result<Vec<Preset>> {
        let mut presets = self.load()?;
        if let Some(slot) = presets.iter_mut().find(|p| p.id == preset.id) {
            *slot = preset;
            self.save(&presets)?;
        }
        Ok(presets)
    }

    /// Remove by list position. Indices are deduplicated and applied
    /// highest first; out-of-range entries are ignored, so replaying a
    /// delete is harmless.
    pub fn delete(&self, indices: &[usize]) -> Result<Vec<Preset>> {
        let mut presets = self.load()?;
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for index in sorted {
            if index < presets.len() {
                presets.remove(index);
            }
        }
        self.save(&presets)?;
        Ok(presets)
    }

    /// Move the presets at `from_indices` so they sit, in order, before
    /// the element that held `to_index` prior to the move.
    pub fn reorder(&self, from_indices: &[usize], to_index: usize) -> Result<Vec<Preset>> {
        let mut presets = self.load()?;
        let mut sources: Vec<usize> = from_indices
            .iter()
            .copied()
            .filter(|&i| i < presets.len())
            .collect();
        sources.sort_unstable();
        sources.dedup();
        if sources.is_empty() {
            return Ok(presets);
        }

        let mut moved = Vec::with_capacity(sources.len());
        for &index in sources.iter().rev() {
            moved.push(presets.remove(index));
        }
        moved.reverse();

        let shifted = sources.iter().filter(|&&i| i < to_index).count();
        let insert_at = to_index.saturating_sub(shifted).min(presets.len());
        for (slot, preset) in moved.into_iter().enumerate() {
            presets.insert(insert_at + slot, preset);
        }
        self.save(&presets)?;
        Ok(presets)
    }

    /// Overwrite with the seed list and persist.
    pub fn reset_to_defaults(&self) -> Result<Vec<Preset>> {
        let presets = default_presets();
        self.save(&presets)?;
        Ok(presets)
    }

    /// The persisted sound preference. Unknown names fall back to the
    /// default without rewriting the stored value.
    pub fn alarm_sound(&self) -> Result<AlarmSound> {
        let Some(name) = self.kv.get_string(ALARM_SOUND_KEY)? else {
            return Ok(AlarmSound::default());
        };
        Ok(AlarmSound::from_name(&name).unwrap_or_else(|| {
            warn!(name = %name, "unknown alarm sound in store, using default");
            AlarmSound::default()
        }))
    }

    pub fn set_alarm_sound(&self, sound: AlarmSound) -> Result<()> {
        self.kv.set_string(ALARM_SOUND_KEY, sound.name())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> PresetStore {
        PresetStore::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn first_load_seeds_and_persists_defaults() {
        let store = store();
        let first = store.load().unwrap();
        assert_eq!(first.len(), 7);
        assert_eq!(first[3].name, "25 min (Pomodoro)");
        assert_eq!(first[3].duration_secs, 1500);

        // Stable across loads, ids included.
        let second = store.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_blob_falls_back_to_defaults() {
        let kv = MemoryStore::new();
        kv.set_string(PRESETS_KEY, "not json at all").unwrap();
        let store = PresetStore::new(Box::new(kv));
        let presets = store.load().unwrap();
        assert_eq!(presets.len(), 7);
        // The reseed was persisted.
        assert_eq!(store.load().unwrap(), presets);
    }

    #[test]
    fn add_persists_with_a_stable_id() {
        let store = store();
        store.load().unwrap();
        let preset = Preset::new("tea", 240);
        let id = preset.id;
        store.add(preset).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 8);
        assert_eq!(reloaded[7].id, id);
        assert_eq!(reloaded[7].name, "tea");
    }

    #[test]
    fn deleted_presets_stay_deleted() {
        let store = store();
        let before = store.load().unwrap();
        let remaining = store.delete(&[1, 3]).unwrap();
        assert_eq!(remaining.len(), 5);
        assert!(!remaining.iter().any(|p| p.name == "10 min"));
        assert!(!remaining.iter().any(|p| p.name == "25 min (Pomodoro)"));

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, remaining);
        assert_ne!(reloaded, before);
    }

    #[test]
    fn delete_tolerates_duplicates_and_out_of_range() {
        let store = store();
        store.load().unwrap();
        let remaining = store.delete(&[6, 6, 99]).unwrap();
        assert_eq!(remaining.len(), 6);
        assert!(!remaining.iter().any(|p| p.name == "1 hour"));

        // Replaying an out-of-range delete changes nothing.
        let remaining = store.delete(&[99]).unwrap();
        assert_eq!(remaining.len(), 6);
    }

    #[test]
    fn update_matches_by_id_and_ignores_strangers() {
        let store = store();
        let mut presets = store.load().unwrap();
        let mut target = presets.remove(0);
        target.name = "five".into();
        target.duration_secs = 301;
        store.update(target.clone()).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded[0].name, "five");
        assert_eq!(reloaded[0].duration_secs, 301);

        let stranger = Preset::new("ghost", 42);
        let unchanged = store.update(stranger).unwrap();
        assert_eq!(unchanged, reloaded);
    }

    #[test]
    fn reorder_uses_premove_coordinates() {
        let store = store();
        let before = store.load().unwrap();

        // Move the first preset so it lands before the original index 3.
        let after = store.reorder(&[0], 3).unwrap();
        assert_eq!(after[0], before[1]);
        assert_eq!(after[1], before[2]);
        assert_eq!(after[2], before[0]);
        assert_eq!(after[3], before[3]);
        assert_eq!(store.load().unwrap(), after);
    }

    #[test]
    fn reorder_moves_blocks_preserving_order() {
        let store = store();
        let before = store.load().unwrap();

        let after = store.reorder(&[0, 2], 7).unwrap();
        assert_eq!(after.len(), 7);
        assert_eq!(after[5], before[0]);
        assert_eq!(after[6], before[2]);
    }

    #[test]
    fn reset_to_defaults_restores_the_seed_list() {
        let store = store();
        store.delete(&[0, 1, 2]).unwrap();
        let restored = store.reset_to_defaults().unwrap();
        assert_eq!(restored.len(), 7);
        assert_eq!(restored[0].name, "5 min");
        assert_eq!(restored[6].duration_secs, 3600);
        assert_eq!(store.load().unwrap(), restored);
    }

    #[test]
    fn sound_preference_roundtrips() {
        let store = store();
        assert_eq!(store.alarm_sound().unwrap(), AlarmSound::Beep);
        store.set_alarm_sound(AlarmSound::ZenBowl).unwrap();
        assert_eq!(store.alarm_sound().unwrap(), AlarmSound::ZenBowl);
    }

    #[test]
    fn unknown_sound_name_falls_back_to_default() {
        let kv = MemoryStore::new();
        kv.set_string(ALARM_SOUND_KEY, "Foghorn").unwrap();
        let store = PresetStore::new(Box::new(kv));
        assert_eq!(store.alarm_sound().unwrap(), AlarmSound::Beep);
    }

    #[test]
    fn legacy_float_durations_load() {
        let kv = MemoryStore::new();
        kv.set_string(
            PRESETS_KEY,
            &format!(
                "[{{\"id\":\"{}\",\"name\":\"long\",\"duration\":5400.0}}]",
                uuid::Uuid::new_v4()
            ),
        )
        .unwrap();
        let store = PresetStore::new(Box::new(kv));
        let presets = store.load().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].duration_secs, 5400);
    }
}
