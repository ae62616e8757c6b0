//! Headless audio model. The engine tracks registered sounds, volumes and
//! the music channel pair; actual playback happens in the host, which
//! drains an [`AudioCommand`] batch every frame.

use std::collections::HashMap;

/// Channels 0 and 1 are reserved for music crossover; effects play on
/// host-chosen free channels.
pub const MUSIC_CHANNELS: [u32; 2] = [0, 1];

/// Commands for the host mixer, in emit order.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    PlaySound { name: String },
    PlayMusic { name: String, channel: u32, looped: bool },
    StopChannel { channel: u32 },
    SetMusicVolume(f32),
    SetSoundVolume(f32),
}

/// Registered sound metadata.
#[derive(Debug, Clone)]
struct Sound {
    music: bool,
}

/// The engine-side mixer state.
pub struct AudioMixer {
    sounds: HashMap<String, Sound>,
    /// Index into MUSIC_CHANNELS of the channel playing current music.
    active_music: usize,
    playing_music: Option<String>,
    music_volume: f32,
    sound_volume: f32,
    commands: Vec<AudioCommand>,
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            sounds: HashMap::new(),
            active_music: 0,
            playing_music: None,
            music_volume: 1.0,
            sound_volume: 1.0,
            commands: Vec::new(),
        }
    }

    pub fn register_sound(&mut self, name: &str, music: bool) {
        self.sounds.insert(name.to_string(), Sound { music });
    }

    /// Play a one-shot effect. Unknown names log and do nothing.
    pub fn play_sound(&mut self, name: &str) {
        if !self.sounds.contains_key(name) {
            log::warn!("play_sound: unknown sound '{}'", name);
            return;
        }
        self.commands.push(AudioCommand::PlaySound {
            name: name.to_string(),
        });
    }

    /// Switch music: the previous track's channel stops and the other
    /// reserved channel takes over. Re-requesting the playing track is a
    /// no-op.
    pub fn switch_music(&mut self, name: &str, looped: bool) {
        if !self.sounds.get(name).map(|s| s.music).unwrap_or(false) {
            log::warn!("switch_music: '{}' is not a registered music track", name);
            return;
        }
        if self.playing_music.as_deref() == Some(name) {
            return;
        }
        let old = MUSIC_CHANNELS[self.active_music];
        self.active_music = 1 - self.active_music;
        let new = MUSIC_CHANNELS[self.active_music];
        if self.playing_music.is_some() {
            self.commands.push(AudioCommand::StopChannel { channel: old });
        }
        self.commands.push(AudioCommand::PlayMusic {
            name: name.to_string(),
            channel: new,
            looped,
        });
        self.playing_music = Some(name.to_string());
    }

    pub fn stop_music(&mut self) {
        if self.playing_music.take().is_some() {
            self.commands.push(AudioCommand::StopChannel {
                channel: MUSIC_CHANNELS[self.active_music],
            });
        }
    }

    pub fn playing_music(&self) -> Option<&str> {
        self.playing_music.as_deref()
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sound_volume(&self) -> f32 {
        self.sound_volume
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        self.commands
            .push(AudioCommand::SetMusicVolume(self.music_volume));
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
        self.commands
            .push(AudioCommand::SetSoundVolume(self.sound_volume));
    }

    /// Take this frame's command batch.
    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_music_alternates_channels() {
        let mut mixer = AudioMixer::new();
        mixer.register_sound("a", true);
        mixer.register_sound("b", true);

        mixer.switch_music("a", true);
        mixer.switch_music("b", true);
        let commands = mixer.drain();

        // First play, then stop of the first channel plus the second play.
        let channels: Vec<u32> = commands
            .iter()
            .filter_map(|c| match c {
                AudioCommand::PlayMusic { channel, .. } => Some(*channel),
                _ => None,
            })
            .collect();
        assert_eq!(channels.len(), 2);
        assert_ne!(channels[0], channels[1]);
        assert!(commands
            .iter()
            .any(|c| matches!(c, AudioCommand::StopChannel { channel } if *channel == channels[0])));
    }

    #[test]
    fn same_track_is_not_restarted() {
        let mut mixer = AudioMixer::new();
        mixer.register_sound("a", true);
        mixer.switch_music("a", true);
        mixer.drain();
        mixer.switch_music("a", true);
        assert!(mixer.drain().is_empty());
    }

    #[test]
    fn effects_are_rejected_as_music() {
        let mut mixer = AudioMixer::new();
        mixer.register_sound("click", false);
        mixer.switch_music("click", true);
        assert!(mixer.drain().is_empty());
        assert_eq!(mixer.playing_music(), None);
    }

    #[test]
    fn volumes_are_clamped() {
        let mut mixer = AudioMixer::new();
        mixer.set_music_volume(1.5);
        mixer.set_sound_volume(-0.2);
        assert_eq!(mixer.music_volume(), 1.0);
        assert_eq!(mixer.sound_volume(), 0.0);
    }

    #[test]
    fn unknown_sound_is_ignored() {
        let mut mixer = AudioMixer::new();
        mixer.play_sound("nope");
        assert!(mixer.drain().is_empty());
    }
}
