use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::MaskConfig;

const VOICES_KEY: &str = "voices";

/// A speech synthesis voice from the `voices` array.
///
/// All five fields are required. `isLocal` is read only when
/// `isLocalService` is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    /// BCP 47 language tag (`lang`).
    pub lang: String,
    /// Display name (`name`).
    pub name: String,
    /// Voice identifier (`voiceUri`).
    pub voice_uri: String,
    /// Whether this is the default voice (`isDefault`).
    pub is_default: bool,
    /// Whether synthesis runs locally (`isLocalService`).
    pub is_local_service: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVoice {
    lang: String,
    name: String,
    voice_uri: String,
    is_default: bool,
    is_local_service: Option<bool>,
    is_local: Option<bool>,
}

impl RawVoice {
    fn into_descriptor(self) -> Option<VoiceDescriptor> {
        Some(VoiceDescriptor {
            lang: self.lang,
            name: self.name,
            voice_uri: self.voice_uri,
            is_default: self.is_default,
            is_local_service: self.is_local_service.or(self.is_local)?,
        })
    }
}

impl MaskConfig {
    /// Reads the top-level `voices` array.
    ///
    /// Returns `None` if `voices` is missing or not an array. Entries with a
    /// missing or mistyped field are skipped; the remaining entries keep
    /// their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_config::MaskConfig;
    ///
    /// let config = MaskConfig::from_json_str(r#"{"voices": [
    ///     {"lang": "en-US", "name": "Alex", "voiceUri": "urn:alex", "isDefault": true, "isLocalService": true},
    ///     {"name": "Broken"}
    /// ]}"#);
    /// let voices = config.get_voice_list().unwrap();
    /// assert_eq!(voices.len(), 1);
    /// assert_eq!(voices[0].name, "Alex");
    /// ```
    pub fn get_voice_list(&self) -> Option<Vec<VoiceDescriptor>> {
        let entries = self.lookup(VOICES_KEY)?.as_array()?;
        let voices: Vec<VoiceDescriptor> = entries.iter().filter_map(decode_voice).collect();
        if voices.len() < entries.len() {
            debug!(
                skipped = entries.len() - voices.len(),
                "skipped malformed voice entries"
            );
        }
        Some(voices)
    }
}

fn decode_voice(entry: &Value) -> Option<VoiceDescriptor> {
    if !entry.is_object() {
        return None;
    }
    RawVoice::deserialize(entry).ok()?.into_descriptor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(lang: &str, name: &str) -> String {
        format!(
            r#"{{"lang": "{lang}", "name": "{name}", "voiceUri": "urn:{name}", "isDefault": false, "isLocalService": true}}"#
        )
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let json = format!(
            r#"{{"voices": [{}, {{"name": "NoLang", "voiceUri": "urn:x", "isDefault": false, "isLocalService": true}}, {}, {}]}}"#,
            voice("en-US", "Alex"),
            voice("de-DE", "Anna"),
            voice("fr-FR", "Thomas"),
        );
        let config = MaskConfig::from_json_str(&json);
        let names: Vec<_> = config
            .get_voice_list()
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["Alex", "Anna", "Thomas"]);
    }

    #[test]
    fn test_mistyped_fields_are_skipped() {
        let config = MaskConfig::from_json_str(
            r#"{"voices": [
                {"lang": "en", "name": "A", "voiceUri": "u", "isDefault": 1, "isLocalService": true},
                {"lang": 5, "name": "B", "voiceUri": "u", "isDefault": true, "isLocalService": true},
                ["en", "C", "u", true, true],
                "D",
                {"lang": "en", "name": "E", "voiceUri": "u", "isDefault": true, "isLocal": false}
            ]}"#,
        );
        let voices = config.get_voice_list().unwrap();
        assert_eq!(
            voices,
            vec![VoiceDescriptor {
                lang: "en".into(),
                name: "E".into(),
                voice_uri: "u".into(),
                is_default: true,
                is_local_service: false,
            }]
        );
    }

    #[test]
    fn test_local_service_wins_over_local() {
        let config = MaskConfig::from_json_str(
            r#"{"voices": [
                {"lang": "en", "name": "A", "voiceUri": "u", "isDefault": true, "isLocalService": true, "isLocal": false},
                {"lang": "en", "name": "B", "voiceUri": "u", "isDefault": true},
                {"lang": "en", "name": "C", "voiceUri": "u", "isDefault": true, "isLocal": true}
            ]}"#,
        );
        let voices = config.get_voice_list().unwrap();
        let summary: Vec<_> = voices
            .iter()
            .map(|v| (v.name.as_str(), v.is_local_service))
            .collect();
        assert_eq!(summary, vec![("A", true), ("C", true)]);
    }

    #[test]
    fn test_missing_or_non_array_voices() {
        assert!(MaskConfig::from_json_str("{}").get_voice_list().is_none());
        assert!(
            MaskConfig::from_json_str(r#"{"voices": {}}"#)
                .get_voice_list()
                .is_none()
        );
        assert_eq!(
            MaskConfig::from_json_str(r#"{"voices": []}"#).get_voice_list(),
            Some(vec![])
        );
    }
}
