//! Message type codes and their semantic kinds.
//!
//! Type codes are the client's packed identifiers; the low 32 bits carry the
//! base type and the high bits a sub-type. They are taken as given.

use serde::{Deserialize, Serialize};

pub const TEXT_TYPE: i64 = 1;
pub const IMAGE_TYPE: i64 = 3;
pub const VOICE_TYPE: i64 = 34;
pub const VIDEO_TYPE: i64 = 43;
pub const ANIMATED_EMOJI_TYPE: i64 = 47;
pub const LOCATION_TYPE: i64 = 48;
pub const VOIP_TYPE: i64 = 50;
pub const SYSTEM_TYPE: i64 = 10000;
pub const MERGED_MESSAGE_TYPE: i64 = 81604378673;
pub const QUOTE_TYPE: i64 = 244813135921;
pub const PAT_TYPE: i64 = 266287972401;
pub const RED_ENVELOPE_TYPE: i64 = 8594229559345;

/// Type codes of card-style application messages.
pub const DEFAULT_APP_MESSAGE_TYPES: [i64; 9] = [
    17179869233,
    21474836529,
    12884901937,
    4294967345,
    292057776177,
    326417514545,
    141733920817,
    154618822705,
    103079215153,
];

/// Semantic kind of a message, derived from its type code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MessageKind {
    Text,
    Image,
    Voice,
    Video,
    AnimatedEmoji,
    Location,
    Call,
    System,
    MergedTranscript,
    Quote,
    Pat,
    RedEnvelope,
    AppShare,
    #[default]
    Unknown,
}

impl MessageKind {
    /// Classifies a type code against the given application-message set.
    ///
    /// ```rust
    /// use wxdecode::kind::{MessageKind, DEFAULT_APP_MESSAGE_TYPES};
    ///
    /// assert_eq!(MessageKind::classify(3, &DEFAULT_APP_MESSAGE_TYPES), MessageKind::Image);
    /// assert_eq!(MessageKind::classify(4294967345, &DEFAULT_APP_MESSAGE_TYPES), MessageKind::AppShare);
    /// assert_eq!(MessageKind::classify(-1, &DEFAULT_APP_MESSAGE_TYPES), MessageKind::Unknown);
    /// ```
    pub fn classify(type_code: i64, app_message_types: &[i64]) -> Self {
        match type_code {
            TEXT_TYPE => MessageKind::Text,
            IMAGE_TYPE => MessageKind::Image,
            VOICE_TYPE => MessageKind::Voice,
            VIDEO_TYPE => MessageKind::Video,
            ANIMATED_EMOJI_TYPE => MessageKind::AnimatedEmoji,
            LOCATION_TYPE => MessageKind::Location,
            VOIP_TYPE => MessageKind::Call,
            SYSTEM_TYPE => MessageKind::System,
            MERGED_MESSAGE_TYPE => MessageKind::MergedTranscript,
            QUOTE_TYPE => MessageKind::Quote,
            PAT_TYPE => MessageKind::Pat,
            RED_ENVELOPE_TYPE => MessageKind::RedEnvelope,
            code if app_message_types.contains(&code) => MessageKind::AppShare,
            _ => MessageKind::Unknown,
        }
    }

    /// Returns the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Voice => "voice",
            MessageKind::Video => "video",
            MessageKind::AnimatedEmoji => "animated_emoji",
            MessageKind::Location => "location",
            MessageKind::Call => "call",
            MessageKind::System => "system",
            MessageKind::MergedTranscript => "merged_transcript",
            MessageKind::Quote => "quote",
            MessageKind::Pat => "pat",
            MessageKind::RedEnvelope => "red_envelope",
            MessageKind::AppShare => "app_share",
            MessageKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a packed type code into `(base_type, sub_type)`.
///
/// ```rust
/// use wxdecode::kind::split_type_code;
///
/// assert_eq!(split_type_code(244813135921), (49, 57));
/// assert_eq!(split_type_code(3), (3, 0));
/// ```
pub fn split_type_code(type_code: i64) -> (i64, i64) {
    (type_code & 0xFFFF_FFFF, type_code >> 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_special_codes() {
        let app = &DEFAULT_APP_MESSAGE_TYPES;
        assert_eq!(MessageKind::classify(QUOTE_TYPE, app), MessageKind::Quote);
        assert_eq!(MessageKind::classify(PAT_TYPE, app), MessageKind::Pat);
        assert_eq!(MessageKind::classify(VOIP_TYPE, app), MessageKind::Call);
        assert_eq!(
            MessageKind::classify(RED_ENVELOPE_TYPE, app),
            MessageKind::RedEnvelope
        );
    }

    #[test]
    fn test_classify_app_set_is_configurable() {
        assert_eq!(MessageKind::classify(777, &[777]), MessageKind::AppShare);
        assert_eq!(MessageKind::classify(777, &[]), MessageKind::Unknown);
    }

    #[test]
    fn test_app_types_share_base_type() {
        for code in DEFAULT_APP_MESSAGE_TYPES {
            assert_eq!(split_type_code(code).0, 49);
        }
        assert_eq!(split_type_code(MERGED_MESSAGE_TYPE), (49, 19));
    }

    #[test]
    fn test_display() {
        assert_eq!(MessageKind::MergedTranscript.to_string(), "merged_transcript");
    }
}
