//! Record decoding.
//!
//! [`Decoder`] turns a [`MessageRecord`] into a [`DecodedMessage`]:
//!
//! 1. A machine-generated sender tag is stripped from the primary payload,
//!    and the remainder is split into sender and content.
//! 2. Both payloads are parsed into trees (failures are logged and skipped).
//! 3. The enrichers routed for the record's type code run in order, each
//!    filling one summary slot.
//!
//! Decoding never fails and never modifies the record. Decoding the same
//! record twice gives equal results.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::decoder::Decoder;
//! use wxdecode::MessageRecord;
//!
//! let decoder = Decoder::new();
//! let record = MessageRecord::new(3).with_message_content(
//!     r#"<msg><img cdnthumburl="thumb" cdnmidimgurl="mid" md5="abc"/></msg>"#,
//! );
//!
//! let decoded = decoder.decode(&record, "wxid_self");
//! let image = decoded.image.as_ref().unwrap();
//! assert_eq!(image.origin_url.as_deref(), Some("mid"));
//! assert_eq!(decoded.sender(), "wxid_self");
//! ```

use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::config::DecoderConfig;
use crate::dispatch::DispatchTable;
use crate::enrich::EnrichContext;
use crate::error::Result;
use crate::kind::MessageKind;
use crate::markup::{MarkupParser, XmlParser};
use crate::message::{DecodedMessage, MessageRecord};
use crate::resolver::PayloadCache;
use crate::split::{PrefixPatterns, split_sender_content, strip_automated_prefix};

/// Decodes message records.
///
/// Holds only immutable state, so one decoder can be shared across threads.
#[derive(Clone)]
pub struct Decoder {
    config: DecoderConfig,
    prefixes: PrefixPatterns,
    table: DispatchTable,
    parser: Arc<dyn MarkupParser>,
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Decoder {
    /// Creates a decoder with the default configuration and XML parser.
    pub fn new() -> Self {
        let config = DecoderConfig::default();
        Self {
            // Default patterns are known to compile.
            prefixes: PrefixPatterns::compile(&config.automated_prefix_patterns)
                .unwrap_or_default(),
            table: DispatchTable::from_config(&config),
            parser: Arc::new(XmlParser::new()),
            config,
        }
    }

    /// Creates a decoder with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidFormat`](crate::DecodeError::InvalidFormat)
    /// if an automated-prefix pattern is not a valid regex.
    pub fn with_config(config: DecoderConfig) -> Result<Self> {
        Ok(Self {
            prefixes: PrefixPatterns::compile(&config.automated_prefix_patterns)?,
            table: DispatchTable::from_config(&config),
            parser: Arc::new(XmlParser::new()),
            config,
        })
    }

    /// Replaces the markup parser.
    #[must_use]
    pub fn with_parser(mut self, parser: impl MarkupParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    /// Decodes one record. `fallback_sender` is used when the payload names
    /// no sender.
    pub fn decode(&self, record: &MessageRecord, fallback_sender: &str) -> DecodedMessage {
        let primary = record
            .message_content
            .as_deref()
            .map(|text| strip_automated_prefix(text, &self.prefixes));
        let data = split_sender_content(primary.unwrap_or_default(), fallback_sender);

        let mut cache = PayloadCache::new(
            self.parser.as_ref(),
            primary,
            record.compress_content.as_deref(),
        );
        cache.load_all();

        let mut out = DecodedMessage::from_record(record, data);
        out.kind = MessageKind::classify(record.local_type, &self.config.app_message_types);

        let mut ctx = EnrichContext {
            config: &self.config,
            parser: self.parser.as_ref(),
            primary,
            cache,
            out,
        };
        for enricher in self.table.route(record.local_type) {
            enricher.apply(&mut ctx);
        }

        let decoded = ctx.finish();
        debug!(
            local_id = ?decoded.local_id,
            local_type = decoded.local_type,
            kind = %decoded.kind,
            summaries = decoded.summary_count(),
            "decoded record"
        );
        decoded
    }

    /// Decodes a batch of records, preserving order.
    ///
    /// Records are decoded in parallel when the `parallel` feature is
    /// enabled.
    pub fn decode_all(
        &self,
        records: &[MessageRecord],
        fallback_sender: &str,
    ) -> Vec<DecodedMessage> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            records
                .par_iter()
                .map(|record| self.decode(record, fallback_sender))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            records
                .iter()
                .map(|record| self.decode(record, fallback_sender))
                .collect()
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_DECODER: LazyLock<Decoder> = LazyLock::new(Decoder::new);

/// Decodes one record with the default decoder.
///
/// ```rust
/// use wxdecode::{MessageRecord, decode_message};
///
/// let decoded = decode_message(&MessageRecord::new(1).with_message_content("alice:\nhi"), "me");
/// assert_eq!((decoded.sender(), decoded.content()), ("alice", "hi"));
/// ```
pub fn decode_message(record: &MessageRecord, fallback_sender: &str) -> DecodedMessage {
    DEFAULT_DECODER.decode(record, fallback_sender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{LOCATION_TYPE, QUOTE_TYPE, RED_ENVELOPE_TYPE, VOIP_TYPE};
    use crate::summary::CallMode;

    fn decode(local_type: i64, content: &str) -> DecodedMessage {
        Decoder::new().decode(
            &MessageRecord::new(local_type).with_message_content(content),
            "self",
        )
    }

    #[test]
    fn test_plain_text() {
        let decoded = decode(1, "alice:\n  hello");
        assert_eq!(decoded.sender(), "alice");
        assert_eq!(decoded.content(), "hello");
        assert_eq!(decoded.summary_count(), 0);
        assert_eq!(
            decoded.message_content,
            Some(crate::markup::Node::Text("alice:\n  hello".into()))
        );
    }

    #[test]
    fn test_automated_prefix_is_stripped_before_split() {
        let decoded = decode(
            LOCATION_TYPE,
            r#"wxid_abc:
<msg><location x="1" y="2" poiname="Park"/></msg>"#,
        );
        assert_eq!(decoded.sender(), "self");
        assert_eq!(decoded.content(), r#"<msg><location x="1" y="2" poiname="Park"/></msg>"#);
        assert_eq!(decoded.location.as_ref().map(|l| l.poiname.as_str()), Some("Park"));
    }

    #[test]
    fn test_quote_sets_only_quote() {
        let decoded = decode(
            QUOTE_TYPE,
            "<msg><appmsg><title>reply</title><refermsg><type>1</type>\
             <content>original</content><displayname>Bob</displayname></refermsg>\
             </appmsg></msg>",
        );
        assert_eq!(decoded.content(), "reply");
        let quote = decoded.quote.as_ref().unwrap();
        assert_eq!(quote.refer.content, "original");
        assert_eq!(quote.refer.content_text, "original");
        assert_eq!(quote.refer.refer_type.as_deref(), Some("1"));
        assert!(decoded.app_msg.is_none());
        assert_eq!(decoded.summary_count(), 1);
    }

    #[test]
    fn test_red_envelope_without_payinfo() {
        let decoded = decode(RED_ENVELOPE_TYPE, "<msg><appmsg><title>t</title></appmsg></msg>");
        assert!(decoded.red_envelope.is_none());
    }

    #[test]
    fn test_voip_mode() {
        let decoded = decode(
            VOIP_TYPE,
            "<voipmsg><VoIPBubbleMsg><msg>视频通话 00:12</msg></VoIPBubbleMsg></voipmsg>",
        );
        let voip = decoded.voip.as_ref().unwrap();
        assert_eq!(voip.mode, CallMode::Video);
        assert_eq!(voip.text, "视频通话 00:12");
    }

    #[test]
    fn test_invalid_prefix_pattern() {
        let config = DecoderConfig::new().with_automated_prefix_pattern("(");
        let err = Decoder::with_config(config).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_idempotent() {
        let decoder = Decoder::new();
        let record = MessageRecord::new(QUOTE_TYPE)
            .with_message_content("<msg><appmsg><title>x</title></appmsg></msg>");
        assert_eq!(decoder.decode(&record, "me"), decoder.decode(&record, "me"));
    }

    #[test]
    fn test_decode_all_preserves_order() {
        let records: Vec<_> = (0..50)
            .map(|i| {
                MessageRecord::new(1)
                    .with_local_id(i)
                    .with_message_content(format!("u{i}:\nm{i}"))
            })
            .collect();
        let decoded = Decoder::new().decode_all(&records, "me");
        for (i, message) in (0..50).zip(&decoded) {
            assert_eq!(message.local_id, Some(i));
            assert_eq!(message.content(), format!("m{i}"));
        }
    }

    #[test]
    fn test_decoder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();
    }
}
