//! Kind-specific enrichers.
//!
//! Each enricher reads from the record's payloads and writes one summary
//! slot of the [`DecodedMessage`] under construction, sometimes also
//! refining `data.content`. Enrichers never fail: a missing payload, a
//! missing node, or a parse failure leaves the slot `None`. Parse failures
//! are logged at `warn`.

mod attachment;
mod call;
mod card;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::DecoderConfig;
use crate::markup::{Document, MarkupParser};
use crate::message::DecodedMessage;
use crate::resolver::PayloadCache;

/// Identifies one enricher in the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enricher {
    Video,
    Voip,
    Image,
    Voice,
    AnimatedEmoji,
    Location,
    MergedTranscript,
    RedEnvelope,
    Pat,
    Quote,
    AppShare,
}

impl Enricher {
    /// Runs this enricher against `ctx`.
    pub(crate) fn apply(self, ctx: &mut EnrichContext<'_>) {
        match self {
            Enricher::Video => call::enrich_video(ctx),
            Enricher::Voip => call::enrich_voip(ctx),
            Enricher::Image => attachment::enrich_image(ctx),
            Enricher::Voice => attachment::enrich_voice(ctx),
            Enricher::AnimatedEmoji => attachment::enrich_emoji(ctx),
            Enricher::Location => attachment::enrich_location(ctx),
            Enricher::MergedTranscript => card::enrich_merged(ctx),
            Enricher::RedEnvelope => card::enrich_red_envelope(ctx),
            Enricher::Pat => card::enrich_pat(ctx),
            Enricher::Quote => card::enrich_quote(ctx),
            Enricher::AppShare => card::enrich_app_share(ctx),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Enricher::Video => "video",
            Enricher::Voip => "voip",
            Enricher::Image => "image",
            Enricher::Voice => "voice",
            Enricher::AnimatedEmoji => "animated_emoji",
            Enricher::Location => "location",
            Enricher::MergedTranscript => "merged_transcript",
            Enricher::RedEnvelope => "red_envelope",
            Enricher::Pat => "pat",
            Enricher::Quote => "quote",
            Enricher::AppShare => "app_share",
        }
    }
}

/// State shared by the enrichers of one record.
pub(crate) struct EnrichContext<'a> {
    pub config: &'a DecoderConfig,
    pub parser: &'a dyn MarkupParser,
    /// Primary payload after automated-prefix stripping.
    pub primary: Option<&'a str>,
    pub cache: PayloadCache<'a>,
    pub out: DecodedMessage,
}

impl<'a> EnrichContext<'a> {
    /// Primary payload, or the derived content when there is none.
    fn primary_or_content(&self) -> Option<&str> {
        match self.primary {
            Some(text) if !text.is_empty() => Some(text),
            _ => Some(self.out.data.content.as_str()).filter(|s| !s.is_empty()),
        }
    }

    /// Parses `text` as a document, logging failures.
    fn document(&self, text: &str, enricher: Enricher) -> Option<Document> {
        match self.parser.parse_document(text) {
            Ok(doc) => Some(doc),
            Err(error) => {
                warn!(enricher = enricher.as_str(), %error, "payload has no usable markup");
                None
            }
        }
    }

    /// Moves the cached trees into the output and returns it.
    pub fn finish(self) -> DecodedMessage {
        let (message_content, compress_content) = self.cache.into_trees();
        DecodedMessage {
            message_content,
            compress_content,
            ..self.out
        }
    }
}
