//! Type-code dispatch.
//!
//! A [`DispatchTable`] maps a record's `local_type` to the ordered list of
//! enrichers that run for it. The table is built once per decoder from a
//! [`DecoderConfig`] and never changes afterwards.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::config::DecoderConfig;
//! use wxdecode::dispatch::DispatchTable;
//! use wxdecode::enrich::Enricher;
//! use wxdecode::kind::QUOTE_TYPE;
//!
//! let table = DispatchTable::from_config(&DecoderConfig::default());
//! assert_eq!(table.route(3), &[Enricher::Image]);
//! assert_eq!(table.route(QUOTE_TYPE), &[Enricher::Quote]);
//! assert!(table.route(1).is_empty());
//! ```

use std::collections::HashMap;

use tracing::trace;

use crate::config::DecoderConfig;
use crate::enrich::Enricher;
use crate::kind::{
    ANIMATED_EMOJI_TYPE, IMAGE_TYPE, LOCATION_TYPE, MERGED_MESSAGE_TYPE, PAT_TYPE, QUOTE_TYPE,
    RED_ENVELOPE_TYPE, VIDEO_TYPE, VOICE_TYPE, VOIP_TYPE,
};

/// Fixed routes. Application-message codes are added from configuration.
const FIXED_ROUTES: &[(i64, &[Enricher])] = &[
    (VIDEO_TYPE, &[Enricher::Video]),
    (VOIP_TYPE, &[Enricher::Voip]),
    (IMAGE_TYPE, &[Enricher::Image]),
    (VOICE_TYPE, &[Enricher::Voice]),
    (ANIMATED_EMOJI_TYPE, &[Enricher::AnimatedEmoji]),
    (LOCATION_TYPE, &[Enricher::Location]),
    (MERGED_MESSAGE_TYPE, &[Enricher::MergedTranscript]),
    (RED_ENVELOPE_TYPE, &[Enricher::RedEnvelope]),
    (PAT_TYPE, &[Enricher::Pat]),
    (QUOTE_TYPE, &[Enricher::Quote]),
];

/// Mapping from type code to enrichers, in run order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    routes: HashMap<i64, Vec<Enricher>>,
}

impl DispatchTable {
    /// Builds the table for `config`.
    ///
    /// Application-message codes get an app-share pass. A code that also
    /// has a fixed route runs it after the fixed enricher.
    pub fn from_config(config: &DecoderConfig) -> Self {
        let mut routes: HashMap<i64, Vec<Enricher>> = FIXED_ROUTES
            .iter()
            .map(|(code, enrichers)| (*code, enrichers.to_vec()))
            .collect();

        for &code in &config.app_message_types {
            let enrichers = routes.entry(code).or_default();
            if !enrichers.contains(&Enricher::AppShare) {
                enrichers.push(Enricher::AppShare);
            }
        }

        Self { routes }
    }

    /// Returns the enrichers for `type_code`. Unknown codes get none.
    pub fn route(&self, type_code: i64) -> &[Enricher] {
        let enrichers = self.routes.get(&type_code).map_or(&[][..], Vec::as_slice);
        trace!(type_code, enrichers = ?enrichers, "dispatch");
        enrichers
    }

    /// Number of routed type codes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::from_config(&DecoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::DEFAULT_APP_MESSAGE_TYPES;

    #[test]
    fn test_fixed_routes() {
        let table = DispatchTable::default();
        assert_eq!(table.route(VIDEO_TYPE), &[Enricher::Video]);
        assert_eq!(table.route(VOIP_TYPE), &[Enricher::Voip]);
        assert_eq!(table.route(VOICE_TYPE), &[Enricher::Voice]);
        assert_eq!(table.route(ANIMATED_EMOJI_TYPE), &[Enricher::AnimatedEmoji]);
        assert_eq!(table.route(LOCATION_TYPE), &[Enricher::Location]);
        assert_eq!(table.route(MERGED_MESSAGE_TYPE), &[Enricher::MergedTranscript]);
        assert_eq!(table.route(RED_ENVELOPE_TYPE), &[Enricher::RedEnvelope]);
        assert_eq!(table.route(PAT_TYPE), &[Enricher::Pat]);
    }

    #[test]
    fn test_quote_runs_only_quote_enricher() {
        let table = DispatchTable::default();
        assert_eq!(table.route(QUOTE_TYPE), &[Enricher::Quote]);
    }

    #[test]
    fn test_quote_in_app_set_runs_both_in_order() {
        let config = DecoderConfig::new().with_app_message_type(QUOTE_TYPE);
        let table = DispatchTable::from_config(&config);
        assert_eq!(table.route(QUOTE_TYPE), &[Enricher::Quote, Enricher::AppShare]);
    }

    #[test]
    fn test_app_message_types() {
        let table = DispatchTable::default();
        for code in DEFAULT_APP_MESSAGE_TYPES {
            assert_eq!(table.route(code), &[Enricher::AppShare], "code {code}");
        }
        assert_eq!(table.len(), FIXED_ROUTES.len() + DEFAULT_APP_MESSAGE_TYPES.len());
    }

    #[test]
    fn test_unknown_codes_route_nowhere() {
        let table = DispatchTable::default();
        assert!(table.route(1).is_empty());
        assert!(table.route(10000).is_empty());
        assert!(table.route(-1).is_empty());
    }

    #[test]
    fn test_configured_app_type() {
        let config = DecoderConfig::new().with_app_message_type(4242);
        let table = DispatchTable::from_config(&config);
        assert_eq!(table.route(4242), &[Enricher::AppShare]);
    }

    #[test]
    fn test_app_type_appends_to_fixed_route() {
        let config = DecoderConfig::new()
            .with_app_message_type(IMAGE_TYPE)
            .with_app_message_type(IMAGE_TYPE);
        let table = DispatchTable::from_config(&config);
        assert_eq!(table.route(IMAGE_TYPE), &[Enricher::Image, Enricher::AppShare]);
    }
}
