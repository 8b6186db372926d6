//! Video and voice/video-call enrichers.

use tracing::warn;

use super::{EnrichContext, Enricher};
use crate::markup::Node;
use crate::summary::{CallMode, VoipInfo};
use crate::text::normalize;

/// Places a call record may keep its display text, in lookup order.
const CALL_TEXT_PATHS: [&[&str]; 3] = [
    &["voipmsg", "VoIPBubbleMsg", "msg"],
    &["voipinvitemsg", "display_content"],
    &["voiplocalinfo", "display_content"],
];

const CALL_DURATION_PATHS: [&[&str]; 2] = [
    &["voipinvitemsg", "duration"],
    &["voiplocalinfo", "duration"],
];

pub(super) fn enrich_video(ctx: &mut EnrichContext<'_>) {
    if ctx.out.data.content.is_empty() {
        return;
    }
    match ctx.parser.parse_tree(&ctx.out.data.content) {
        Ok(tree) => ctx.out.video = Some(tree),
        Err(error) => {
            warn!(
                enricher = Enricher::Video.as_str(),
                %error,
                "video descriptor is not well-formed"
            );
        }
    }
}

pub(super) fn enrich_voip(ctx: &mut EnrichContext<'_>) {
    let Some(tree) = ctx.cache.primary() else {
        return;
    };

    let text = match first_present(tree, &CALL_TEXT_PATHS) {
        Some(node) => normalize(Some(node)),
        None => ctx.out.data.content.clone(),
    };
    if text.is_empty() {
        return;
    }
    let duration = normalize(first_present(tree, &CALL_DURATION_PATHS));

    ctx.out.voip = Some(VoipInfo {
        mode: call_mode(&text),
        text,
        duration,
    });
}

fn first_present<'t>(tree: &'t Node, paths: &[&[&str]]) -> Option<&'t Node> {
    paths
        .iter()
        .filter_map(|path| tree.path(path))
        .find(|node| !node.is_empty_text())
}

/// Infers the call mode from its display text. Defaults to voice.
fn call_mode(text: &str) -> CallMode {
    let lower = text.to_lowercase();
    if lower.contains("视频") || lower.contains("video") {
        CallMode::Video
    } else {
        CallMode::Voice
    }
}
