//! Image, voice, animated emoji, and location enrichers.
//!
//! These read attributes of a single descriptor element, so they use the
//! document view of the payload rather than the tree.

use super::{EnrichContext, Enricher};
use crate::summary::{EmojiInfo, ImageInfo, LocationInfo, VoiceInfo};

pub(super) fn enrich_image(ctx: &mut EnrichContext<'_>) {
    let Some(text) = ctx.primary else { return };
    let Some(doc) = ctx.document(text, Enricher::Image) else {
        return;
    };
    let Some(img) = doc.select("img") else { return };

    let attr = |name: &str| img.attr(name).map(str::to_string);
    ctx.out.image = Some(ImageInfo {
        thumb_url: attr("cdnthumburl"),
        origin_url: img
            .attr("cdnmidimgurl")
            .filter(|v| !v.is_empty())
            .or_else(|| img.attr("cdnthumbaeskey"))
            .map(str::to_string),
        file_key: attr("filekey"),
        md5: attr("md5"),
    });
}

pub(super) fn enrich_voice(ctx: &mut EnrichContext<'_>) {
    let Some(text) = ctx.primary else { return };
    let Some(doc) = ctx.document(text, Enricher::Voice) else {
        return;
    };
    let Some(voice) = doc.select("voicemsg") else {
        return;
    };

    ctx.out.voice = Some(VoiceInfo {
        length: voice.attr("voicelength").map(str::to_string),
        format: voice.attr("voiceformat").map(str::to_string),
        end_flag: voice.attr("endflag").map(str::to_string),
    });
}

pub(super) fn enrich_emoji(ctx: &mut EnrichContext<'_>) {
    let Some(doc) = ctx
        .primary_or_content()
        .and_then(|text| ctx.document(text, Enricher::AnimatedEmoji))
    else {
        return;
    };
    let Some(emoji) = doc.select("emoji") else {
        return;
    };

    ctx.out.emoji = Some(EmojiInfo {
        url: emoji.attr("cdnurl").map(str::to_string),
        md5: emoji.attr("md5").map(str::to_string),
        width: parse_dimension(emoji.attr("width")),
        height: parse_dimension(emoji.attr("height")),
        desc: emoji.attr("alt").unwrap_or_default().to_string(),
    });
}

pub(super) fn enrich_location(ctx: &mut EnrichContext<'_>) {
    let Some(doc) = ctx
        .primary_or_content()
        .and_then(|text| ctx.document(text, Enricher::Location))
    else {
        return;
    };
    let Some(location) = doc.select("location") else {
        return;
    };

    let attr = |name: &str| location.attr(name).unwrap_or_default().to_string();
    let label = attr("label");
    let poiname = location
        .attr("poiname")
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| label.clone());

    if ctx.out.data.content.is_empty() {
        ctx.out.data.content = [poiname.as_str(), label.as_str()]
            .into_iter()
            .find(|v| !v.is_empty())
            .unwrap_or(ctx.config.location_label.as_str())
            .to_string();
    }
    ctx.out.location = Some(LocationInfo {
        x: attr("x"),
        y: attr("y"),
        scale: attr("scale"),
        label,
        poiname,
    });
}

/// Parses a pixel dimension, treating missing or invalid values as 0.
#[allow(clippy::cast_sign_loss)]
fn parse_dimension(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u32)
        .unwrap_or(0)
}
