//! Enrichers backed by the application-message node (`msg/appmsg`).

use super::EnrichContext;
use crate::markup::Node;
use crate::summary::{
    AppMessageInfo, MergeInfo, PatInfo, QuoteInfo, RedEnvelopeInfo, ReferInfo, WeappInfo,
};
use crate::text::{field, normalize, optional_field};

/// Places a merged transcript may keep its record list, in lookup order.
const RECORD_PATHS: [&[&str]; 4] = [
    &["recorditem"],
    &["recordinfo"],
    &["mmreader", "recorditem"],
    &["mmreader", "recordinfo"],
];

pub(super) fn enrich_merged(ctx: &mut EnrichContext<'_>) {
    let Some(app) = ctx.cache.resolve() else { return };

    let title = non_empty(field(app.node, "title"))
        .unwrap_or_else(|| ctx.config.chat_history_label.clone());
    let record = RECORD_PATHS
        .iter()
        .filter_map(|path| app.node.path(path))
        .find(|node| !node.is_empty_text())
        .cloned();

    if ctx.out.data.content.is_empty() {
        ctx.out.data.content.clone_from(&title);
    }
    ctx.out.merge = Some(MergeInfo {
        title,
        desc: field(app.node, "des"),
        record,
    });
}

pub(super) fn enrich_red_envelope(ctx: &mut EnrichContext<'_>) {
    let Some(app) = ctx.cache.resolve() else { return };
    let Some(info) = app.get("wcpayinfo") else { return };

    let title = non_empty(field(info, "receivertitle"))
        .or_else(|| non_empty(field(app.node, "title")))
        .unwrap_or_else(|| ctx.config.red_envelope_label.clone());

    ctx.out.red_envelope = Some(RedEnvelopeInfo {
        title,
        icon_url: field(info, "iconurl"),
        inner_type: parse_code(&field(info, "innertype")),
    });
}

pub(super) fn enrich_pat(ctx: &mut EnrichContext<'_>) {
    let Some(app) = ctx.cache.resolve() else { return };

    let patinfo = app.get("patinfo");
    let pat = PatInfo {
        title: field(app.node, "title"),
        template: normalize(patinfo.and_then(|p| p.get("template"))),
        from: patinfo.and_then(|p| optional_field(p, "fromusername")),
        to: patinfo.and_then(|p| optional_field(p, "pattedusername")),
    };

    if ctx.out.data.content.is_empty() {
        ctx.out.data.content = if pat.template.is_empty() {
            pat.title.clone()
        } else {
            pat.template.clone()
        };
    }
    ctx.out.pat = Some(pat);
}

pub(super) fn enrich_quote(ctx: &mut EnrichContext<'_>) {
    let Some(app) = ctx.cache.resolve() else { return };

    if let Some(title) = non_empty(field(app.node, "title")) {
        ctx.out.data.content = title;
    }

    if let Some(refer) = app.get("refermsg") {
        let content = field(refer, "content");
        ctx.out.quote = Some(QuoteInfo {
            refer: ReferInfo {
                refer_type: optional_field(refer, "type"),
                content_text: content.clone(),
                content,
                displayname: field(refer, "displayname"),
                svrid: optional_field(refer, "svrid"),
            },
        });
    }
}

pub(super) fn enrich_app_share(ctx: &mut EnrichContext<'_>) {
    let Some(app) = ctx.cache.resolve() else { return };
    let node = app.node;

    let sourcedisplayname = field(node, "sourcedisplayname");
    let cover = non_empty(field(node, "thumburl")).unwrap_or_else(|| {
        normalize(node.path(&["mmreader", "template_header", "icon_url"]))
    });
    let appname = non_empty(normalize(app.app_info().and_then(|info| info.get("appname"))))
        .unwrap_or_else(|| sourcedisplayname.clone());

    ctx.out.app_msg = Some(AppMessageInfo {
        title: field(node, "title"),
        desc: field(node, "des"),
        url: field(node, "url"),
        cover,
        appname,
        sourcedisplayname,
        weapp: node.get("weappinfo").map(weapp_info),
    });
}

fn weapp_info(info: &Node) -> WeappInfo {
    WeappInfo {
        appid: info
            .attr("appid")
            .map(str::to_string)
            .unwrap_or_else(|| field(info, "appid")),
        username: field(info, "username"),
        pagepath: field(info, "pagepath"),
        icon: field(info, "weappiconurl"),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Reads a numeric code, truncating fractional forms like `1.0`.
fn parse_code(text: &str) -> i64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v as i64)
        .unwrap_or(0)
}
