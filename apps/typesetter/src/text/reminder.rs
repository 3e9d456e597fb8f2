use crate::text::segmenter::{SegmenterConfig, SpanCategory, TextSpan};

/// Re-segments every reminder span with `mana_in_reminder` so embedded symbols
/// become `mana` spans while the surrounding text keeps the reminder category.
/// Other spans pass through unchanged.
pub fn split_reminders(spans: Vec<TextSpan>, mana_in_reminder: &SegmenterConfig) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.category == SpanCategory::Reminder {
            out.extend(mana_in_reminder.segment(&span.text));
        } else {
            out.push(span);
        }
    }
    out
}

/// Drops reminder spans entirely, for templates printed without reminder text.
pub fn strip_reminders(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    spans
        .into_iter()
        .filter(|s| s.category != SpanCategory::Reminder)
        .collect()
}
