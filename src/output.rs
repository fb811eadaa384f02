use crate::record::{CollectionResult, ResourceKind};

/// Renders the accumulated records as line-protocol sections. Section
/// order is the fixed kind priority, never completion order, so identical
/// API responses always produce identical bytes.
///
/// Kinds with no records and no Ok job are omitted entirely: a consumer
/// infers an unavailable feature from the absence of its section, not
/// from an empty one. Failures never reach stdout.
pub fn render(result: &CollectionResult) -> String {
    let mut out = String::new();

    for kind in ResourceKind::SECTION_ORDER {
        let mut records = result.records_for(kind).peekable();
        if records.peek().is_none() && !result.has_ok(kind) {
            continue;
        }

        out.push_str(&format!("<<<cloudflare_{}>>>\n", kind.section()));
        for record in records {
            out.push_str(&format!("{}\n", record));
        }
        out.push('\n');
    }

    out
}
