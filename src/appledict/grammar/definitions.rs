//! Definition lists: the `msDict` sense entries below a sense, sub-sense or
//! phrase group.

use crate::appledict::markup::{find_at_least_one, find_at_most_one, find_exactly_one, Node, Query};
use crate::appledict::types::entry::{Definition, Meaning, ReferenceDefinition};
use crate::appledict::types::error::{AppleDictError, Result};

use super::classes;

/// Parses every sense entry below `node`, in document order.
///
/// A modifier span (`gg`) that is not inside any sense entry applies to all
/// definitions of the list; a modifier that is a direct child of a sense
/// entry overrides it for that definition only. References always take the
/// list-wide modifier.
pub fn parse(node: Node) -> Result<Vec<Meaning>> {
    let global_modifier = node
        .find_all(&Query::span(classes::MODIFIER).outside(classes::SENSE_ENTRY))
        .first()
        .and_then(non_empty_text);

    find_at_least_one(node, &Query::span(classes::SENSE_ENTRY))?
        .into_iter()
        .map(|entry| parse_sense_entry(entry, global_modifier.as_deref()))
        .collect()
}

fn parse_sense_entry(entry: Node, global_modifier: Option<&str>) -> Result<Meaning> {
    let mut definition_spans = entry.find_all(&Query::span(classes::DEFINITION));
    if definition_spans.len() > 1 {
        return Err(AppleDictError::assumption(format!(
            "sense entry has {} definition spans: {:?}",
            definition_spans.len(),
            entry.trimmed_text()
        )));
    }

    match definition_spans.pop() {
        Some(definition_span) => {
            let examples = entry
                .find_all(&Query::span(classes::EXAMPLE))
                .iter()
                .map(|e| clean_example(&e.text()))
                .collect();
            let topic = find_at_most_one(entry, &Query::span(classes::TOPIC))?.map(|t| t.trimmed_text());
            let local_modifier = entry
                .find_all(&Query::span(classes::MODIFIER).direct())
                .first()
                .and_then(non_empty_text);
            let date = find_at_most_one(definition_span, &Query::span(classes::DATE))?
                .map(|d| d.trimmed_text());

            Ok(Meaning::Definition(Definition {
                pos_modifier: local_modifier.or_else(|| global_modifier.map(str::to_string)),
                text: definition_span.trimmed_text(),
                examples,
                topic,
                date,
            }))
        }
        None => {
            let group = find_exactly_one(entry, &Query::span(classes::XREF_GROUP))?;
            let term = find_exactly_one(group, &Query::span(classes::XREF))?;
            Ok(Meaning::Reference(ReferenceDefinition {
                pos_modifier: global_modifier.map(str::to_string),
                reference: term.trimmed_text(),
            }))
        }
    }
}

fn non_empty_text(node: &Node) -> Option<String> {
    Some(node.trimmed_text()).filter(|t| !t.is_empty())
}

/// Trims an example and drops one trailing colon.
fn clean_example(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(':').unwrap_or(trimmed).trim().to_string()
}
