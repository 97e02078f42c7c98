//! Senses (`se1`): a part-of-speech label plus a flat definition list.

use crate::appledict::markup::{find_at_most_one, Node, Query};
use crate::appledict::types::entry::Sense;
use crate::appledict::types::error::{AppleDictError, Result};

use super::classes::{self, SenseChild};
use super::definitions;

pub fn parse(node: Node) -> Result<Sense> {
    let pos = parse_pos(node)?;

    let has_sub_senses = !node.find_all(&Query::span(classes::SUB_SENSE)).is_empty();
    let definitions = if has_sub_senses {
        let mut flattened = Vec::new();
        for child in node.children() {
            match SenseChild::classify(&child)? {
                SenseChild::Label | SenseChild::Blank => continue,
                SenseChild::SubSense => flattened.extend(definitions::parse(child)?),
            }
        }
        flattened
    } else {
        definitions::parse(node)?
    };

    if definitions.is_empty() {
        return Err(AppleDictError::assumption(format!(
            "sense without definitions: {:?}",
            node.trimmed_text()
        )));
    }

    Ok(Sense { pos, definitions })
}

/// Several `tg_pos` spans are joined ("noun & verb" style); with none, an
/// optional `posg` group label is used instead.
fn parse_pos(node: Node) -> Result<Option<String>> {
    let pos_spans = node.find_all(&Query::span(classes::POS));
    let pos = match pos_spans.as_slice() {
        [] => find_at_most_one(node, &Query::span(classes::POS_GROUP))?.map(|p| p.trimmed_text()),
        [only] => Some(only.trimmed_text()),
        many => Some(
            many.iter()
                .map(|p| p.trimmed_text())
                .collect::<Vec<_>>()
                .join(" "),
        ),
    };
    Ok(pos)
}
