//! Trailing entry sections: derivatives and etymology.

use crate::appledict::markup::{find_at_least_one, find_exactly_one, Node, Query};
use crate::appledict::types::error::{AppleDictError, Result};

use super::classes;

/// Words derived from the headword (`t_derivatives` section).
pub fn parse_derivatives(node: Node) -> Result<Vec<String>> {
    Ok(find_at_least_one(node, &Query::span(classes::DERIVATIVE))?
        .iter()
        .map(|word| word.trimmed_text())
        .collect())
}

/// The origin text of an `etym` section labelled exactly `ORIGIN`.
pub fn parse_origin(node: Node) -> Result<String> {
    let label = find_exactly_one(node, &Query::span(classes::ETYMOLOGY_LABEL).direct())?;
    let label_text = label.trimmed_text();
    if label_text != classes::ORIGIN_LABEL {
        return Err(AppleDictError::assumption(format!(
            "unexpected etymology label {:?}",
            label_text
        )));
    }

    let origin = find_exactly_one(node, &Query::span(classes::ORIGIN_TEXT))?;
    Ok(origin.trimmed_text())
}
