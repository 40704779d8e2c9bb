//! Pipeline selection from the touched file set.

use std::collections::BTreeSet;

use config_manager::PipelineRule;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;

/// Selects every pipeline whose pattern matches a touched path.
///
/// A pipeline is selected when **any** of its registered patterns matches
/// **any** path in `touched`. A name registered under several rules is
/// unioned across all of its patterns, and the resulting set carries no
/// duplicates.
///
/// The selection is a pure function of its inputs: the same rules and
/// touched set always produce the same result.
pub fn select_pipelines(
    rules: &[PipelineRule],
    touched: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut selected = BTreeSet::new();

    for rule in rules {
        if touched.iter().any(|path| rule.pattern.is_match(path)) {
            selected.insert(rule.name.clone());
        }
    }

    selected
}
