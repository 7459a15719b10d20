use std::collections::{BTreeMap, BTreeSet};

use roster_core::{Category, RecencyWindow, RosterRow, RosterTable};

use crate::records::{CategoryRecord, TotalRecord};

/// Everything one export run publishes, borrowed from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    /// One entry per known category, in export order, possibly empty.
    pub by_category: BTreeMap<Category, Vec<CategoryRecord<'a>>>,
    /// Every categorized row, grouped by category order then row order.
    pub total: Vec<TotalRecord<'a>>,
    /// Unrecognized category labels, sorted and de-duplicated.
    pub unknown: Vec<String>,
}

/// Project the table into per-category records and the aggregate list.
///
/// Rows without a category are ignored. Rows with an unknown label are
/// excluded from every output and reported in [`Projection::unknown`].
#[must_use]
pub fn project(table: &RosterTable, window: RecencyWindow) -> Projection<'_> {
    let mut grouped: BTreeMap<Category, Vec<&RosterRow>> =
        Category::ALL.into_iter().map(|category| (category, Vec::new())).collect();
    let mut unknown = BTreeSet::new();

    for row in table {
        let Some(label) = row.category.as_deref() else {
            continue;
        };
        match Category::from_label(label) {
            Some(category) => grouped.entry(category).or_default().push(row),
            None => {
                unknown.insert(label.to_string());
            }
        }
    }

    let unknown: Vec<String> = unknown.into_iter().collect();
    if !unknown.is_empty() {
        tracing::warn!(labels = ?unknown, "unknown categories ignored");
    }

    let total = grouped
        .iter()
        .flat_map(|(category, rows)| {
            rows.iter()
                .copied()
                .map(move |row| TotalRecord::from_row(*category, row, window))
        })
        .collect();

    let by_category = grouped
        .into_iter()
        .map(|(category, rows)| {
            let records = rows
                .into_iter()
                .map(|row| CategoryRecord::from_row(category, row))
                .collect();
            (category, records)
        })
        .collect();

    Projection {
        by_category,
        total,
        unknown,
    }
}
