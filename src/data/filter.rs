use std::fmt;

use super::model::{CellValue, Dataset, CATEGORY, REGION, SEGMENT};

// ---------------------------------------------------------------------------
// Selectors: one optional equality constraint per categorical column
// ---------------------------------------------------------------------------

/// A single column constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    /// No constraint.
    #[default]
    All,
    /// Keep rows whose cell equals this value.
    Only(CellValue),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => write!(f, "All"),
            Selector::Only(v) => write!(f, "{v}"),
        }
    }
}

impl Selector {
    /// Parse a selector from user text: `All` (or nothing) is no constraint,
    /// anything else is typed the way the CSV loader types cells.
    pub fn parse(text: Option<&str>) -> Selector {
        match text {
            None | Some("All") => Selector::All,
            Some(value) => Selector::Only(CellValue::infer(value)),
        }
    }
}

/// The three dashboard selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub region: Selector,
    pub category: Selector,
    pub segment: Selector,
}

impl Selection {
    /// `(column, selector)` pairs in display order.
    pub fn constraints(&self) -> [(&'static str, &Selector); 3] {
        [
            (REGION, &self.region),
            (CATEGORY, &self.category),
            (SEGMENT, &self.segment),
        ]
    }
}

/// Options offered for a selector: `All` followed by the sorted distinct
/// values of the column in the unfiltered dataset.
pub fn selector_options(dataset: &Dataset, column: &str) -> Vec<Selector> {
    std::iter::once(Selector::All)
        .chain(dataset.distinct_values(column).into_iter().map(Selector::Only))
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass all active selectors.
///
/// A row passes a selector when:
/// * The selector is `All` → passes (no constraint)
/// * The selected value never occurs in that column → passes (ignored)
/// * The row's cell equals the selected value → passes
pub fn filtered_indices(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    let mut active: Vec<(usize, &CellValue)> = Vec::new();
    for (column, selector) in selection.constraints() {
        let Selector::Only(wanted) = selector else {
            continue;
        };
        let Some(col) = dataset.column_index(column) else {
            log::warn!("Ignoring {column} filter: column not present");
            continue;
        };
        if !dataset.rows.iter().any(|r| &r[col] == wanted) {
            log::warn!("Ignoring {column} filter: no rows with value '{wanted}'");
            continue;
        }
        active.push((col, wanted));
    }

    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| active.iter().all(|(col, wanted)| &row[*col] == *wanted))
        .map(|(i, _)| i)
        .collect()
}

/// Produce the filtered view as a new dataset; the source is left untouched.
pub fn apply(dataset: &Dataset, selection: &Selection) -> Dataset {
    let indices = filtered_indices(dataset, selection);
    dataset.select_rows(&indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{SALES, SUB_CATEGORY};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn only(v: &str) -> Selector {
        Selector::Only(s(v))
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![REGION.into(), CATEGORY.into(), SEGMENT.into(), SALES.into()],
            vec![
                vec![s("East"), s("Furniture"), s("Consumer"), CellValue::Integer(100)],
                vec![s("West"), s("Furniture"), s("Corporate"), CellValue::Integer(200)],
                vec![s("East"), s("Technology"), s("Corporate"), CellValue::Integer(300)],
            ],
        )
    }

    #[test]
    fn options_start_with_all_then_sorted_values() {
        let opts = selector_options(&sample(), REGION);
        assert_eq!(opts, vec![Selector::All, only("East"), only("West")]);
        assert_eq!(opts[0].to_string(), "All");
    }

    #[test]
    fn constraints_are_conjunctive() {
        let ds = sample();
        let sel = Selection {
            region: only("East"),
            segment: only("Corporate"),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &sel), vec![2]);
    }

    #[test]
    fn all_selectors_is_identity() {
        let ds = sample();
        assert_eq!(apply(&ds, &Selection::default()), ds);
    }

    #[test]
    fn unknown_value_behaves_like_all() {
        let ds = sample();
        let sel = Selection {
            region: only("North"),
            category: only("Furniture"),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1]);
    }

    #[test]
    fn nan_labelled_region_is_selectable() {
        let nan = CellValue::infer("nan");
        let ds = Dataset::new(
            vec![REGION.into(), SALES.into()],
            vec![
                vec![nan.clone(), CellValue::Integer(1)],
                vec![s("East"), CellValue::Integer(2)],
                vec![CellValue::infer("nan"), CellValue::Integer(3)],
            ],
        );
        let opts = selector_options(&ds, REGION);
        assert!(opts.contains(&Selector::Only(nan.clone())));

        let sel = Selection {
            region: Selector::Only(nan),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);
    }

    #[test]
    fn missing_column_is_ignored() {
        let ds = Dataset::new(vec![SUB_CATEGORY.into()], vec![vec![s("Chairs")]]);
        let sel = Selection {
            region: only("East"),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &sel).len(), 1);
    }

    #[test]
    fn source_is_not_mutated() {
        let ds = sample();
        let before = ds.clone();
        let view = apply(&ds, &Selection { region: only("West"), ..Default::default() });
        assert_eq!(view.len(), 1);
        assert_eq!(ds, before);
    }

    #[test]
    fn parse_selector_text() {
        assert_eq!(Selector::parse(None), Selector::All);
        assert_eq!(Selector::parse(Some("All")), Selector::All);
        assert_eq!(Selector::parse(Some("East")), only("East"));
        assert_eq!(Selector::parse(Some("3")), Selector::Only(CellValue::Integer(3)));
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        let row = (0..3usize, 0..3usize, 0..2usize, 0..1000i64).prop_map(|(r, c, g, v)| {
            vec![
                s(["East", "West", "Central"][r]),
                s(["Furniture", "Technology", "Office Supplies"][c]),
                s(["Consumer", "Corporate"][g]),
                CellValue::Integer(v),
            ]
        });
        proptest::collection::vec(row, 0..40).prop_map(|rows| {
            Dataset::new(
                vec![REGION.into(), CATEGORY.into(), SEGMENT.into(), SALES.into()],
                rows,
            )
        })
    }

    fn arb_selector(values: &'static [&'static str]) -> impl Strategy<Value = Selector> {
        prop_oneof![
            Just(Selector::All),
            proptest::sample::select(values).prop_map(only),
        ]
    }

    fn arb_selection() -> impl Strategy<Value = Selection> {
        (
            arb_selector(&["East", "West", "Central", "South"]),
            arb_selector(&["Furniture", "Technology"]),
            arb_selector(&["Consumer", "Corporate", "Home Office"]),
        )
            .prop_map(|(region, category, segment)| Selection {
                region,
                category,
                segment,
            })
    }

    proptest! {
        #[test]
        fn retained_rows_satisfy_active_constraints(ds in arb_dataset(), sel in arb_selection()) {
            let indices = filtered_indices(&ds, &sel);
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(indices.iter().all(|&i| i < ds.len()));
            for (column, selector) in sel.constraints() {
                let Selector::Only(wanted) = selector else { continue };
                if !ds.distinct_values(column).contains(wanted) {
                    continue;
                }
                for &i in &indices {
                    prop_assert_eq!(ds.value(i, column), Some(wanted));
                }
            }
        }

        #[test]
        fn filtering_is_idempotent(ds in arb_dataset(), sel in arb_selection()) {
            let once = apply(&ds, &sel);
            let twice = apply(&once, &sel);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn all_is_identity(ds in arb_dataset()) {
            prop_assert_eq!(apply(&ds, &Selection::default()), ds);
        }
    }
}
