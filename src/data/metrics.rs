//! Metric-code dictionary: readable names for the known codes and the
//! category grouping that orders the chart view. Codes the dictionary does
//! not know are displayed verbatim; the domains themselves always come from
//! the data, never from this table.

/// Metric code of the total race time, the quantity the ranking view
/// aggregates.
pub const TOTAL_TIME: &str = "T TOTAL";

/// One chart-view section: a category name and the metric codes it covers,
/// in display order.
pub struct MetricCategory {
    pub name: &'static str,
    pub codes: &'static [&'static str],
}

/// The four chart-view sections, in display order.
pub const CATEGORIES: [MetricCategory; 4] = [
    MetricCategory {
        name: "Times",
        codes: &["T15 (1)", "T25 (1)", "T15 (2)", "T25 (2)", "T TOTAL"],
    },
    MetricCategory {
        name: "Strokes",
        codes: &["# de BRZ 1", "# de BRZ 2", "BRZ TOTAL", "DIST x BRZ"],
    },
    MetricCategory {
        name: "Velocity",
        codes: &["V1", "V2", "V promedio"],
    },
    MetricCategory {
        name: "Underwaters",
        codes: &["F1", "F2", "F promedio", "DIST sin F"],
    },
];

/// Readable display name for a metric code; unknown codes come back verbatim.
pub fn display_name(code: &str) -> &str {
    match code {
        "T15 (1)" => "Time 15m (1)",
        "T25 (1)" => "Time 25m (1)",
        "T15 (2)" => "Time 15m (2)",
        "T25 (2)" => "Time 25m (2)",
        "T TOTAL" => "Total Time",
        "# de BRZ 1" => "Stroke Count (1)",
        "# de BRZ 2" => "Stroke Count (2)",
        "BRZ TOTAL" => "Total Strokes",
        "DIST x BRZ" => "Distance per Stroke",
        "V1" => "Velocity (1)",
        "V2" => "Velocity (2)",
        "V promedio" => "Average Velocity",
        "F1" => "Underwater (1)",
        "F2" => "Underwater (2)",
        "F promedio" => "Average Underwater Meters",
        "DIST sin F" => "Distance Without Underwater",
        other => other,
    }
}

/// Position of a code in the category-ordered chart layout. Unknown codes
/// sort after every known one.
pub fn chart_rank(code: &str) -> usize {
    let mut rank = 0;
    for category in &CATEGORIES {
        for known in category.codes {
            if *known == code {
                return rank;
            }
            rank += 1;
        }
    }
    usize::MAX
}

/// The category a code belongs to, if any.
pub fn category_of(code: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|c| c.codes.contains(&code))
        .map(|c| c.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sixteen_codes_have_names_and_categories() {
        let codes: Vec<&str> = CATEGORIES.iter().flat_map(|c| c.codes).copied().collect();
        assert_eq!(codes.len(), 16);
        for code in codes {
            assert_ne!(display_name(code), code, "missing name for {code}");
            assert!(category_of(code).is_some());
        }
    }

    #[test]
    fn unknown_codes_display_verbatim_and_sort_last() {
        assert_eq!(display_name("T35 (3)"), "T35 (3)");
        assert_eq!(category_of("T35 (3)"), None);
        assert_eq!(chart_rank("T35 (3)"), usize::MAX);
        assert!(chart_rank("T15 (1)") < chart_rank("T TOTAL"));
        assert!(chart_rank("T TOTAL") < chart_rank("V1"));
    }
}
