/// Activity code shared by both vocabularies for a resting recording.
pub const REST_ACTIVITY: i64 = 0;

/// One selectable artifact category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Category {
    pub code: i64,
    pub label: &'static str,
}

/// How a freshly created table fills the artifact column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultFill {
    /// Rest segments start clean, every other activity starts marked.
    ByActivity,
    /// Cells stay unset until first viewed.
    Unset,
}

/// How the viewer's selector reflects a stored artifact value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectorRule {
    /// Unset or zero selects OK, anything else selects the artifact radio.
    SnapToBinary,
    /// Select the stored category exactly, or nothing if it is outside the
    /// known set.
    ExactOrNone,
}

/// One entry of the ordered filename-keyword table.
#[derive(Clone, Copy, Debug)]
pub struct ActivityKeyword {
    pub keyword: &'static str,
    pub code: i64,
    pub label: &'static str,
}

/// Everything that historically varied between the near-duplicate labeler
/// scripts, folded into one configuration: the category set, the
/// default-assignment rule, the selector behavior, the activity vocabulary
/// and the label-file naming pattern.
#[derive(Debug)]
pub struct LabelScheme {
    pub name: &'static str,
    pub categories: &'static [Category],
    pub default_fill: DefaultFill,
    pub selector: SelectorRule,
    /// Reading an unset cell stores a 0 before returning it.
    pub write_through_on_read: bool,
    /// Checked in order; the first keyword contained in the filename wins.
    pub activities: &'static [ActivityKeyword],
    pub unknown_activity: (i64, &'static str),
    /// Whether the label-file name embeds the sampling rate as well as the
    /// segment length.
    pub path_includes_rate: bool,
}

static BINARY: LabelScheme = LabelScheme {
    name: "binary",
    categories: &[
        Category {
            code: 0,
            label: "OK",
        },
        Category {
            code: 1,
            label: "Artefact",
        },
    ],
    default_fill: DefaultFill::ByActivity,
    selector: SelectorRule::SnapToBinary,
    write_through_on_read: false,
    activities: &[
        ActivityKeyword {
            keyword: "klud",
            code: 0,
            label: "Rest",
        },
        ActivityKeyword {
            keyword: "ruky",
            code: 1,
            label: "Arm movements",
        },
        ActivityKeyword {
            keyword: "chodza",
            code: 2,
            label: "Walk 4 km/h",
        },
        ActivityKeyword {
            keyword: "beh",
            code: 3,
            label: "Run 8 km/h",
        },
        ActivityKeyword {
            keyword: "drepy",
            code: 4,
            label: "Squats",
        },
    ],
    unknown_activity: (5, "Unknown"),
    path_includes_rate: false,
};

static CATEGORICAL: LabelScheme = LabelScheme {
    name: "categories",
    categories: &[
        Category {
            code: 0,
            label: "OK",
        },
        Category {
            code: 1,
            label: "Minor artifact",
        },
        Category {
            code: 2,
            label: "Major artifact",
        },
        Category {
            code: 3,
            label: "Unusable",
        },
    ],
    default_fill: DefaultFill::Unset,
    selector: SelectorRule::ExactOrNone,
    write_through_on_read: true,
    activities: &[
        ActivityKeyword {
            keyword: "rest",
            code: 0,
            label: "Rest",
        },
        ActivityKeyword {
            keyword: "arms",
            code: 1,
            label: "Arm movements",
        },
        ActivityKeyword {
            keyword: "walk",
            code: 2,
            label: "Walk",
        },
        ActivityKeyword {
            keyword: "run",
            code: 3,
            label: "Run",
        },
        ActivityKeyword {
            keyword: "squat",
            code: 4,
            label: "Squats",
        },
    ],
    unknown_activity: (5, "Unknown"),
    path_includes_rate: true,
};

impl LabelScheme {
    pub fn binary() -> &'static LabelScheme {
        &BINARY
    }

    pub fn categorical() -> &'static LabelScheme {
        &CATEGORICAL
    }

    pub fn by_name(name: &str) -> Option<&'static LabelScheme> {
        match name {
            "binary" => Some(Self::binary()),
            "categories" => Some(Self::categorical()),
            _ => None,
        }
    }

    /// Ordered first-match keyword lookup; no match yields the Unknown
    /// sentinel.
    pub fn activity_for(&self, file_name: &str) -> (i64, &'static str) {
        self.activities
            .iter()
            .find(|entry| file_name.contains(entry.keyword))
            .map(|entry| (entry.code, entry.label))
            .unwrap_or(self.unknown_activity)
    }

    /// Artifact value a fresh table assigns for the given activity, if any.
    pub fn default_artifact(&self, activity: i64) -> Option<i64> {
        match self.default_fill {
            DefaultFill::ByActivity => Some(if activity == REST_ACTIVITY { 0 } else { 1 }),
            DefaultFill::Unset => None,
        }
    }

    /// Selector value shown for a stored artifact cell.
    pub fn selector_for(&self, stored: Option<i64>) -> Option<i64> {
        match self.selector {
            SelectorRule::SnapToBinary => Some(match stored {
                None | Some(0) => 0,
                Some(_) => 1,
            }),
            SelectorRule::ExactOrNone => {
                stored.filter(|code| self.categories.iter().any(|c| c.code == *code))
            }
        }
    }

    /// Next category in cycling order, used by the space-bar toggle.
    pub fn next_category(&self, current: Option<i64>) -> i64 {
        let position =
            current.and_then(|code| self.categories.iter().position(|c| c.code == code));
        match position {
            Some(idx) => self.categories[(idx + 1) % self.categories.len()].code,
            None => self.categories[0].code,
        }
    }

    /// File name of the persisted label table for one input file.
    pub fn table_file_name(&self, stem: &str, sampling_rate: usize, segment_length: usize) -> String {
        if self.path_includes_rate {
            format!("{stem}_{sampling_rate}_{segment_length}.csv")
        } else {
            format!("{stem}_{segment_length}.csv")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_order_decides_ties() {
        // "chodza" is tested before "beh", so a name matching both resolves
        // to the walk activity.
        let scheme = LabelScheme::binary();
        assert_eq!(scheme.activity_for("p03_chodza_beh.csv"), (2, "Walk 4 km/h"));
        assert_eq!(scheme.activity_for("p03_beh.csv"), (3, "Run 8 km/h"));
    }

    #[test]
    fn unmatched_name_is_unknown() {
        assert_eq!(
            LabelScheme::categorical().activity_for("p01_01_cycling.csv"),
            (5, "Unknown")
        );
    }

    #[test]
    fn binary_default_fill_depends_on_activity() {
        let scheme = LabelScheme::binary();
        assert_eq!(scheme.default_artifact(REST_ACTIVITY), Some(0));
        assert_eq!(scheme.default_artifact(3), Some(1));
        assert_eq!(LabelScheme::categorical().default_artifact(3), None);
    }

    #[test]
    fn binary_selector_snaps_to_two_states() {
        let scheme = LabelScheme::binary();
        assert_eq!(scheme.selector_for(None), Some(0));
        assert_eq!(scheme.selector_for(Some(0)), Some(0));
        assert_eq!(scheme.selector_for(Some(7)), Some(1));
    }

    #[test]
    fn categorical_selector_rejects_unknown_codes() {
        let scheme = LabelScheme::categorical();
        assert_eq!(scheme.selector_for(Some(2)), Some(2));
        assert_eq!(scheme.selector_for(Some(9)), None);
        assert_eq!(scheme.selector_for(None), None);
    }

    #[test]
    fn toggle_cycles_through_all_categories() {
        let scheme = LabelScheme::categorical();
        assert_eq!(scheme.next_category(None), 0);
        assert_eq!(scheme.next_category(Some(0)), 1);
        assert_eq!(scheme.next_category(Some(3)), 0);
        // A code outside the set restarts at the first category.
        assert_eq!(scheme.next_category(Some(42)), 0);
    }

    #[test]
    fn table_name_varies_by_scheme() {
        assert_eq!(
            LabelScheme::binary().table_file_name("p01_02_klud", 500, 5),
            "p01_02_klud_5.csv"
        );
        assert_eq!(
            LabelScheme::categorical().table_file_name("p01_02_rest", 500, 5),
            "p01_02_rest_500_5.csv"
        );
    }
}
