//! Panel layout planning.
//!
//! Panel 0 is the candlestick panel (ratio 6) and always exists. Bollinger
//! Bands overlay it. Volume, RSI and MACD each take the next free panel in
//! that fixed order (ratio 2 each) when enabled; disabled groups leave no gap.
//! Figure height is 8 + 2 per panel.

use std::fmt;

pub const PRICE_PANEL: usize = 0;
pub const PRICE_PANEL_RATIO: u32 = 6;
pub const INDICATOR_PANEL_RATIO: u32 = 2;
pub const BASE_FIGURE_HEIGHT: u32 = 8;
pub const HEIGHT_PER_PANEL: u32 = 2;
pub const FIGURE_WIDTH: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorGroup {
    Volume,
    Bollinger,
    Rsi,
    Macd,
}

impl fmt::Display for IndicatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndicatorGroup::Volume => "volume",
            IndicatorGroup::Bollinger => "bollinger",
            IndicatorGroup::Rsi => "rsi",
            IndicatorGroup::Macd => "macd",
        };
        f.write_str(name)
    }
}

/// Groups that get a panel of their own, in allocation order.
const STACKED_GROUPS: [IndicatorGroup; 3] = [
    IndicatorGroup::Volume,
    IndicatorGroup::Rsi,
    IndicatorGroup::Macd,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelFlags {
    pub volume: bool,
    pub bollinger: bool,
    pub rsi: bool,
    pub macd: bool,
}

impl PanelFlags {
    pub fn all() -> Self {
        Self {
            volume: true,
            bollinger: true,
            rsi: true,
            macd: true,
        }
    }

    pub fn is_enabled(&self, group: IndicatorGroup) -> bool {
        match group {
            IndicatorGroup::Volume => self.volume,
            IndicatorGroup::Bollinger => self.bollinger,
            IndicatorGroup::Rsi => self.rsi,
            IndicatorGroup::Macd => self.macd,
        }
    }
}

/// Panel index per enabled group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelAssignment {
    entries: Vec<(IndicatorGroup, usize)>,
}

impl PanelAssignment {
    pub fn panel_of(&self, group: IndicatorGroup) -> Option<usize> {
        self.entries
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, panel)| *panel)
    }

    /// Entries in the order they were allocated.
    pub fn entries(&self) -> &[(IndicatorGroup, usize)] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub assignment: PanelAssignment,
    /// Relative heights, one per panel in index order.
    pub ratios: Vec<u32>,
    pub figure_height: u32,
}

impl PanelLayout {
    pub fn panel_count(&self) -> usize {
        self.ratios.len()
    }
}

pub fn plan(flags: PanelFlags) -> PanelLayout {
    let mut assignment = PanelAssignment::default();
    if flags.bollinger {
        assignment
            .entries
            .push((IndicatorGroup::Bollinger, PRICE_PANEL));
    }

    let (assignment, ratios) = STACKED_GROUPS
        .iter()
        .filter(|g| flags.is_enabled(**g))
        .fold(
            (assignment, vec![PRICE_PANEL_RATIO]),
            |(mut assignment, mut ratios), &group| {
                assignment.entries.push((group, ratios.len()));
                ratios.push(INDICATOR_PANEL_RATIO);
                (assignment, ratios)
            },
        );

    let figure_height = BASE_FIGURE_HEIGHT + HEIGHT_PER_PANEL * ratios.len() as u32;
    tracing::debug!(?ratios, figure_height, "planned panels");

    PanelLayout {
        assignment,
        ratios,
        figure_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flags(volume: bool, bollinger: bool, rsi: bool, macd: bool) -> PanelFlags {
        PanelFlags {
            volume,
            bollinger,
            rsi,
            macd,
        }
    }

    #[test]
    fn all_disabled_is_price_panel_only() {
        let layout = plan(PanelFlags::default());
        assert_eq!(layout.ratios, vec![6]);
        assert_eq!(layout.figure_height, 10);
        assert!(layout.assignment.entries().is_empty());
    }

    #[test]
    fn all_enabled() {
        let layout = plan(PanelFlags::all());
        assert_eq!(layout.ratios, vec![6, 2, 2, 2]);
        assert_eq!(layout.figure_height, 16);
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Bollinger), Some(0));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Volume), Some(1));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Rsi), Some(2));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Macd), Some(3));
    }

    #[test]
    fn without_volume_rsi_moves_up() {
        let layout = plan(flags(false, false, true, true));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Volume), None);
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Rsi), Some(1));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Macd), Some(2));
        assert_eq!(layout.ratios, vec![6, 2, 2]);
    }

    #[test]
    fn macd_alone_takes_panel_one() {
        let layout = plan(flags(false, true, false, true));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Macd), Some(1));
        assert_eq!(layout.assignment.panel_of(IndicatorGroup::Bollinger), Some(0));
        assert_eq!(layout.figure_height, 12);
    }

    #[test]
    fn bollinger_never_adds_a_panel() {
        assert_eq!(
            plan(flags(true, true, false, false)).ratios,
            plan(flags(true, false, false, false)).ratios
        );
    }

    #[test]
    fn group_names() {
        assert_eq!(IndicatorGroup::Bollinger.to_string(), "bollinger");
        assert_eq!(IndicatorGroup::Macd.to_string(), "macd");
    }

    fn any_flags() -> impl Strategy<Value = PanelFlags> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(v, b, r, m)| flags(v, b, r, m))
    }

    proptest! {
        #[test]
        fn ratio_count_follows_stacked_flags(f in any_flags()) {
            let layout = plan(f);
            let stacked = [f.volume, f.rsi, f.macd].iter().filter(|x| **x).count();
            prop_assert_eq!(layout.ratios.len(), 1 + stacked);
            prop_assert_eq!(layout.ratios[0], PRICE_PANEL_RATIO);
            prop_assert!(layout.ratios[1..].iter().all(|r| *r == INDICATOR_PANEL_RATIO));
        }

        #[test]
        fn height_tracks_panel_count(f in any_flags()) {
            let layout = plan(f);
            prop_assert_eq!(layout.figure_height, 8 + 2 * layout.ratios.len() as u32);
        }

        #[test]
        fn stacked_panels_are_contiguous_and_ordered(f in any_flags()) {
            let layout = plan(f);
            let panels: Vec<usize> = [IndicatorGroup::Volume, IndicatorGroup::Rsi, IndicatorGroup::Macd]
                .iter()
                .filter_map(|g| layout.assignment.panel_of(*g))
                .collect();
            let expected: Vec<usize> = (1..=panels.len()).collect();
            prop_assert_eq!(panels, expected);
        }

        #[test]
        fn plan_is_deterministic(f in any_flags()) {
            prop_assert_eq!(plan(f), plan(f));
        }
    }
}
