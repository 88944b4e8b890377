use rp_core::Tier;
use serde::Serialize;

/// One row of a decision table: scalars strictly greater than `above` map to `tier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdRule<T> {
    pub above: f64,
    pub tier: T,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision<T> {
    pub tier: T,
    pub recommendation: &'static str,
}

/// Ordered threshold rules, highest bound first, plus the tier for everything below them.
#[derive(Debug)]
pub struct DecisionTable<T: 'static> {
    rules: &'static [ThresholdRule<T>],
    floor: Decision<T>,
}

impl<T: Tier> DecisionTable<T> {
    pub const fn new(
        rules: &'static [ThresholdRule<T>],
        floor: T,
        recommendation: &'static str,
    ) -> Self {
        Self { rules, floor: Decision { tier: floor, recommendation } }
    }

    /// First rule whose bound the scalar exceeds wins; bounds are exclusive, so a scalar
    /// equal to a bound falls to the next tier down. Callers pass finite values only.
    pub fn classify(&self, scalar: f64) -> Decision<T> {
        self.rules
            .iter()
            .find(|rule| scalar > rule.above)
            .map(|rule| Decision { tier: rule.tier, recommendation: rule.recommendation })
            .unwrap_or(self.floor)
    }

    pub fn rules(&self) -> &'static [ThresholdRule<T>] {
        self.rules
    }

    pub fn floor(&self) -> Decision<T> {
        self.floor
    }

    /// Every tier with its recommendation, highest first.
    pub fn decisions(&self) -> impl Iterator<Item = Decision<T>> + '_ {
        self.rules
            .iter()
            .map(|rule| Decision { tier: rule.tier, recommendation: rule.recommendation })
            .chain(std::iter::once(self.floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Top,
        Mid,
        Bottom,
    }

    impl Tier for Level {
        fn code(&self) -> &'static str {
            "LEVEL"
        }

        fn title(&self) -> &'static str {
            "Level"
        }
    }

    static TABLE: DecisionTable<Level> = DecisionTable::new(
        &[
            ThresholdRule { above: 10.0, tier: Level::Top, recommendation: "top" },
            ThresholdRule { above: 5.0, tier: Level::Mid, recommendation: "mid" },
        ],
        Level::Bottom,
        "bottom",
    );

    #[test]
    fn first_exceeded_bound_wins() {
        assert_eq!(TABLE.classify(11.0).tier, Level::Top);
        assert_eq!(TABLE.classify(10.0).tier, Level::Mid);
        assert_eq!(TABLE.classify(5.0).tier, Level::Bottom);
        assert_eq!(TABLE.classify(-1e9).recommendation, "bottom");
    }

    #[test]
    fn lists_all_decisions_top_down() {
        let tiers: Vec<_> = TABLE.decisions().map(|d| d.tier).collect();
        assert_eq!(tiers, vec![Level::Top, Level::Mid, Level::Bottom]);
    }
}
