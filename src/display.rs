use serde::Serialize;

pub const COUNTER_REGION: &str = "today";
pub const SECONDARY_REGION: &str = "right-count";
pub const CHART_REGION: &str = "chart";

pub const PULSE_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", content = "value", rename_all = "snake_case")]
pub enum CounterPhase {
    #[default]
    Hidden,
    Revealing(u64),
    Pulsing(u64),
    Settled(u64),
}

impl CounterPhase {
    pub fn shown_value(self) -> Option<u64> {
        match self {
            Self::Hidden => None,
            Self::Revealing(value) | Self::Pulsing(value) | Self::Settled(value) => Some(value),
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn scale(self) -> f32 {
        match self {
            Self::Pulsing(_) => PULSE_SCALE,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SecondaryIndicator {
    right_count: u64,
}

impl SecondaryIndicator {
    pub fn new(right_count: u64) -> Self {
        Self { right_count }
    }

    pub fn is_visible(self) -> bool {
        self.right_count > 0
    }

    pub fn text(self) -> Option<String> {
        self.is_visible()
            .then(|| format!("+ {} times just \"right\"", self.right_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_counter_shows_nothing() {
        assert_eq!(CounterPhase::Hidden.shown_value(), None);
        assert!(!CounterPhase::Hidden.is_visible());
        assert_eq!(CounterPhase::Revealing(4).shown_value(), Some(4));
        assert!(CounterPhase::Revealing(4).is_visible());
    }

    #[test]
    fn only_pulsing_is_scaled() {
        assert_eq!(CounterPhase::Pulsing(5).scale(), PULSE_SCALE);
        assert_eq!(CounterPhase::Settled(5).scale(), 1.0);
        assert_eq!(CounterPhase::Revealing(4).scale(), 1.0);
    }

    #[test]
    fn secondary_indicator_follows_right_count_only() {
        assert_eq!(SecondaryIndicator::new(0).text(), None);
        assert_eq!(
            SecondaryIndicator::new(2).text().as_deref(),
            Some("+ 2 times just \"right\"")
        );
    }

    #[test]
    fn phase_serializes_with_tag() {
        let json = serde_json::to_value(CounterPhase::Pulsing(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "phase": "pulsing", "value": 5 }));
        let json = serde_json::to_value(CounterPhase::Hidden).unwrap();
        assert_eq!(json, serde_json::json!({ "phase": "hidden" }));
    }
}
