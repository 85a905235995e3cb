//! The outbound milestone event.
//!
//! A [`MilestoneEvent`] is what an [`EventSink`](crate::backend::EventSink)
//! receives once a milestone has been confirmed. Every field except the
//! threshold label is a fixed tag so that downstream analytics systems can
//! map the payload without knowing about scrollmark.

use serde::Serialize;

/// Event kind tag for scroll-milestone events.
pub const EVENT_KIND: &str = "user_scroll";
/// Unit tag: thresholds are percentages of document height.
pub const SCROLL_UNITS: &str = "percent";
/// Direction tag: only vertical scrolling is tracked.
pub const SCROLL_DIRECTION: &str = "vertical";
/// Category for secondary analytics systems.
pub const CATEGORY: &str = "Behavior";
/// Target for secondary analytics systems.
pub const TARGET: &str = "Scroll";

/// A confirmed scroll milestone, ready for an analytics backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneEvent {
    pub event_kind: &'static str,
    /// The milestone value as a bare decimal string, e.g. `"50"`.
    pub scroll_threshold: String,
    pub scroll_units: &'static str,
    pub scroll_direction: &'static str,
    pub category: &'static str,
    pub target: &'static str,
    /// Duplicate of `scroll_threshold` for generic attribute mapping.
    pub primary_label: String,
    #[serde(skip)]
    milestone: u8,
}

impl MilestoneEvent {
    /// Build the event for a confirmed milestone.
    pub fn new(milestone: u8) -> Self {
        let label = milestone.to_string();
        Self {
            event_kind: EVENT_KIND,
            scroll_threshold: label.clone(),
            scroll_units: SCROLL_UNITS,
            scroll_direction: SCROLL_DIRECTION,
            category: CATEGORY,
            target: TARGET,
            primary_label: label,
            milestone,
        }
    }

    /// The numeric milestone this event reports.
    pub fn milestone(&self) -> u8 {
        self.milestone
    }

    /// Serialize to a single-line JSON object.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_bare_decimal_string() {
        let e = MilestoneEvent::new(75);
        assert_eq!(e.scroll_threshold, "75");
        assert_eq!(e.primary_label, "75");
        assert_eq!(e.milestone(), 75);
    }

    #[test]
    fn fixed_tags() {
        let e = MilestoneEvent::new(25);
        assert_eq!(e.event_kind, "user_scroll");
        assert_eq!(e.scroll_units, "percent");
        assert_eq!(e.scroll_direction, "vertical");
        assert_eq!(e.category, "Behavior");
        assert_eq!(e.target, "Scroll");
    }

    #[test]
    fn json_threshold_is_a_string() {
        let json: serde_json::Value =
            serde_json::from_str(&MilestoneEvent::new(75).to_json().unwrap()).unwrap();
        assert_eq!(json["scroll_threshold"], serde_json::json!("75"));
        assert_eq!(json["primary_label"], serde_json::json!("75"));
        assert!(json["scroll_threshold"].is_string());
    }

    #[test]
    fn json_has_exactly_the_contract_fields() {
        let json: serde_json::Value =
            serde_json::from_str(&MilestoneEvent::new(0).to_json().unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "category",
                "event_kind",
                "primary_label",
                "scroll_direction",
                "scroll_threshold",
                "scroll_units",
                "target",
            ]
        );
        assert_eq!(json["scroll_threshold"], serde_json::json!("0"));
    }
}
