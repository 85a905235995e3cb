//! Platform-agnostic scroll signal types.
//!
//! Every host maps its native scroll, touch and resize notifications to
//! [`ScrollSignal`]. The tracker never sees raw platform events; a signal only
//! means "measure the viewport now".

use serde::{Deserialize, Serialize};

/// A request to re-measure scroll depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollSignal {
    /// The viewport scrolled (wheel, keyboard, scrollbar drag).
    Scroll,
    /// A touch-move gesture moved the page on a touch device.
    #[serde(alias = "touch_move")]
    TouchMove,
    /// The viewport or document was resized or reflowed.
    Resize,
}

impl ScrollSignal {
    /// Name of the host notification this signal stands for.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::TouchMove => "touchmove",
            Self::Resize => "resize",
        }
    }
}

impl std::fmt::Display for ScrollSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_host_event_names() {
        assert_eq!(ScrollSignal::Scroll.to_string(), "scroll");
        assert_eq!(ScrollSignal::TouchMove.to_string(), "touchmove");
        assert_eq!(ScrollSignal::Resize.to_string(), "resize");
    }

    #[test]
    fn deserializes_from_lowercase_names() {
        #[derive(Deserialize)]
        struct Row {
            kind: ScrollSignal,
        }
        let row: Row = toml::from_str(r#"kind = "touchmove""#).unwrap();
        assert_eq!(row.kind, ScrollSignal::TouchMove);
        let row: Row = toml::from_str(r#"kind = "touch_move""#).unwrap();
        assert_eq!(row.kind, ScrollSignal::TouchMove);
        let row: Row = toml::from_str(r#"kind = "resize""#).unwrap();
        assert_eq!(row.kind, ScrollSignal::Resize);
    }

    #[test]
    fn unknown_signal_name_is_rejected() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Row {
            kind: ScrollSignal,
        }
        assert!(toml::from_str::<Row>(r#"kind = "wheel""#).is_err());
    }

    #[test]
    fn signals_are_hashable() {
        let mut set = std::collections::HashSet::new();
        set.insert(ScrollSignal::Scroll);
        set.insert(ScrollSignal::Scroll);
        set.insert(ScrollSignal::Resize);
        assert_eq!(set.len(), 2);
    }
}
