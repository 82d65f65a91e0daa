//! The element boundary between the engine and its host document.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::color::parse::parse_color;

/// A visual element whose foreground color the pipeline can rewrite.
///
/// Hosts implement this for whatever their document nodes are. `id` must be
/// stable across pipeline runs; it keys the original-color cache.
pub trait VisualElement {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;

    /// Current foreground color, parsed from the host's representation.
    fn foreground_color(&self) -> Result<Color, ElementAccessError>;

    /// Write a formatted color string onto the element.
    fn set_foreground_color(&mut self, value: &str) -> Result<(), ElementAccessError>;
}

/// A single element could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementAccessError {
    #[error("cannot read foreground color: {0}")]
    Read(String),

    #[error("cannot write foreground color: {0}")]
    Write(String),
}

/// An in-memory document node carrying an inline style color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledElement {
    pub id: String,
    /// Foreground color text, e.g. `#336699` or `rgb(10, 20, 30)`.
    #[serde(default)]
    pub color: Option<String>,
    /// Rejects style writes when set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

impl StyledElement {
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: Some(color.into()),
            read_only: false,
        }
    }
}

impl VisualElement for StyledElement {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn foreground_color(&self) -> Result<Color, ElementAccessError> {
        let text = self
            .color
            .as_deref()
            .ok_or_else(|| ElementAccessError::Read("no color set".to_string()))?;
        parse_color(text).map_err(|e| ElementAccessError::Read(e.to_string()))
    }

    fn set_foreground_color(&mut self, value: &str) -> Result<(), ElementAccessError> {
        if self.read_only {
            return Err(ElementAccessError::Write(
                "element is read-only".to_string(),
            ));
        }
        self.color = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_element_reads_and_writes() {
        let mut el = StyledElement::new("title", "rgb(100,150,200)");
        assert_eq!(el.foreground_color().unwrap(), Color::rgb(100, 150, 200));
        el.set_foreground_color("#b2cbe4").unwrap();
        assert_eq!(el.color.as_deref(), Some("#b2cbe4"));
    }

    #[test]
    fn test_styled_element_failures() {
        let missing = StyledElement {
            id: "a".into(),
            color: None,
            read_only: false,
        };
        assert!(matches!(
            missing.foreground_color(),
            Err(ElementAccessError::Read(_))
        ));

        let garbage = StyledElement::new("b", "chartreuse-ish");
        assert!(matches!(
            garbage.foreground_color(),
            Err(ElementAccessError::Read(_))
        ));

        let mut locked = StyledElement::new("c", "#000");
        locked.read_only = true;
        assert!(matches!(
            locked.set_foreground_color("#fff"),
            Err(ElementAccessError::Write(_))
        ));
        assert_eq!(locked.color.as_deref(), Some("#000"));
    }

    #[test]
    fn test_styled_element_json() {
        let els: Vec<StyledElement> = serde_json::from_str(
            r##"[{"id": "p1", "color": "#fff"}, {"id": "p2", "read_only": true}]"##,
        )
        .unwrap();
        assert_eq!(els[0], StyledElement::new("p1", "#fff"));
        assert!(els[1].read_only);
        assert_eq!(els[1].color, None);

        let out = serde_json::to_string(&els[0]).unwrap();
        assert_eq!(out, r##"{"id":"p1","color":"#fff"}"##);
    }
}
