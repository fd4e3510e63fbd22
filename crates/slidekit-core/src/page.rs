//! Margins and paper geometry.

use serde::{Deserialize, Serialize};

/// Four optional margins; unset sides read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(value: f64) -> Self {
        Self {
            left: Some(value),
            right: Some(value),
            top: Some(value),
            bottom: Some(value),
        }
    }

    pub fn left(&self) -> f64 {
        self.left.unwrap_or(0.0)
    }

    pub fn right(&self) -> f64 {
        self.right.unwrap_or(0.0)
    }

    pub fn top(&self) -> f64 {
        self.top.unwrap_or(0.0)
    }

    pub fn bottom(&self) -> f64 {
        self.bottom.unwrap_or(0.0)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f64 {
        self.left() + self.right()
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f64 {
        self.top() + self.bottom()
    }
}
