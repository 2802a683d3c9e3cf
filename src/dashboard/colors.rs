//! City colour assignment
//!
//! Each city gets a colour from a fixed palette by its position in
//! first-seen order, wrapping around when there are more cities than
//! colours. The same assignment is shared by every chart for the life of
//! the process, so a city keeps its colour across re-filtering.

use std::collections::HashMap;

/// Plotly's default qualitative palette
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Deterministic city → colour mapping
#[derive(Debug, Clone, Default)]
pub struct ColorAssignment {
    colors: HashMap<String, &'static str>,
}

impl ColorAssignment {
    /// Assign palette colours to cities in the given order
    ///
    /// `color(i) = PALETTE[i % PALETTE.len()]`. Duplicate names keep the
    /// colour of their first occurrence.
    pub fn assign(cities: &[String]) -> Self {
        let mut colors = HashMap::with_capacity(cities.len());
        for city in cities {
            let next = PALETTE[colors.len() % PALETTE.len()];
            colors.entry(city.clone()).or_insert(next);
        }
        Self { colors }
    }

    /// Colour for a city, if it was part of the assignment
    pub fn color_for(&self, city: &str) -> Option<&'static str> {
        self.colors.get(city).copied()
    }

    /// Colour for a city, falling back to the first palette entry
    pub fn color_or_default(&self, city: &str) -> &'static str {
        self.color_for(city).unwrap_or(PALETTE[0])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
