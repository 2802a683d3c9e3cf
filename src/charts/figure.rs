//! Plotly figure model
//!
//! Typed subset of the Plotly.js figure schema (`{data, layout}`) that the
//! dashboard emits. Serialized as-is and handed to `Plotly.react` in the
//! browser.

use super::theme::ThemeStyle;
use serde::Serialize;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    /// Colour used for a named series (bar trace name or pie label)
    pub fn trace_color(&self, name: &str) -> Option<&str> {
        self.data.iter().find_map(|trace| match trace {
            Trace::Bar(bar) if bar.name == name => bar.marker.color.as_deref(),
            Trace::Pie(pie) => {
                let idx = pie.labels.iter().position(|l| l == name)?;
                pie.marker.colors.as_ref()?.get(idx).map(String::as_str)
            }
            _ => None,
        })
    }

    /// Apply a theme's colours to the layout
    pub fn apply_style(&mut self, style: &ThemeStyle) {
        let layout = &mut self.layout;
        layout.paper_bgcolor = style.paper_bgcolor.to_string();
        layout.plot_bgcolor = style.plot_bgcolor.to_string();
        layout.font.color = style.font_color.to_string();

        for axis in [layout.xaxis.as_mut(), layout.yaxis.as_mut()]
            .into_iter()
            .flatten()
        {
            axis.gridcolor = Some(style.grid_color.to_string());
        }
    }
}

/// One series of a figure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Pie(PieTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<usize>,
    pub marker: Marker,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub marker: Marker,
    pub hole: f64,
    pub textinfo: String,
    pub hovertemplate: String,
    /// Keep slices in the given order instead of sorting by value
    pub sort: bool,
    pub direction: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    pub legend: Legend,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
}

impl Layout {
    /// Layout with a title and light colours
    pub fn titled(title: &str) -> Self {
        let style = super::Theme::Light.style();
        Self {
            title: Title::new(title),
            barmode: None,
            xaxis: None,
            yaxis: None,
            legend: Legend {
                title: Title::new("City"),
            },
            annotations: Vec::new(),
            paper_bgcolor: style.paper_bgcolor.to_string(),
            plot_bgcolor: style.plot_bgcolor.to_string(),
            font: Font {
                color: style.font_color.to_string(),
            },
        }
    }

    /// Centered note shown over an empty chart
    pub fn note(&mut self, text: &str) {
        self.annotations.push(Annotation {
            text: text.to_string(),
            showarrow: false,
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            x: 0.5,
            y: 0.5,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryarray: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Title::new(title),
            axis_type: None,
            tickangle: None,
            categoryorder: None,
            categoryarray: None,
            gridcolor: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: String,
    pub yref: String,
    pub x: f64,
    pub y: f64,
}
