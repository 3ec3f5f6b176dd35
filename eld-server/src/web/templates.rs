//! Askama templates for the web frontend.

use askama::Template;

use crate::cache::PlanId;
use crate::map::MapView;
use crate::render::{DaySheet, RenderModel};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Planned trip: route map and day sheets.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate {
    pub plan_id: String,
    pub export_url: String,
    pub map: Option<MapPanel>,
    pub days: Vec<DaySheetView>,
}

impl TripResultsTemplate {
    pub fn has_days(&self) -> bool {
        !self.days.is_empty()
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Map data handed to the page script.
#[derive(Debug, Clone)]
pub struct MapPanel {
    /// [`MapView`] as JSON, read by the script from a data attribute
    pub json: String,
    pub marker_count: usize,
}

impl MapPanel {
    pub fn from_view(view: &MapView) -> Result<Self, serde_json::Error> {
        Ok(Self {
            json: view.to_json()?,
            marker_count: view.markers.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SummaryCellView {
    pub heading: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct LegendView {
    pub label: String,
    /// CSS color, e.g. "#58d68d"
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct SegmentView {
    pub status: String,
    pub detail: String,
    pub unplotted: bool,
}

/// One day's log sheet.
#[derive(Debug, Clone)]
pub struct DaySheetView {
    pub heading: String,
    pub summary: Vec<SummaryCellView>,
    /// Drawn inline by `grid.svg.html`.
    pub grid: RenderModel,
    pub legend: Vec<LegendView>,
    pub segments: Vec<SegmentView>,
}

impl DaySheetView {
    pub fn from_sheet(sheet: &DaySheet) -> Self {
        Self {
            heading: sheet.heading.clone(),
            summary: sheet
                .summary
                .iter()
                .map(|c| SummaryCellView {
                    heading: c.heading.to_string(),
                    value: c.value.clone(),
                })
                .collect(),
            grid: sheet.grid.clone(),
            legend: sheet
                .legend
                .iter()
                .map(|l| LegendView {
                    label: l.label.clone(),
                    color: l.color.to_string(),
                })
                .collect(),
            segments: sheet
                .segments
                .iter()
                .map(|s| SegmentView {
                    status: s.status.clone(),
                    detail: s.detail(),
                    unplotted: s.unplotted,
                })
                .collect(),
        }
    }
}

/// Fragment id of a plan, used by the page script to find the export button.
pub fn plan_dom_id(id: PlanId) -> String {
    format!("trip-{id}")
}
