/// Declarative chart configuration
///
/// Builds Chart.js-style configuration values from the JSON datasets the
/// dashboard template embeds. Gradients are declarative stop pairs; the
/// rendering layer resolves them against its canvas. A missing dataset
/// simply yields no configuration for that canvas.
use serde_json::{json, Value};

use crate::ballot::PageData;

/// Categorical palette shared by the doughnut and pie charts.
pub const MULTI_COLOR_PALETTE: [&str; 8] = [
    "rgba(37, 99, 235, 0.85)",   // Blue
    "rgba(16, 185, 129, 0.85)",  // Green
    "rgba(245, 158, 11, 0.85)",  // Orange
    "rgba(239, 68, 68, 0.85)",   // Red
    "rgba(139, 92, 246, 0.85)",  // Purple
    "rgba(236, 72, 153, 0.85)",  // Pink
    "rgba(6, 182, 212, 0.85)",   // Cyan
    "rgba(251, 191, 36, 0.85)",  // Amber
];

fn primary_gradient() -> Value {
    json!({
        "gradient": {
            "start": "rgba(37, 99, 235, 0.9)",
            "end": "rgba(124, 58, 237, 0.7)"
        }
    })
}

fn success_gradient() -> Value {
    json!({
        "gradient": {
            "start": "rgba(16, 185, 129, 0.9)",
            "end": "rgba(52, 211, 153, 0.7)"
        }
    })
}

fn common_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": { "display": false },
            "tooltip": {
                "backgroundColor": "rgba(15, 23, 42, 0.95)",
                "padding": 12,
                "titleFont": { "size": 14, "weight": "bold" },
                "bodyFont": { "size": 13 },
                "borderColor": "rgba(37, 99, 235, 0.5)",
                "borderWidth": 1,
                "displayColors": false,
                "cornerRadius": 8
            }
        }
    })
}

fn bar_scales() -> Value {
    json!({
        "y": {
            "beginAtZero": true,
            "grid": { "color": "rgba(226, 232, 240, 0.5)", "drawBorder": false },
            "ticks": { "color": "#64748b", "font": { "size": 12 }, "padding": 8 }
        },
        "x": {
            "grid": { "display": false, "drawBorder": false },
            "ticks": {
                "color": "#475569",
                "font": { "size": 12, "weight": "500" },
                "padding": 8
            }
        }
    })
}

fn legend_bottom() -> Value {
    json!({
        "display": true,
        "position": "bottom",
        "labels": {
            "padding": 15,
            "font": { "size": 13, "weight": "500" },
            "color": "#475569",
            "usePointStyle": true,
            "pointStyle": "circle"
        }
    })
}

fn merged_options(overrides: Value) -> Value {
    let mut options = common_options();
    merge(&mut options, overrides);
    options
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(over_map)) => {
            for (key, value) in over_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, value) => *base_slot = value,
    }
}

/// Hourly turnout trend (line).
pub fn turnout_trend(hours: &[String], counts: &[u64]) -> Option<Value> {
    if hours.is_empty() {
        return None;
    }
    Some(json!({
        "type": "line",
        "data": {
            "labels": hours,
            "datasets": [{
                "label": "Votes",
                "data": counts,
                "borderColor": "rgba(37, 99, 235, 1)",
                "backgroundColor": {
                    "gradient": {
                        "start": "rgba(37, 99, 235, 0.3)",
                        "end": "rgba(37, 99, 235, 0.05)"
                    }
                },
                "borderWidth": 3,
                "fill": true,
                "tension": 0.4,
                "pointRadius": 4,
                "pointBackgroundColor": "rgba(37, 99, 235, 1)",
                "pointBorderColor": "#fff",
                "pointBorderWidth": 2
            }]
        },
        "options": merged_options(json!({
            "scales": bar_scales(),
            "animation": { "duration": 1500, "easing": "easeInOutQuart" }
        }))
    }))
}

/// Votes per position (horizontal bar).
pub fn position_votes(labels: &[String], counts: &[u64]) -> Option<Value> {
    if labels.is_empty() {
        return None;
    }
    Some(json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Votes",
                "data": counts,
                "backgroundColor": primary_gradient(),
                "borderRadius": 8,
                "borderSkipped": false,
                "barThickness": 40,
                "hoverBackgroundColor": "rgba(37, 99, 235, 1)"
            }]
        },
        "options": merged_options(json!({
            "indexAxis": "y",
            "scales": bar_scales(),
            "animation": { "duration": 1000, "easing": "easeInOutQuart" }
        }))
    }))
}

/// Registered students per course (bar).
pub fn course_totals(labels: &[String], counts: &[u64]) -> Option<Value> {
    if labels.is_empty() {
        return None;
    }
    Some(json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Students",
                "data": counts,
                "backgroundColor": primary_gradient(),
                "borderRadius": 8,
                "borderSkipped": false,
                "barThickness": 40,
                "hoverBackgroundColor": "rgba(37, 99, 235, 1)"
            }]
        },
        "options": merged_options(json!({
            "scales": bar_scales(),
            "animation": { "duration": 1000, "easing": "easeInOutQuart" }
        }))
    }))
}

/// Year-level breakdown (doughnut). Labels render as "Year N".
pub fn year_breakdown(years: &[i64], counts: &[u64]) -> Option<Value> {
    if years.is_empty() {
        return None;
    }
    let labels: Vec<String> = years.iter().map(|y| format!("Year {}", y)).collect();
    Some(json!({
        "type": "doughnut",
        "data": {
            "labels": labels,
            "datasets": [{
                "data": counts,
                "backgroundColor": MULTI_COLOR_PALETTE,
                "borderWidth": 3,
                "borderColor": "#ffffff",
                "hoverBorderWidth": 4,
                "hoverBorderColor": "#ffffff",
                "hoverOffset": 8
            }]
        },
        "options": merged_options(json!({
            "cutout": "65%",
            "plugins": { "legend": legend_bottom() },
            "animation": {
                "animateRotate": true,
                "animateScale": true,
                "duration": 1000,
                "easing": "easeInOutQuart"
            }
        }))
    }))
}

/// Active voters per course (bar, success palette).
pub fn participation_by_course(labels: &[String], counts: &[u64]) -> Option<Value> {
    if labels.is_empty() {
        return None;
    }
    Some(json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Active Voters",
                "data": counts,
                "backgroundColor": success_gradient(),
                "borderRadius": 8,
                "borderSkipped": false,
                "barThickness": 40,
                "hoverBackgroundColor": "rgba(16, 185, 129, 1)"
            }]
        },
        "options": merged_options(json!({
            "scales": bar_scales(),
            "animation": { "duration": 1000, "easing": "easeInOutQuart" }
        }))
    }))
}

/// Participation by year (pie).
pub fn participation_by_year(years: &[i64], counts: &[u64]) -> Option<Value> {
    if years.is_empty() {
        return None;
    }
    let labels: Vec<String> = years.iter().map(|y| format!("Year {}", y)).collect();
    Some(json!({
        "type": "pie",
        "data": {
            "labels": labels,
            "datasets": [{
                "data": counts,
                "backgroundColor": MULTI_COLOR_PALETTE,
                "borderWidth": 3,
                "borderColor": "#ffffff",
                "hoverBorderWidth": 4,
                "hoverBorderColor": "#ffffff",
                "hoverOffset": 8
            }]
        },
        "options": merged_options(json!({
            "plugins": { "legend": legend_bottom() },
            "animation": {
                "animateRotate": true,
                "animateScale": true,
                "duration": 1000,
                "easing": "easeInOutQuart"
            }
        }))
    }))
}

/// A chart ready for its canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub canvas_id: &'static str,
    pub config: Value,
}

/// Build every chart whose dataset the page embeds.
pub fn from_page(page: &PageData) -> Vec<ChartConfig> {
    let mut charts = Vec::new();

    let labels = |id: &str| page.block::<Vec<String>>(id).unwrap_or_default();
    let counts = |id: &str| page.block::<Vec<u64>>(id).unwrap_or_default();
    let years = |id: &str| page.block::<Vec<i64>>(id).unwrap_or_default();

    let mut push = |canvas_id: &'static str, config: Option<Value>| {
        if let Some(config) = config {
            charts.push(ChartConfig { canvas_id, config });
        }
    };

    push(
        "turnoutTrendChart",
        turnout_trend(&labels("turnout-hours-data"), &counts("turnout-counts-data")),
    );
    push(
        "positionVotesChart",
        position_votes(
            &labels("position-labels-data"),
            &counts("position-counts-data"),
        ),
    );
    push(
        "courseChart",
        course_totals(&labels("course-labels-data"), &counts("course-counts-data")),
    );
    push(
        "yearChart",
        year_breakdown(&years("year-labels-data"), &counts("year-counts-data")),
    );
    push(
        "participationCourseChart",
        participation_by_course(
            &labels("participation-course-labels-data"),
            &counts("participation-course-counts-data"),
        ),
    );
    push(
        "participationYearChart",
        participation_by_year(
            &years("participation-year-labels-data"),
            &counts("participation-year-counts-data"),
        ),
    );

    charts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_yields_no_config() {
        assert!(turnout_trend(&[], &[]).is_none());
        assert!(position_votes(&[], &[]).is_none());
        assert!(year_breakdown(&[], &[]).is_none());
    }

    #[test]
    fn test_line_chart_shape() {
        let config = turnout_trend(&["08:00".to_string(), "09:00".to_string()], &[12, 30]).unwrap();
        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"][1], "09:00");
        assert_eq!(config["data"]["datasets"][0]["data"][1], 30);
        assert_eq!(config["options"]["responsive"], true);
        assert_eq!(config["options"]["animation"]["duration"], 1500);
    }

    #[test]
    fn test_horizontal_bar_uses_y_axis() {
        let config = position_votes(&["President".to_string()], &[88]).unwrap();
        assert_eq!(config["options"]["indexAxis"], "y");
    }

    #[test]
    fn test_doughnut_labels_years() {
        let config = year_breakdown(&[1, 2, 3], &[10, 20, 30]).unwrap();
        assert_eq!(config["data"]["labels"][0], "Year 1");
        assert_eq!(config["options"]["cutout"], "65%");
        assert_eq!(config["options"]["plugins"]["legend"]["position"], "bottom");
        // Legend override must not lose the shared tooltip styling.
        assert_eq!(config["options"]["plugins"]["tooltip"]["padding"], 12);
    }

    #[test]
    fn test_from_page_builds_present_charts_only() {
        let raw = r#"{
            "position-labels-data": ["President", "Senator"],
            "position-counts-data": [120, 95],
            "year-labels-data": [1, 2],
            "year-counts-data": [40, 60]
        }"#;
        let page = PageData::from_str(raw).unwrap();
        let charts = from_page(&page);

        let ids: Vec<_> = charts.iter().map(|c| c.canvas_id).collect();
        assert_eq!(ids, vec!["positionVotesChart", "yearChart"]);
    }
}
