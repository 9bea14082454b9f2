// src/venn.rs
//
// Area-proportional two-circle layout for the library overlap diagram.
// Circle areas track the library totals; the center distance is solved so
// the lens (intersection) area equals the overlap count.

use std::f64::consts::PI;

use serde::Serialize;

use crate::models::SummaryStats;

const PORTAL_LABEL: &str = "Portal Library";
const SEARCH_LABEL: &str = "Search Library";
const PAD: f64 = 24.0;

#[derive(Debug, Clone, Serialize)]
pub struct VennCircle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VennLayout {
    pub width: f64,
    pub height: f64,
    pub portal: VennCircle,
    pub search: VennCircle,
    /// SVG path for the overlap lens; None when the sets are disjoint.
    pub lens: Option<String>,
}

/* -------------------------------------------------------------------------- */
/* Layout                                                                     */
/* -------------------------------------------------------------------------- */

/// Compute the diagram layout inside a width × height viewport. Circles sit
/// on the horizontal midline, portal left, search right.
pub fn two_circle_layout(stats: &SummaryStats, width: f64, height: f64) -> VennLayout {
    let area_portal = stats.portal_total as f64;
    let area_search = stats.search_total as f64;

    if area_portal <= 0.0 && area_search <= 0.0 {
        return VennLayout {
            width,
            height,
            portal: circle(width / 2.0, height / 2.0, 0.0, PORTAL_LABEL),
            search: circle(width / 2.0, height / 2.0, 0.0, SEARCH_LABEL),
            lens: None,
        };
    }

    let r1 = (area_portal / PI).sqrt();
    let r2 = (area_search / PI).sqrt();

    // The lens area can never exceed the smaller circle's area.
    let target = (stats.overlap as f64).min(area_portal.min(area_search));
    let d = if target <= 0.0 {
        r1 + r2 // tangent circles
    } else if target >= area_portal.min(area_search) {
        (r1 - r2).abs() // full containment
    } else {
        solve_distance(r1, r2, target)
    };

    // Scale the abstract geometry into the viewport.
    let span_x = r1 + d + r2;
    let span_y = 2.0 * r1.max(r2);
    let scale = ((width - 2.0 * PAD) / span_x.max(f64::MIN_POSITIVE))
        .min((height - 2.0 * PAD) / span_y.max(f64::MIN_POSITIVE));

    let cy = height / 2.0;
    let cx1 = width / 2.0 - scale * (span_x / 2.0 - r1);
    let cx2 = cx1 + scale * d;

    let portal = circle(cx1, cy, scale * r1, PORTAL_LABEL);
    let search = circle(cx2, cy, scale * r2, SEARCH_LABEL);
    let lens = if target > 0.0 {
        lens_path(&portal, &search)
    } else {
        None
    };

    VennLayout {
        width,
        height,
        portal,
        search,
        lens,
    }
}

fn circle(cx: f64, cy: f64, r: f64, label: &str) -> VennCircle {
    VennCircle {
        cx,
        cy,
        r,
        label: label.to_string(),
    }
}

/* -------------------------------------------------------------------------- */
/* Geometry                                                                   */
/* -------------------------------------------------------------------------- */

/// Area of the intersection of two circles with radii r1, r2 and center
/// distance d (sum of two circular segments).
pub fn lens_area(r1: f64, r2: f64, d: f64) -> f64 {
    if r1 <= 0.0 || r2 <= 0.0 || d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }
    let d1 = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let d2 = d - d1;
    segment_area(r1, d1) + segment_area(r2, d2)
}

fn segment_area(r: f64, apothem: f64) -> f64 {
    let cos = (apothem / r).clamp(-1.0, 1.0);
    r * r * cos.acos() - apothem * (r * r - apothem * apothem).max(0.0).sqrt()
}

/// Bisection on the center distance. The lens area is strictly decreasing in
/// d between containment and tangency, so 64 halvings pin it down well past
/// f64 resolution.
fn solve_distance(r1: f64, r2: f64, target: f64) -> f64 {
    let mut lo = (r1 - r2).abs();
    let mut hi = r1 + r2;
    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if lens_area(r1, r2, mid) > target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// SVG path outlining the lens: the arc of each circle that lies inside the
/// other, joined at the two circle-intersection points.
fn lens_path(c1: &VennCircle, c2: &VennCircle) -> Option<String> {
    let d = c2.cx - c1.cx; // circles share cy
    if c1.r <= 0.0 || c2.r <= 0.0 || d >= c1.r + c2.r {
        return None;
    }
    if d <= (c1.r - c2.r).abs() {
        // containment: the smaller circle is the whole lens
        let s = if c1.r <= c2.r { c1 } else { c2 };
        return Some(circle_path(s));
    }

    let a = (d * d + c1.r * c1.r - c2.r * c2.r) / (2.0 * d);
    let h = (c1.r * c1.r - a * a).max(0.0).sqrt();
    let px = c1.cx + a;
    let top = c1.cy - h;
    let bottom = c1.cy + h;

    // A chord past a circle's center means its lens arc spans more than a
    // half circle.
    let large1 = if a < 0.0 { 1 } else { 0 };
    let large2 = if d - a < 0.0 { 1 } else { 0 };

    Some(format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
        px, top, c1.r, c1.r, large1, px, bottom, c2.r, c2.r, large2, px, top
    ))
}

fn circle_path(c: &VennCircle) -> String {
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 1 1 {:.2} {:.2} A {:.2} {:.2} 0 1 1 {:.2} {:.2} Z",
        c.cx,
        c.cy - c.r,
        c.r,
        c.r,
        c.cx,
        c.cy + c.r,
        c.r,
        c.r,
        c.cx,
        c.cy - c.r
    )
}
