//! Built-in breakpoint sets.
//!
//! Priorities follow the usual responsive convention: exact ranges
//! (`xs`..`xl`) beat `lt-*` ranges, which beat `gt-*` ranges, and narrower
//! ranges beat wider ones within each family.

use crate::breakpoint::definition::Breakpoint;
use crate::media::query::{MediaCondition, MediaFeature, MediaQuery};
use crate::media::viewport::Orientation;

/// `xs`, `sm`, `md`, `lg`, `xl`, `lt-sm`..`lt-xl`, `gt-xs`..`gt-lg`.
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new(
            "xs",
            MediaQuery::new(MediaCondition::screen().and(MediaFeature::MaxWidth(599.98))),
        )
        .with_priority(1000),
        Breakpoint::new("sm", MediaQuery::between(600.0, 959.98)).with_priority(900),
        Breakpoint::new("md", MediaQuery::between(960.0, 1279.98)).with_priority(800),
        Breakpoint::new("lg", MediaQuery::between(1280.0, 1919.98)).with_priority(700),
        Breakpoint::new("xl", MediaQuery::between(1920.0, 4999.98)).with_priority(600),
        Breakpoint::new("lt-sm", MediaQuery::max_width(599.98)).with_priority(950),
        Breakpoint::new("lt-md", MediaQuery::max_width(959.98)).with_priority(850),
        Breakpoint::new("lt-lg", MediaQuery::max_width(1279.98)).with_priority(750),
        Breakpoint::new("lt-xl", MediaQuery::max_width(1919.98)).with_priority(650),
        Breakpoint::new("gt-xs", MediaQuery::min_width(600.0)).with_priority(-950),
        Breakpoint::new("gt-sm", MediaQuery::min_width(960.0)).with_priority(-850),
        Breakpoint::new("gt-md", MediaQuery::min_width(1280.0)).with_priority(-750),
        Breakpoint::new("gt-lg", MediaQuery::min_width(1920.0)).with_priority(-650),
    ]
}

/// Device-class breakpoints keyed on orientation: `handset`, `tablet`, `web`
/// and their `.portrait` / `.landscape` variants.
pub fn orientation_breakpoints() -> Vec<Breakpoint> {
    let handset_portrait = range(None, Some(599.98), Orientation::Portrait);
    let handset_landscape = range(None, Some(959.98), Orientation::Landscape);
    let tablet_portrait = range(Some(600.0), Some(839.98), Orientation::Portrait);
    let tablet_landscape = range(Some(960.0), Some(1279.98), Orientation::Landscape);
    let web_portrait = range(Some(840.0), None, Orientation::Portrait);
    let web_landscape = range(Some(1280.0), None, Orientation::Landscape);

    vec![
        Breakpoint::new(
            "handset",
            MediaQuery::new(handset_portrait.clone()).or(handset_landscape.clone()),
        )
        .with_priority(2000),
        Breakpoint::new("handset.landscape", MediaQuery::new(handset_landscape)).with_priority(2000),
        Breakpoint::new("handset.portrait", MediaQuery::new(handset_portrait)).with_priority(2000),
        Breakpoint::new(
            "tablet",
            MediaQuery::new(tablet_portrait.clone()).or(tablet_landscape.clone()),
        )
        .with_priority(2100),
        Breakpoint::new("tablet.landscape", MediaQuery::new(tablet_landscape)).with_priority(2100),
        Breakpoint::new("tablet.portrait", MediaQuery::new(tablet_portrait)).with_priority(2100),
        Breakpoint::new(
            "web",
            MediaQuery::new(web_portrait.clone()).or(web_landscape.clone()),
        )
        .with_priority(2200),
        Breakpoint::new("web.landscape", MediaQuery::new(web_landscape)).with_priority(2200),
        Breakpoint::new("web.portrait", MediaQuery::new(web_portrait)).with_priority(2200),
    ]
}

fn range(min: Option<f32>, max: Option<f32>, orientation: Orientation) -> MediaCondition {
    let mut condition = MediaCondition::all();
    if let Some(min) = min {
        condition = condition.and(MediaFeature::MinWidth(min));
    }
    if let Some(max) = max {
        condition = condition.and(MediaFeature::MaxWidth(max));
    }
    condition.and(MediaFeature::Orientation(orientation))
}
