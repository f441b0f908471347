//! Smooth scroll from the call-to-action button to the apps section.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// A request to scroll the apps section into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// Scroll request for a CTA click, if both the button and the apps section
/// exist.
pub fn cta_scroll(cta_present: bool, apps_present: bool) -> Option<ScrollRequest> {
    if !(cta_present && apps_present) {
        log::debug!("cta button or apps section missing, no scroll");
        return None;
    }
    Some(ScrollRequest {
        behavior: ScrollBehavior::Smooth,
        block: ScrollBlock::Start,
    })
}
