/// A span of text copied verbatim by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRule {
    pub open: &'static str,
    /// Closing marker, included in the region. End of text also closes it.
    pub close: &'static str,
}

impl RegionRule {
    const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }

    /// Byte offset one past the end of the region opened at `start`.
    ///
    /// `text[start..]` must begin with `self.open`. The first closer after
    /// the opener ends the region; there are no escapes.
    pub fn end(&self, text: &str, start: usize) -> usize {
        let body = start + self.open.len();
        text[body..]
            .find(self.close)
            .map_or(text.len(), |j| body + j + self.close.len())
    }
}

/// Protected regions in priority order; the first opener that matches wins.
///
/// Block comments come before the plain line comment, otherwise `--` would
/// claim them and only their first line would be protected. The em-dash
/// spellings are what some editors turn `--` into.
pub const REGION_RULES: &[RegionRule] = &[
    RegionRule::new("[[", "]]"),
    RegionRule::new("[=[", "]=]"),
    RegionRule::new("--[[", "]]"),
    RegionRule::new("--[=[", "]=]"),
    RegionRule::new("—[[", "]]"),
    RegionRule::new("—[=[", "]=]"),
    RegionRule::new("--", "\n"),
    RegionRule::new("\"", "\""),
    RegionRule::new("'", "'"),
];

/// The rule whose opener starts `rest`, if any.
pub fn match_region(rest: &str) -> Option<&'static RegionRule> {
    REGION_RULES.iter().find(|rule| rest.starts_with(rule.open))
}
