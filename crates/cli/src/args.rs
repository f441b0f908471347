//! Argument value parsers.

use std::str::FromStr;

/// A mid-run resize: `WxH@frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeAt {
    pub width: usize,
    pub height: usize,
    /// Frames run before the resize.
    pub frame: u64,
}

impl FromStr for ResizeAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, frame) = s
            .split_once('@')
            .ok_or_else(|| format!("expected WxH@frame, got {s:?}"))?;
        let (w, h) = size
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WxH before '@', got {size:?}"))?;
        let parse = |v: &str, what: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("bad {what} {v:?}: {e}"))
        };
        Ok(Self {
            width: parse(w, "width")?,
            height: parse(h, "height")?,
            frame: frame
                .trim()
                .parse()
                .map_err(|e| format!("bad frame {frame:?}: {e}"))?,
        })
    }
}
