use std::str::FromStr;

use crate::Error;

bitflags::bitflags! {
    /// Output style of a [`FrameName`](crate::FrameName). Fixed at construction.
    #[derive(Default)]
    pub struct Style: u32 {
        /// Drop the package prefix of class names.
        const SIMPLE = 1;
        /// Use `.` instead of `/` as the package separator.
        const DOTTED = 1 << 1;
        /// Append the method signature.
        const SIGNATURES = 1 << 2;
        /// Append a frame-kind suffix such as `_[j]`.
        const ANNOTATE = 1 << 3;
    }
}

impl FromStr for Style {
    type Err = Error;

    /// Parses a comma separated option list, e.g. `"simple,sig,ann"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Style::empty();
        for opt in s.split(',').map(str::trim).filter(|opt| !opt.is_empty()) {
            style |= match opt {
                "simple" => Style::SIMPLE,
                "dot" | "dotted" => Style::DOTTED,
                "sig" | "signatures" => Style::SIGNATURES,
                "ann" | "annotate" => Style::ANNOTATE,
                other => return Err(Error::UnknownStyle(other.to_owned())),
            };
        }
        Ok(style)
    }
}
