use crate::ids::IndustryCode;

/// Curated industry with its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Industry {
    pub code: &'static str,
    pub name: &'static str,
}

impl Industry {
    pub fn code(&self) -> IndustryCode {
        IndustryCode(self.code.to_string())
    }
}

/// Industries offered in the selector, in display order.
pub const INDUSTRIES: &[Industry] = &[
    Industry { code: "5411", name: "Legal services" },
    Industry { code: "7225", name: "Restaurants" },
    Industry { code: "4481", name: "Clothing stores" },
    Industry { code: "5221", name: "Banks" },
    Industry { code: "4511", name: "Sporting goods stores" },
    Industry { code: "4512", name: "Book stores" },
    Industry { code: "5312", name: "Real estate brokerage offices" },
    Industry { code: "531320", name: "Appraisal firms" },
    Industry { code: "8121", name: "Personal care services" },
];

/// Looks up the display name of a catalogue industry.
pub fn industry_name(code: &IndustryCode) -> Option<&'static str> {
    INDUSTRIES
        .iter()
        .find(|industry| industry.code == code.as_str())
        .map(|industry| industry.name)
}

/// Display name, falling back to the raw code for industries outside the
/// catalogue.
pub fn display_name(code: &IndustryCode) -> String {
    industry_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}
