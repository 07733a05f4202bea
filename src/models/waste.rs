//! Farm waste reuse models

use std::fmt;
use std::str::FromStr;

/// Farm waste materials with known reuse options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteType {
    RiceStraw,
    WheatHusk,
    CowDung,
    VegetablePeels,
    DryLeaves,
    CornCobs,
}

impl WasteType {
    pub const ALL: [WasteType; 6] = [
        WasteType::RiceStraw,
        WasteType::WheatHusk,
        WasteType::CowDung,
        WasteType::VegetablePeels,
        WasteType::DryLeaves,
        WasteType::CornCobs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WasteType::RiceStraw => "Rice Straw",
            WasteType::WheatHusk => "Wheat Husk",
            WasteType::CowDung => "Cow Dung",
            WasteType::VegetablePeels => "Vegetable Peels",
            WasteType::DryLeaves => "Dry Leaves",
            WasteType::CornCobs => "Corn Cobs",
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown waste type: '{0}'")]
pub struct UnknownWasteType(pub String);

impl FromStr for WasteType {
    type Err = UnknownWasteType;

    /// Case-insensitive; spaces, `-` and `_` are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        WasteType::ALL
            .iter()
            .copied()
            .find(|w| w.name().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| UnknownWasteType(s.trim().to_string()))
    }
}

/// How strongly a reuse option is recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Primary,
    Secondary,
}

/// A single reuse idea for a waste material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReuseSuggestion {
    pub emphasis: Emphasis,
    pub icon: &'static str,
    pub title: &'static str,
    pub detail: &'static str,
}
