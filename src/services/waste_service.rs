use crate::models::{Emphasis, ReuseSuggestion, WasteType};

const fn primary(icon: &'static str, title: &'static str, detail: &'static str) -> ReuseSuggestion {
    ReuseSuggestion { emphasis: Emphasis::Primary, icon, title, detail }
}

const fn secondary(icon: &'static str, title: &'static str, detail: &'static str) -> ReuseSuggestion {
    ReuseSuggestion { emphasis: Emphasis::Secondary, icon, title, detail }
}

const RICE_STRAW: &[ReuseSuggestion] = &[
    primary("🍄", "Mushroom Cultivation", "Perfect bed for Oyster Mushrooms."),
    secondary("🔥", "Bio-Briquettes", "Compress for eco-fuel."),
];
const WHEAT_HUSK: &[ReuseSuggestion] = &[
    primary("🐮", "Cattle Feed", "Mix with molasses for fodder."),
];
const COW_DUNG: &[ReuseSuggestion] = &[
    primary("⚡", "Biogas Plant", "Generate electricity and cooking gas."),
    secondary("🪱", "Vermicompost", "Turn into organic fertilizer."),
];
const VEGETABLE_PEELS: &[ReuseSuggestion] = &[
    primary("🌱", "Organic Compost", "Nitrogen-rich soil additive."),
];
const DRY_LEAVES: &[ReuseSuggestion] = &[
    primary("🍂", "Mulching", "Retain soil moisture."),
];
const CORN_COBS: &[ReuseSuggestion] = &[
    primary("🔥", "Industrial Fuel", "High calorific value for boilers."),
];

/// Reuse ideas for a waste material, primary first
pub fn suggestions(waste: WasteType) -> &'static [ReuseSuggestion] {
    match waste {
        WasteType::RiceStraw => RICE_STRAW,
        WasteType::WheatHusk => WHEAT_HUSK,
        WasteType::CowDung => COW_DUNG,
        WasteType::VegetablePeels => VEGETABLE_PEELS,
        WasteType::DryLeaves => DRY_LEAVES,
        WasteType::CornCobs => CORN_COBS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_waste_type_has_a_primary_suggestion() {
        for waste in WasteType::ALL {
            let ideas = suggestions(waste);
            assert!(!ideas.is_empty(), "{} has no suggestions", waste);
            assert_eq!(ideas[0].emphasis, Emphasis::Primary);
        }
    }

    #[test]
    fn test_known_mappings() {
        assert_eq!(suggestions(WasteType::RiceStraw)[0].title, "Mushroom Cultivation");
        assert_eq!(suggestions(WasteType::CowDung)[1].title, "Vermicompost");
        assert_eq!(suggestions(WasteType::CornCobs)[0].title, "Industrial Fuel");
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!("rice straw".parse::<WasteType>(), Ok(WasteType::RiceStraw));
        assert_eq!("Cow-Dung".parse::<WasteType>(), Ok(WasteType::CowDung));
        assert_eq!("vegetable_peels".parse::<WasteType>(), Ok(WasteType::VegetablePeels));
        assert_eq!("CORNCOBS".parse::<WasteType>(), Ok(WasteType::CornCobs));
        assert!("plastic".parse::<WasteType>().is_err());
    }
}
