//! Dashboard page selection

use std::fmt;

/// The dashboard modules a command can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardPage {
    Home,
    MarketAnalytics,
    AgroWaste,
    CarbonCredit,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 4] = [
        DashboardPage::Home,
        DashboardPage::MarketAnalytics,
        DashboardPage::AgroWaste,
        DashboardPage::CarbonCredit,
    ];

    /// Resolve a command word (with prefix) to its page
    pub fn from_command(command: &str) -> Option<Self> {
        let command = command.to_lowercase();
        DashboardPage::ALL
            .into_iter()
            .find(|page| page.aliases().contains(&command.as_str()))
    }

    /// Every command word that opens this page, primary first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            DashboardPage::Home => &["$home", "$dashboard"],
            DashboardPage::MarketAnalytics => &["$market", "$forecast"],
            DashboardPage::AgroWaste => &["$waste", "$agrowaste"],
            DashboardPage::CarbonCredit => &["$carbon", "$credits"],
        }
    }

    /// Primary command that opens this page
    pub fn command(&self) -> &'static str {
        self.aliases()[0]
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardPage::Home => "Home",
            DashboardPage::MarketAnalytics => "Market Analytics",
            DashboardPage::AgroWaste => "AgroWaste (Smart Reuse)",
            DashboardPage::CarbonCredit => "CarbonCredit (Income Calc)",
        }
    }
}

impl fmt::Display for DashboardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_aliases() {
        assert_eq!(DashboardPage::from_command("$home"), Some(DashboardPage::Home));
        assert_eq!(DashboardPage::from_command("$FORECAST"), Some(DashboardPage::MarketAnalytics));
        assert_eq!(DashboardPage::from_command("$agrowaste"), Some(DashboardPage::AgroWaste));
        assert_eq!(DashboardPage::from_command("$credits"), Some(DashboardPage::CarbonCredit));
        assert_eq!(DashboardPage::from_command("$price"), None);
    }

    #[test]
    fn test_primary_command_round_trips() {
        for page in DashboardPage::ALL {
            assert_eq!(DashboardPage::from_command(page.command()), Some(page));
        }
    }
}
