//! Command-line interface.

use clap::{Parser, ValueEnum};

use crate::query::params::View;

/// Browse a grant-funding catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "fundsea", version, about)]
pub struct Args {
    /// View to open at startup.
    #[arg(long, value_enum, default_value_t = StartView::Projects)]
    pub view: StartView,

    /// Backend API root, overriding the config file.
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Startup view choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartView {
    /// Funds and their campaigns.
    Funds,
    /// Project list.
    Projects,
    /// Idea list.
    Ideas,
    /// Uniqueness leaderboard.
    Uniqueness,
    /// Social-impact leaderboard.
    SocialImpact,
    /// Environmental-impact leaderboard.
    EnvironmentalImpact,
    /// SDG-alignment leaderboard.
    Sdg,
}

impl From<StartView> for View {
    fn from(value: StartView) -> Self {
        match value {
            StartView::Funds => Self::Funds,
            StartView::Projects => Self::Projects,
            StartView::Ideas => Self::Ideas,
            StartView::Uniqueness => Self::Uniqueness,
            StartView::SocialImpact => Self::SocialImpact,
            StartView::EnvironmentalImpact => Self::EnvironmentalImpact,
            StartView::Sdg => Self::Sdg,
        }
    }
}
