//! Menu actions, store commands, and external launch targets
//!
//! Menu selections arrive as string identifiers from the host UI. They are
//! resolved through [`ACTION_TABLE`] into a [`MenuAction`]; identifiers with
//! no entry have no behavior.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::menu::MenuItem;
use crate::types::AlarmId;

/// Source tag attached to back navigation coming from the action bar
pub const BACK_SOURCE: &str = "ActionBar";

const MARKET_DETAILS: &str = "market://details";
const MARKET_SEARCH: &str = "market://search";
const PLAY_STORE_DETAILS: &str = "https://play.google.com/store/apps/details";

/// A discrete action the user can select from the menu or action bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    OpenSettings,
    Review,
    DashClock,
    Mp3Cutter,
    Share,
    DeleteAlarm,
    About,
    /// The action bar's home/up affordance
    NavigateUp,
}

/// Mapping from host menu identifiers to actions
pub const ACTION_TABLE: &[(&str, MenuAction)] = &[
    ("menu_item_settings", MenuAction::OpenSettings),
    ("menu_review", MenuAction::Review),
    ("menu_dashclock", MenuAction::DashClock),
    ("menu_mp3cutter", MenuAction::Mp3Cutter),
    ("menu_share", MenuAction::Share),
    ("set_alarm_menu_delete_alarm", MenuAction::DeleteAlarm),
    ("menu_about", MenuAction::About),
    ("home", MenuAction::NavigateUp),
];

impl MenuAction {
    /// Resolve a host identifier, `None` if unmapped
    pub fn from_id(id: &str) -> Option<Self> {
        ACTION_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|&(_, action)| action)
    }

    /// Host identifier of this action
    pub fn id(self) -> &'static str {
        ACTION_TABLE
            .iter()
            .find(|&&(_, action)| action == self)
            .map(|&(id, _)| id)
            .unwrap_or("unknown")
    }

    /// Menu item backing this action (`None` for the home affordance)
    pub const fn menu_item(self) -> Option<MenuItem> {
        match self {
            MenuAction::OpenSettings => Some(MenuItem::Settings),
            MenuAction::Review => Some(MenuItem::Review),
            MenuAction::DashClock => Some(MenuItem::DashClock),
            MenuAction::Mp3Cutter => Some(MenuItem::Mp3Cutter),
            MenuAction::Share => Some(MenuItem::Share),
            MenuAction::DeleteAlarm => Some(MenuItem::DeleteAlarm),
            MenuAction::About => Some(MenuItem::About),
            MenuAction::NavigateUp => None,
        }
    }
}

/// Commands accepted by the state store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum StoreCommand {
    /// Back navigation, tagged with where it came from
    NavigateBack { source: String },
    /// Collapse the alarm details view
    HideDetails,
    DeleteAlarm { id: AlarmId },
    OpenSettings,
}

impl StoreCommand {
    pub fn navigate_back(source: impl Into<String>) -> Self {
        Self::NavigateBack {
            source: source.into(),
        }
    }

    pub fn delete_alarm(id: impl Into<AlarmId>) -> Self {
        Self::DeleteAlarm { id: id.into() }
    }
}

/// Targets handed to the external launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalTarget {
    /// Store listing of this app, for leaving a review
    ReviewListing,
    /// Store search for the DashClock companion app
    DashClockSearch,
    /// Store search for an MP3 cutter app
    Mp3CutterSearch,
    /// Share sheet carrying the store link of this app
    Share,
}

impl ExternalTarget {
    /// Build the URI the launcher should open for `app_id`
    pub fn uri(self, app_id: &str) -> Result<Url> {
        let url = match self {
            ExternalTarget::ReviewListing => with_query(MARKET_DETAILS, &[("id", app_id)])?,
            ExternalTarget::DashClockSearch => {
                with_query(MARKET_SEARCH, &[("q", "dash clock"), ("c", "apps")])?
            }
            ExternalTarget::Mp3CutterSearch => {
                with_query(MARKET_SEARCH, &[("q", "mp3 cutter"), ("c", "apps")])?
            }
            ExternalTarget::Share => with_query(PLAY_STORE_DETAILS, &[("id", app_id)])?,
        };
        Ok(url)
    }
}

fn with_query(base: &str, pairs: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut().extend_pairs(pairs.iter().copied());
    Ok(url)
}
