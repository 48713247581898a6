//! Menu items, layout, and the state-to-menu projection

use serde::{Deserialize, Serialize};

use crate::types::EditingState;

/// Items of the options menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItem {
    DeleteAlarm,
    Settings,
    Share,
    Review,
    DashClock,
    Mp3Cutter,
    About,
}

impl MenuItem {
    /// Get all menu items in display order
    pub fn all() -> &'static [MenuItem] {
        &[
            MenuItem::DeleteAlarm,
            MenuItem::Settings,
            MenuItem::Share,
            MenuItem::Review,
            MenuItem::DashClock,
            MenuItem::Mp3Cutter,
            MenuItem::About,
        ]
    }

    pub const fn title(self) -> &'static str {
        match self {
            MenuItem::DeleteAlarm => "Delete alarm",
            MenuItem::Settings => "Settings",
            MenuItem::Share => "Share",
            MenuItem::Review => "Review",
            MenuItem::DashClock => "DashClock",
            MenuItem::Mp3Cutter => "MP3 cutter",
            MenuItem::About => "About",
        }
    }
}

/// Ordered menu items with their visibility when the menu is first built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLayout {
    pub items: Vec<(MenuItem, bool)>,
}

impl MenuLayout {
    /// The standard options menu.
    ///
    /// The delete item starts hidden and is driven by the descriptor from
    /// then on; the DashClock companion item is static.
    pub fn standard(show_dashclock: bool) -> Self {
        let items = MenuItem::all()
            .iter()
            .map(|&item| {
                let visible = match item {
                    MenuItem::DeleteAlarm => false,
                    MenuItem::DashClock => show_dashclock,
                    _ => true,
                };
                (item, visible)
            })
            .collect();
        Self { items }
    }

    pub fn is_visible(&self, item: MenuItem) -> bool {
        self.items
            .iter()
            .any(|&(candidate, visible)| candidate == item && visible)
    }
}

/// Visibility and affordance flags derived from an [`EditingState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct MenuDescriptor {
    pub show_delete_action: bool,
    pub back_affordance_enabled: bool,
}

impl MenuDescriptor {
    /// Descriptor used whenever no edit session is known
    pub const NOT_EDITING: MenuDescriptor = MenuDescriptor {
        show_delete_action: false,
        back_affordance_enabled: false,
    };
}

/// Project an editing state onto the menu.
///
/// An existing alarm under edit can be deleted; a new one cannot. The back
/// affordance follows the edit session.
pub fn project(state: &EditingState) -> MenuDescriptor {
    MenuDescriptor {
        show_delete_action: state.is_editing() && !state.is_new(),
        back_affordance_enabled: state.is_editing(),
    }
}
