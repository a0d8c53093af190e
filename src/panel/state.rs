//! Panel identity, host-state snapshot, and the dispatch action vocabulary.

/// The mutually-exclusive base panels. At most one may be visible at a time;
/// the dialogue overlay is tracked on [`UiSnapshot`] and may coexist with any
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Inventory,
    QuestLog,
    CharacterScreen,
    FactionStatus,
    Shop,
}

impl Panel {
    pub fn all() -> &'static [Panel] {
        &[
            Panel::Inventory,
            Panel::QuestLog,
            Panel::CharacterScreen,
            Panel::FactionStatus,
            Panel::Shop,
        ]
    }

    /// Stable name used in queue deduplication ids and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Inventory => "inventory",
            Panel::QuestLog => "quest_log",
            Panel::CharacterScreen => "character_screen",
            Panel::FactionStatus => "faction_status",
            Panel::Shop => "shop",
        }
    }

    /// The dispatch action that closes this panel.
    pub fn close_action(&self) -> StateAction {
        match self {
            Panel::Inventory => StateAction::SetInventoryVisible(false),
            Panel::QuestLog => StateAction::SetQuestLogVisible(false),
            Panel::CharacterScreen => StateAction::SetCharacterScreenVisible(false),
            Panel::FactionStatus => StateAction::SetFactionStatusVisible(false),
            Panel::Shop => StateAction::CloseShop,
        }
    }

    /// The dispatch action that opens this panel. `None` for the shop: its
    /// contents come from host data the guard never sees, so the guard can
    /// close a shop but never open one.
    pub fn open_action(&self) -> Option<StateAction> {
        match self {
            Panel::Inventory => Some(StateAction::SetInventoryVisible(true)),
            Panel::QuestLog => Some(StateAction::SetQuestLogVisible(true)),
            Panel::CharacterScreen => Some(StateAction::SetCharacterScreenVisible(true)),
            Panel::FactionStatus => Some(StateAction::SetFactionStatusVisible(true)),
            Panel::Shop => None,
        }
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only snapshot of the host's panel-visibility state. The guard only
/// reads these flags; all mutation flows back through dispatched
/// [`StateAction`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiSnapshot {
    pub show_inventory: bool,
    pub show_quest_log: bool,
    pub show_character_screen: bool,
    pub show_faction_status: bool,
    /// Whether a shop session is active (the host's nullable shop state,
    /// collapsed to a flag).
    pub shop_open: bool,
    /// Dialogue overlay; coexists with a base panel and is never touched by
    /// close-all.
    pub dialogue_open: bool,
}

impl UiSnapshot {
    /// Pure predicate: is the given base panel currently visible?
    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Inventory => self.show_inventory,
            Panel::QuestLog => self.show_quest_log,
            Panel::CharacterScreen => self.show_character_screen,
            Panel::FactionStatus => self.show_faction_status,
            Panel::Shop => self.shop_open,
        }
    }

    /// Whether any base panel is visible.
    pub fn any_panel_open(&self) -> bool {
        Panel::all().iter().any(|panel| self.is_open(*panel))
    }
}

/// State-mutating actions the guard constructs for the host's `dispatch`
/// callback. The guard never interprets host state beyond this vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    SetInventoryVisible(bool),
    SetQuestLogVisible(bool),
    SetCharacterScreenVisible(bool),
    SetFactionStatusVisible(bool),
    CloseShop,
}
