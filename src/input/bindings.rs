//! Action-to-key binding configuration with save/load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::key_code::KeyCode;

const BINDINGS_FILE: &str = "input_bindings.json";

/// Game actions the input layer recognizes. Each maps to one or more
/// physical keys; the four movement actions default to an arrow key plus its
/// WASD equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,
    Cancel,
    Menu,
    Character,
    Inventory,
    QuestLog,
    FactionStatus,
}

impl GameAction {
    pub fn all() -> &'static [GameAction] {
        &[
            GameAction::MoveUp,
            GameAction::MoveDown,
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Interact,
            GameAction::Cancel,
            GameAction::Menu,
            GameAction::Character,
            GameAction::Inventory,
            GameAction::QuestLog,
            GameAction::FactionStatus,
        ]
    }
}

/// Configurable key bindings. The defaults form the fixed key taxonomy the
/// controller consults to decide whether a native event should be swallowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputBindings {
    pub actions: HashMap<GameAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut actions = HashMap::new();
        actions.insert(
            GameAction::MoveUp,
            vec![KeyCode::from("ArrowUp"), KeyCode::from("KeyW")],
        );
        actions.insert(
            GameAction::MoveDown,
            vec![KeyCode::from("ArrowDown"), KeyCode::from("KeyS")],
        );
        actions.insert(
            GameAction::MoveLeft,
            vec![KeyCode::from("ArrowLeft"), KeyCode::from("KeyA")],
        );
        actions.insert(
            GameAction::MoveRight,
            vec![KeyCode::from("ArrowRight"), KeyCode::from("KeyD")],
        );
        actions.insert(GameAction::Interact, vec![KeyCode::from("KeyE")]);
        actions.insert(GameAction::Cancel, vec![KeyCode::from("Escape")]);
        actions.insert(GameAction::Menu, vec![KeyCode::from("KeyM")]);
        actions.insert(GameAction::Character, vec![KeyCode::from("KeyC")]);
        actions.insert(GameAction::Inventory, vec![KeyCode::from("KeyI")]);
        actions.insert(GameAction::QuestLog, vec![KeyCode::from("KeyQ")]);
        actions.insert(GameAction::FactionStatus, vec![KeyCode::from("KeyF")]);
        Self { actions }
    }
}

impl InputBindings {
    /// Load bindings from the default file.
    pub fn load() -> Result<Self> {
        Self::load_from(BINDINGS_FILE)
    }

    /// Load bindings from a path. A missing file yields the defaults; a
    /// loaded file is normalized so every action has a binding list.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let mut bindings: Self = serde_json::from_str(&content)?;
        bindings.normalize();
        Ok(bindings)
    }

    /// Save bindings to the default file.
    pub fn save(&self) -> Result<()> {
        self.save_to(BINDINGS_FILE)
    }

    /// Save bindings to a path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The action bound to `key`, if any. Lookup follows the fixed
    /// [`GameAction::all`] order, so a key bound to several actions resolves
    /// deterministically.
    pub fn action_for(&self, key: &KeyCode) -> Option<GameAction> {
        GameAction::all()
            .iter()
            .copied()
            .find(|action| self.keys_for(*action).contains(key))
    }

    /// Whether `key` belongs to the recognized taxonomy.
    pub fn recognizes(&self, key: &KeyCode) -> bool {
        self.action_for(key).is_some()
    }

    /// Keys bound to `action`. Empty when unbound.
    pub fn keys_for(&self, action: GameAction) -> &[KeyCode] {
        self.actions.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    fn normalize(&mut self) {
        let defaults = Self::default();
        for action in GameAction::all() {
            self.actions
                .entry(*action)
                .or_insert_with(|| defaults.actions.get(action).cloned().unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_every_action() {
        let bindings = InputBindings::default();
        for action in GameAction::all() {
            assert!(
                !bindings.keys_for(*action).is_empty(),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn movement_actions_have_two_keys() {
        let bindings = InputBindings::default();
        for action in [
            GameAction::MoveUp,
            GameAction::MoveDown,
            GameAction::MoveLeft,
            GameAction::MoveRight,
        ] {
            assert_eq!(bindings.keys_for(action).len(), 2);
        }
    }

    #[test]
    fn action_for_resolves_both_group_keys() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.action_for(&KeyCode::from("ArrowUp")),
            Some(GameAction::MoveUp)
        );
        assert_eq!(
            bindings.action_for(&KeyCode::from("KeyW")),
            Some(GameAction::MoveUp)
        );
        assert_eq!(bindings.action_for(&KeyCode::from("KeyZ")), None);
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let bindings = InputBindings::load_from(dir.path().join("nope.json")).unwrap();
        assert_eq!(bindings, InputBindings::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bindings.json");

        let mut bindings = InputBindings::default();
        bindings
            .actions
            .insert(GameAction::Interact, vec![KeyCode::from("Space")]);
        bindings.save_to(&path).unwrap();

        let loaded = InputBindings::load_from(&path).unwrap();
        assert_eq!(
            loaded.keys_for(GameAction::Interact),
            &[KeyCode::from("Space")]
        );
    }

    #[test]
    fn load_normalizes_missing_actions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{"actions":{"interact":["Space"]}}"#).unwrap();

        let loaded = InputBindings::load_from(&path).unwrap();
        assert_eq!(
            loaded.keys_for(GameAction::Interact),
            &[KeyCode::from("Space")]
        );
        // Actions absent from the file fall back to their defaults.
        assert_eq!(
            loaded.keys_for(GameAction::MoveUp),
            InputBindings::default().keys_for(GameAction::MoveUp)
        );
    }
}
