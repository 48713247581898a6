//! Core domain types for the alarm editing session

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of an alarm owned by the alarm domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmId(pub i32);

impl AlarmId {
    /// Placeholder id carried by a state with no edit session
    pub const NONE: AlarmId = AlarmId(-1);

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for AlarmId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the alarm edit session as published by the store.
///
/// `is_new` implies `is_editing`; every constructor (including
/// deserialization) upholds that, so the fields are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEditingState")]
pub struct EditingState {
    is_editing: bool,
    is_new: bool,
    id: AlarmId,
}

impl EditingState {
    /// Build a state, rejecting `is_new` without `is_editing`
    pub fn new(is_editing: bool, is_new: bool, id: impl Into<AlarmId>) -> Result<Self> {
        if is_new && !is_editing {
            return Err(Error::invalid_state("a new alarm must be in an edit session"));
        }
        Ok(Self {
            is_editing,
            is_new,
            id: id.into(),
        })
    }

    /// No edit session active
    pub const fn not_editing() -> Self {
        Self {
            is_editing: false,
            is_new: false,
            id: AlarmId::NONE,
        }
    }

    /// Editing an existing alarm
    pub fn editing(id: impl Into<AlarmId>) -> Self {
        Self {
            is_editing: true,
            is_new: false,
            id: id.into(),
        }
    }

    /// Editing an alarm that has not been saved yet
    pub fn creating(id: impl Into<AlarmId>) -> Self {
        Self {
            is_editing: true,
            is_new: true,
            id: id.into(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn id(&self) -> AlarmId {
        self.id
    }
}

impl Default for EditingState {
    fn default() -> Self {
        Self::not_editing()
    }
}

#[derive(Deserialize)]
struct RawEditingState {
    is_editing: bool,
    #[serde(default)]
    is_new: bool,
    id: AlarmId,
}

impl TryFrom<RawEditingState> for EditingState {
    type Error = Error;

    fn try_from(raw: RawEditingState) -> Result<Self> {
        Self::new(raw.is_editing, raw.is_new, raw.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_new_without_editing() {
        let err = EditingState::new(false, true, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidState { .. }));
    }

    #[test]
    fn test_new_accepts_valid_combinations() {
        assert!(EditingState::new(false, false, 1).is_ok());
        assert!(EditingState::new(true, false, 1).is_ok());
        assert!(EditingState::new(true, true, 1).is_ok());
    }

    #[test]
    fn test_constructors() {
        let idle = EditingState::not_editing();
        assert!(!idle.is_editing());
        assert!(!idle.is_new());
        assert_eq!(idle.id(), AlarmId::NONE);

        let edit = EditingState::editing(7);
        assert!(edit.is_editing());
        assert!(!edit.is_new());
        assert_eq!(edit.id(), AlarmId(7));

        let create = EditingState::creating(9);
        assert!(create.is_editing());
        assert!(create.is_new());
    }

    #[test]
    fn test_default_is_not_editing() {
        assert_eq!(EditingState::default(), EditingState::not_editing());
    }

    #[test]
    fn test_deserialize_enforces_invariant() {
        let ok: EditingState =
            serde_json::from_str(r#"{"is_editing":true,"is_new":true,"id":4}"#).unwrap();
        assert_eq!(ok, EditingState::creating(4));

        let bad = serde_json::from_str::<EditingState>(r#"{"is_editing":false,"is_new":true,"id":4}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_deserialize_defaults_is_new() {
        let state: EditingState = serde_json::from_str(r#"{"is_editing":true,"id":2}"#).unwrap();
        assert_eq!(state, EditingState::editing(2));
    }

    #[test]
    fn test_serialize_field_names() {
        let json = serde_json::to_string(&EditingState::editing(7)).unwrap();
        assert_eq!(json, r#"{"is_editing":true,"is_new":false,"id":7}"#);
    }
}
