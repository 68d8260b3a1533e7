//! Reward editor state for bonus days and streak milestones
//!
//! The editor holds one or two rows, each with a kind and a (possibly empty)
//! value. Every mutation that would break the invariants is refused and leaves
//! the rows exactly as they were.

use rewards_admin_core::{RewardEntry, RewardKind, RewardList, ValidationErrors, MAX_REWARD_ENTRIES};

/// Per-module validation rules for reward values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardRules {
    /// Smallest value accepted for a single entry
    pub min_value: u32,
}

impl RewardRules {
    /// Bonus days require every entry to grant at least 1
    pub const BONUS_DAY: RewardRules = RewardRules { min_value: 1 };
    /// Streak milestones accept 0 on individual entries
    pub const STREAK_MILESTONE: RewardRules = RewardRules { min_value: 0 };
}

/// One editable reward row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardDraft {
    pub kind: RewardKind,
    /// `None` while the input is empty
    pub value: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEditor {
    rows: Vec<RewardDraft>,
}

impl Default for RewardEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardEditor {
    /// A fresh editor with a single empty Coins row
    pub fn new() -> Self {
        Self {
            rows: vec![RewardDraft {
                kind: RewardKind::Coins,
                value: None,
            }],
        }
    }

    /// Seed the editor from a stored list (an empty list gives a fresh editor)
    pub fn from_list(list: &RewardList) -> Self {
        if list.is_empty() {
            return Self::new();
        }
        Self {
            rows: list
                .entries()
                .iter()
                .map(|e| RewardDraft {
                    kind: e.kind,
                    value: Some(e.value),
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[RewardDraft] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.rows.len() < MAX_REWARD_ENTRIES
    }

    fn kind_taken(&self, kind: RewardKind, except: Option<usize>) -> bool {
        self.rows
            .iter()
            .enumerate()
            .any(|(i, r)| Some(i) != except && r.kind == kind)
    }

    /// Add an empty row of whichever kind is unused. No-op when full.
    pub fn add_row(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        match RewardKind::ALL.into_iter().find(|k| !self.kind_taken(*k, None)) {
            Some(kind) => {
                self.rows.push(RewardDraft { kind, value: None });
                true
            }
            None => false,
        }
    }

    /// Add a filled row. No-op when full or when `kind` is already used.
    pub fn add(&mut self, kind: RewardKind, value: u32) -> bool {
        if !self.can_add() || self.kind_taken(kind, None) {
            return false;
        }
        self.rows.push(RewardDraft {
            kind,
            value: Some(value),
        });
        true
    }

    /// Remove a row. No-op for the last remaining row or a bad index.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Change a row's kind. No-op when another row already uses it.
    pub fn set_kind(&mut self, index: usize, kind: RewardKind) -> bool {
        if index >= self.rows.len() || self.kind_taken(kind, Some(index)) {
            return false;
        }
        self.rows[index].kind = kind;
        true
    }

    pub fn set_value(&mut self, index: usize, value: Option<u32>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.value = value;
                true
            }
            None => false,
        }
    }

    /// Set the value of the row holding `kind`, adding the row if there is room
    pub fn upsert(&mut self, kind: RewardKind, value: u32) -> bool {
        match self.rows.iter().position(|r| r.kind == kind) {
            Some(index) => self.set_value(index, Some(value)),
            None => self.add(kind, value),
        }
    }

    /// Kinds the row at `index` may switch to
    pub fn available_kinds(&self, index: usize) -> Vec<RewardKind> {
        RewardKind::ALL
            .into_iter()
            .filter(|k| !self.kind_taken(*k, Some(index)))
            .collect()
    }

    /// Check the rows and build the canonical list.
    ///
    /// Field errors are keyed `"<index>.value"`; the all-zero check is form-level.
    pub fn validate(&self, rules: RewardRules) -> Result<RewardList, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.rows.is_empty() {
            errors.set_form("Add at least one reward");
            return Err(errors);
        }

        let mut entries = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            match row.value {
                None => errors.add(format!("{i}.value"), format!("{} value is required", row.kind)),
                Some(v) if v < rules.min_value => errors.add(
                    format!("{i}.value"),
                    format!("{} value must be at least {}", row.kind, rules.min_value),
                ),
                Some(v) => entries.push(RewardEntry::new(row.kind, v)),
            }
        }

        if !self.rows.iter().any(|r| r.value.unwrap_or(0) > 0) {
            errors.set_form("At least one reward must have a value greater than 0");
        }

        errors.into_result()?;
        Ok(RewardList::from_entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_row_is_a_no_op() {
        let mut editor = RewardEditor::new();
        assert!(editor.add_row());
        assert_eq!(editor.rows()[1].kind, RewardKind::Xp);

        let before = editor.clone();
        assert!(!editor.add_row());
        assert!(!editor.add(RewardKind::Coins, 5));
        assert_eq!(editor, before);
    }

    #[test]
    fn test_duplicate_kind_is_a_no_op() {
        let mut editor = RewardEditor::new();
        editor.set_value(0, Some(10));
        assert!(editor.add(RewardKind::Xp, 3));

        let before = editor.clone();
        assert!(!editor.set_kind(1, RewardKind::Coins));
        assert_eq!(editor, before);
        assert_eq!(editor.available_kinds(1), vec![RewardKind::Xp]);

        let mut single = RewardEditor::new();
        assert!(!single.add(RewardKind::Coins, 1));
        assert!(single.set_kind(0, RewardKind::Xp));
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let mut editor = RewardEditor::new();
        assert!(!editor.remove_row(0));
        assert_eq!(editor.len(), 1);

        editor.add_row();
        assert!(editor.remove_row(0));
        assert_eq!(editor.rows()[0].kind, RewardKind::Xp);
        assert!(!editor.remove_row(3));
    }

    #[test]
    fn test_all_empty_or_zero_is_rejected() {
        let editor = RewardEditor::new();
        let errors = editor.validate(RewardRules::STREAK_MILESTONE).unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(errors.field("0.value"), Some("Coins value is required"));

        let mut zeros = RewardEditor::new();
        zeros.set_value(0, Some(0));
        zeros.add(RewardKind::Xp, 0);
        let errors = zeros.validate(RewardRules::STREAK_MILESTONE).unwrap_err();
        assert_eq!(
            errors.form(),
            Some("At least one reward must have a value greater than 0")
        );
    }

    #[test]
    fn test_minimums_differ_per_module() {
        let mut editor = RewardEditor::new();
        editor.set_value(0, Some(50));
        editor.add(RewardKind::Xp, 0);

        let milestone = editor.validate(RewardRules::STREAK_MILESTONE).unwrap();
        assert_eq!(milestone.entries(), &[RewardEntry::coins(50), RewardEntry::xp(0)]);

        let bonus = editor.validate(RewardRules::BONUS_DAY).unwrap_err();
        assert_eq!(bonus.field("1.value"), Some("XP value must be at least 1"));
        assert_eq!(bonus.form(), None);
    }

    #[test]
    fn test_failed_validation_keeps_edits() {
        let mut editor = RewardEditor::new();
        editor.add(RewardKind::Xp, 0);
        let before = editor.clone();
        assert!(editor.validate(RewardRules::BONUS_DAY).is_err());
        assert_eq!(editor, before);
    }

    #[test]
    fn test_from_list_and_upsert() {
        let list = RewardList::from_entries([RewardEntry::xp(20)]);
        let mut editor = RewardEditor::from_list(&list);
        assert_eq!(editor.rows()[0].value, Some(20));
        assert!(editor.upsert(RewardKind::Xp, 25));
        assert!(editor.upsert(RewardKind::Coins, 5));
        assert_eq!(editor.len(), 2);
        assert_eq!(
            editor.validate(RewardRules::BONUS_DAY).unwrap().entries(),
            &[RewardEntry::xp(25), RewardEntry::coins(5)]
        );

        assert_eq!(RewardEditor::from_list(&RewardList::new()), RewardEditor::new());
    }
}
