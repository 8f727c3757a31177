//! Flattened status feedback → conditions + extras.
//!
//! The status-propagation mechanism cannot carry nested structure, so each
//! condition arrives as one feedback entry per field, named
//! `<ConditionType>-<Field>` (`Available-Status`, `Available-Message`).
//! Everything that does not follow that pattern is an "extra"
//! (`Replicas`, `Version-Current`).
//!
//! Names are split on the *first* hyphen. A condition type that itself
//! contains a hyphen is therefore mis-split; the naming convention does not
//! allow telling the two apart, so no attempt is made.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::document::FeedbackValue;
use crate::types::Condition;

/// Field suffix carrying the condition status.
pub const STATUS_FIELD: &str = "Status";
/// Field suffix carrying the condition reason.
pub const REASON_FIELD: &str = "Reason";
/// Field suffix carrying the condition message.
pub const MESSAGE_FIELD: &str = "Message";
/// Field suffix carrying the last transition time.
pub const LAST_TRANSITION_TIME_FIELD: &str = "LastTransitionTime";

/// Condition field a feedback name routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConditionField {
    Status,
    Reason,
    Message,
    LastTransitionTime,
}

impl ConditionField {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            STATUS_FIELD => Some(Self::Status),
            REASON_FIELD => Some(Self::Reason),
            MESSAGE_FIELD => Some(Self::Message),
            LAST_TRANSITION_TIME_FIELD => Some(Self::LastTransitionTime),
            _ => None,
        }
    }

    fn slot<'a>(self, condition: &'a mut Condition) -> &'a mut String {
        match self {
            Self::Status => &mut condition.status,
            Self::Reason => &mut condition.reason,
            Self::Message => &mut condition.message,
            Self::LastTransitionTime => &mut condition.last_transition_time,
        }
    }
}

/// Result of flattening one manifest's feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    /// Conditions in order of first appearance.
    pub conditions: Vec<Condition>,
    /// Non-condition entries by full name.
    pub extras: HashMap<String, String>,
}

impl Feedback {
    /// Look up an extra by its full feedback name.
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras.get(name).map(String::as_str)
    }
}

/// Group feedback entries into conditions and extras.
///
/// `non_condition_prefixes` lists prefixes that are never condition types
/// even when followed by a condition field (`Version-Status`). When a
/// condition field or an extra repeats, the first value wins.
pub fn flatten(values: &[FeedbackValue], non_condition_prefixes: &[String]) -> Feedback {
    let mut conditions: Vec<Condition> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut filled: Vec<(usize, ConditionField)> = Vec::new();
    let mut extras = HashMap::new();

    for entry in values {
        let value = entry.field_value.render();

        match condition_route(&entry.name, non_condition_prefixes) {
            Some((condition_type, field)) => {
                let position = *positions.entry(condition_type).or_insert_with(|| {
                    conditions.push(Condition::new(condition_type));
                    conditions.len().saturating_sub(1)
                });

                if filled.contains(&(position, field)) {
                    continue;
                }
                filled.push((position, field));

                if let Some(condition) = conditions.get_mut(position) {
                    *field.slot(condition) = value;
                }
            }
            None => {
                if let Entry::Vacant(slot) = extras.entry(entry.name.clone()) {
                    slot.insert(value);
                }
            }
        }
    }

    Feedback { conditions, extras }
}

/// Split a feedback name into `(condition type, field)` if it names a
/// condition field.
fn condition_route<'a>(
    name: &'a str,
    non_condition_prefixes: &[String],
) -> Option<(&'a str, ConditionField)> {
    let (prefix, suffix) = name.split_once('-')?;
    let field = ConditionField::from_suffix(suffix)?;

    if non_condition_prefixes.iter().any(|p| p == prefix) {
        return None;
    }

    Some((prefix, field))
}
