use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Opaque task identifier assigned by the remote service.
///
/// The wire form may be a JSON number or a JSON string depending on the
/// backend; both deserialize into the same id and compare stably.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = TaskId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer task identifier")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<TaskId, E> {
                Ok(TaskId(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<TaskId, E> {
                Ok(TaskId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<TaskId, E> {
                Ok(TaskId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A single to-do item as last seen from the service.
///
/// Wire shape: `{ id, text, completed }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// Client-side view selector over the task collection. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Uncompleted,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [
        FilterMode::All,
        FilterMode::Completed,
        FilterMode::Uncompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Completed => "completed",
            FilterMode::Uncompleted => "uncompleted",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Completed => task.completed,
            FilterMode::Uncompleted => !task.completed,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "completed" | "done" => Ok(FilterMode::Completed),
            "uncompleted" | "incomplete" | "open" => Ok(FilterMode::Uncompleted),
            other => Err(anyhow!(
                "Unknown filter '{}': expected all|completed|uncompleted",
                other
            )),
        }
    }
}

impl ValueEnum for FilterMode {
    fn value_variants<'a>() -> &'a [Self] {
        &FilterMode::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_mode_parses_known_names() {
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!(
            "Completed".parse::<FilterMode>().unwrap(),
            FilterMode::Completed
        );
        assert_eq!("done".parse::<FilterMode>().unwrap(), FilterMode::Completed);
        assert_eq!(
            "open".parse::<FilterMode>().unwrap(),
            FilterMode::Uncompleted
        );
        assert!("finished".parse::<FilterMode>().is_err());
    }

    #[test]
    fn filter_mode_matches_completion_flag() {
        let done = Task {
            id: TaskId::from(1),
            text: "Buy milk".into(),
            completed: true,
        };
        assert!(FilterMode::All.matches(&done));
        assert!(FilterMode::Completed.matches(&done));
        assert!(!FilterMode::Uncompleted.matches(&done));
    }

    #[test]
    fn task_id_accepts_numeric_and_string_wire_forms() {
        let numeric: Task =
            serde_json::from_str(r#"{"id":7,"text":"Buy milk","completed":false}"#).unwrap();
        let string: Task =
            serde_json::from_str(r#"{"id":"a1b2","text":"Call bank","completed":true}"#).unwrap();

        assert_eq!(numeric.id, TaskId::from(7));
        assert_eq!(string.id, TaskId::from("a1b2"));
    }

    #[test]
    fn task_id_displays_its_wire_value() {
        assert_eq!(TaskId::from(7).to_string(), "7");
        assert_eq!(TaskId::from("a1b2").as_str(), "a1b2");
    }
}
