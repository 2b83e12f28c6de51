use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dates: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn is_completed(&self, day_key: &str) -> bool {
        self.dates.get(day_key).copied().unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLabel {
    pub date: String,
    pub weekday: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: String,
    pub weekday: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitView {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub streak: u32,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerView {
    pub today: String,
    pub days: Vec<DayLabel>,
    pub habits: Vec<HabitView>,
}
