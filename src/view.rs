use crate::models::{DayCell, DayLabel, Habit, HabitView, TrackerView};
use crate::stats::{compute_streak, date_key, key_weekday_label, last_7_days};
use chrono::{Local, NaiveDate};

pub fn build_view(habits: &[Habit]) -> TrackerView {
    build_view_at(today(), habits)
}

/// Derives everything the page shows from the current collection.
pub fn build_view_at(today: NaiveDate, habits: &[Habit]) -> TrackerView {
    let days: Vec<DayLabel> = last_7_days(today)
        .into_iter()
        .map(|date| DayLabel {
            weekday: key_weekday_label(&date).to_string(),
            date,
        })
        .collect();

    let habits = habits
        .iter()
        .map(|habit| HabitView {
            id: habit.id.clone(),
            name: habit.name.clone(),
            created_at: habit.created_at,
            streak: compute_streak(&habit.dates, today),
            days: days
                .iter()
                .map(|day| DayCell {
                    date: day.date.clone(),
                    weekday: day.weekday.clone(),
                    completed: habit.is_completed(&day.date),
                })
                .collect(),
        })
        .collect();

    TrackerView {
        today: date_key(today),
        days,
        habits,
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
