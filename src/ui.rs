use crate::models::{HabitView, TrackerView};

const EMPTY_MESSAGE: &str = "No habits added yet. Start by adding a new habit above!";

pub fn render_index(view: &TrackerView) -> String {
    let habits = if view.habits.is_empty() {
        format!(r#"<p class="empty">{EMPTY_MESSAGE}</p>"#)
    } else {
        view.habits.iter().map(render_habit).collect::<Vec<_>>().join("\n")
    };

    INDEX_HTML
        .replace("{{TODAY}}", &view.today)
        .replace("{{HABITS}}", &habits)
}

fn render_habit(habit: &HabitView) -> String {
    let id = escape_html(&habit.id);
    let cells: String = habit
        .days
        .iter()
        .map(|cell| {
            let (class, mark, label) = if cell.completed {
                ("day done", "&#10003;", "completed")
            } else {
                ("day", "&#10005;", "not completed")
            };
            format!(
                r#"<form class="cell" method="post" action="/habits/{id}/toggle">
          <span class="weekday">{weekday}</span>
          <input type="hidden" name="date" value="{date}" />
          <button class="{class}" type="submit" title="{date}" aria-label="{date} {label}">{mark}</button>
        </form>"#,
                weekday = cell.weekday,
                date = cell.date,
            )
        })
        .collect();

    format!(
        r#"<article class="habit">
      <div class="habit-head">
        <div class="habit-title">
          <h3>{name}</h3>
          <span class="streak">&#127942; {streak} day streak</span>
        </div>
        <form method="post" action="/habits/{id}/delete">
          <button class="delete" type="submit" aria-label="Delete habit">Delete</button>
        </form>
      </div>
      <div class="grid">
        {cells}
      </div>
    </article>"#,
        name = escape_html(&habit.name),
        streak = habit.streak,
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f5f3ff;
      --bg-2: #eff6ff;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #9333ea;
      --accent-dark: #7e22ce;
      --done: #22c55e;
      --todo: #e5e7eb;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(76, 29, 149, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 24px;
    }

    .app {
      max-width: 896px;
      margin: 0 auto;
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    h1 {
      margin: 0 0 24px;
      font-size: 1.9rem;
    }

    .add-form {
      display: flex;
      gap: 8px;
      margin-bottom: 32px;
    }

    .add-form input {
      flex: 1;
      padding: 10px 16px;
      border: 1px solid #d1d5db;
      border-radius: 10px;
      font-size: 1rem;
    }

    .add-form input:focus {
      outline: none;
      border-color: var(--accent);
      box-shadow: 0 0 0 2px rgba(147, 51, 234, 0.25);
    }

    button {
      appearance: none;
      border: none;
      cursor: pointer;
      font: inherit;
    }

    .add-form button {
      background: var(--accent);
      color: white;
      padding: 10px 24px;
      border-radius: 10px;
      font-weight: 600;
    }

    .add-form button:hover {
      background: var(--accent-dark);
    }

    .habits {
      display: grid;
      gap: 16px;
    }

    .habit {
      background: #f9fafb;
      border-radius: 12px;
      padding: 16px;
    }

    .habit-head {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 16px;
    }

    .habit-title {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .habit-title h3 {
      margin: 0;
      font-size: 1.1rem;
    }

    .streak {
      color: #ca8a04;
      font-size: 0.9rem;
      font-weight: 500;
    }

    .delete {
      background: transparent;
      color: #ef4444;
      font-size: 0.9rem;
    }

    .delete:hover {
      color: #b91c1c;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .cell {
      display: grid;
      justify-items: center;
      gap: 4px;
      margin: 0;
    }

    .weekday {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .day {
      width: 40px;
      height: 40px;
      border-radius: 999px;
      background: var(--todo);
      color: #9ca3af;
    }

    .day.done {
      background: var(--done);
      color: white;
    }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 32px 0;
    }
  </style>
</head>
<body>
  <main class="app" data-today="{{TODAY}}">
    <h1>&#128197; Habit Tracker</h1>
    <form class="add-form" method="post" action="/habits">
      <input type="text" name="name" placeholder="Enter a new habit..." autocomplete="off" />
      <button type="submit">+ Add Habit</button>
    </form>
    <section class="habits">
    {{HABITS}}
    </section>
  </main>
</body>
</html>
"#;
