use crate::models::{Activity, DashboardView, HabitCard};

pub fn render_index(view: &DashboardView) -> String {
    let cards = view.cards.iter().map(render_card).collect::<Vec<_>>().join("\n");
    let activities = Activity::ALL
        .into_iter()
        .map(|activity| render_checkbox(activity, view.activities.get(activity)))
        .collect::<Vec<_>>()
        .join("\n");

    INDEX_HTML
        .replace("{{DATE}}", &view.date)
        .replace("{{POLICY}}", view.policy.as_str())
        .replace("{{CHART}}", view.chart_svg.as_deref().unwrap_or_default())
        .replace("{{CARDS}}", &cards)
        .replace("{{ACTIVITIES}}", &activities)
        .replace("{{REVISION}}", &view.chart_revision.to_string())
}

fn render_card(card: &HabitCard) -> String {
    let habit = card.habit.as_str();
    format!(
        r#"      <div class="stat habit" id="card-{habit}" style="--progress: {progress:.1}%">
        <span class="label">{label}</span>
        <span class="value"><span id="value-{habit}">{value}</span> {unit}</span>
        <span class="bar"><span class="fill"></span></span>
      </div>"#,
        progress = card.progress,
        label = card.label,
        value = card.value,
        unit = card.unit,
    )
}

fn render_checkbox(activity: Activity, checked: bool) -> String {
    let name = activity.as_str();
    let mut title = name.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!(
        r#"        <label><input type="checkbox" data-activity="{name}"{checked} /> {title}</label>"#,
        checked = if checked { " checked" } else { "" },
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef7f1;
      --bg-2: #a8e6cf;
      --ink: #2b2a28;
      --accent: #333;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f4ea 60%, #f4f9f6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    #chart svg {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-area {
      opacity: 0.7;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .bar {
      display: block;
      height: 8px;
      border-radius: 999px;
      background: #ccc;
      overflow: hidden;
    }

    .bar .fill {
      display: block;
      height: 100%;
      width: var(--progress);
      transition: width 300ms ease;
    }

    #card-water .fill { background: #00bfff; }
    #card-steps .fill { background: #80cbc4; }
    #card-yoga .fill { background: #f8b195; }
    #card-swim .fill { background: #ffe082; }

    .activities {
      display: flex;
      flex-wrap: wrap;
      gap: 18px;
      align-items: center;
    }

    .activities label {
      display: inline-flex;
      gap: 8px;
      align-items: center;
      cursor: pointer;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    button:active {
      transform: scale(0.98);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Tracker</h1>
      <p class="subtitle"><span id="date">{{DATE}}</span> &middot; <span id="policy">{{POLICY}}</span> increments</p>
    </header>

    <section class="chart-card">
      <h2>Calorie Tracker</h2>
      <div id="chart" data-revision="{{REVISION}}">{{CHART}}</div>
    </section>

    <section class="panel">
{{CARDS}}
    </section>

    <section class="stat">
      <span class="label">Select Additional Activities</span>
      <div class="activities">
{{ACTIVITIES}}
      </div>
    </section>

    <button id="reset-btn" type="button">Reset Habits</button>

    <div class="status" id="status"></div>
    <p class="hint">Counters grow each time this page loads. Reset clears everything saved.</p>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const resetBtn = document.getElementById('reset-btn');
    const checkboxes = Array.from(document.querySelectorAll('input[data-activity]'));
    let renderedSvg = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const updateUI = (view) => {
      document.getElementById('date').textContent = view.date;
      view.cards.forEach((card) => {
        const cardEl = document.getElementById(`card-${card.habit}`);
        cardEl.style.setProperty('--progress', `${card.progress.toFixed(1)}%`);
        document.getElementById(`value-${card.habit}`).textContent = card.value;
      });
      checkboxes.forEach((box) => {
        box.checked = Boolean(view.activities[box.dataset.activity]);
      });
      const stale = String(view.chart_revision) !== chartEl.dataset.revision;
      if (view.chart_svg && (stale || view.chart_svg !== renderedSvg)) {
        renderedSvg = view.chart_svg;
        chartEl.innerHTML = view.chart_svg;
        chartEl.dataset.revision = String(view.chart_revision);
      }
    };

    const send = async (path, body) => {
      setStatus('Saving...', 'info');
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body ? JSON.stringify(body) : undefined
      });

      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }

      updateUI(await res.json());
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    checkboxes.forEach((box) => {
      box.addEventListener('change', () => {
        send('/api/activities', { activity: box.dataset.activity, value: box.checked })
          .catch((err) => setStatus(err.message, 'error'));
      });
    });

    resetBtn.addEventListener('click', () => {
      send('/api/reset').catch((err) => setStatus(err.message, 'error'));
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityFlags, CalorieSeries, Counters, Habit};
    use crate::policy::IncrementPolicy;

    fn view() -> DashboardView {
        let counters = Counters {
            water: 1500,
            steps: 4000,
            yoga: 12,
            swim: 6,
        };
        DashboardView {
            date: "2026-10-19".to_string(),
            policy: IncrementPolicy::Random,
            counters,
            cards: Habit::ALL
                .into_iter()
                .map(|habit| HabitCard {
                    habit,
                    label: habit.label(),
                    unit: habit.unit(),
                    value: counters.get(habit),
                    max: habit.max(),
                    progress: counters.progress(habit),
                })
                .collect(),
            activities: ActivityFlags {
                movie: true,
                ..ActivityFlags::default()
            },
            calories: CalorieSeries {
                morning: 225.0,
                afternoon: 420.0,
                evening: 413.0,
            },
            chart: None,
            chart_svg: Some("<svg></svg>".to_string()),
            chart_revision: 4,
        }
    }

    #[test]
    fn index_fills_every_placeholder() {
        let html = render_index(&view());
        assert!(!html.contains("{{"));
        assert!(html.contains(r#"<div id="chart" data-revision="4"><svg></svg></div>"#));
        assert!(html.contains(r#"<span id="value-steps">4000</span> Steps"#));
        assert!(html.contains("--progress: 50.0%"));
    }

    #[test]
    fn checkboxes_reflect_flags() {
        let html = render_index(&view());
        assert!(html.contains(r#"data-activity="movie" checked /> Movie"#));
        assert!(html.contains(r#"data-activity="cleaning" /> Cleaning"#));
    }
}
