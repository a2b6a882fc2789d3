use crate::dashboard::PageView;
use crate::display::{CHART_REGION, COUNTER_REGION, SECONDARY_REGION};

pub fn render_index(view: &PageView) -> String {
    let count = view.count.map(|count| count.to_string()).unwrap_or_default();
    let secondary = view.secondary.as_deref().unwrap_or_default();

    INDEX_HTML
        .replace("{{COUNTER_ID}}", COUNTER_REGION)
        .replace("{{SECONDARY_ID}}", SECONDARY_REGION)
        .replace("{{CHART_ID}}", CHART_REGION)
        .replace("{{COUNT}}", &count)
        .replace("{{OPACITY}}", if view.visible { "1" } else { "0" })
        .replace("{{SCALE}}", &view.scale.to_string())
        .replace("{{SECONDARY_DISPLAY}}", if view.secondary.is_some() { "block" } else { "none" })
        .replace("{{SECONDARY}}", &escape_html(secondary))
        .replace("{{CHART}}", &view.chart)
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Absolutely Right</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Kalam:wght@400;700&family=Space+Grotesk:wght@400;500&display=swap');

    :root {
      --bg: #fdfbf7;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #e63946;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 20px 48px;
    }

    main {
      width: min(840px, 100%);
      display: grid;
      gap: 20px;
      justify-items: center;
      text-align: center;
    }

    .count {
      font-family: Kalam, "Comic Sans MS", cursive;
      font-size: clamp(72px, 18vw, 160px);
      font-weight: 700;
      color: var(--accent);
      line-height: 1;
      transition: opacity 0.5s ease-in, transform 0.3s ease;
    }

    .count.pulsating {
      animation: pulse 2.4s ease-in-out infinite;
    }

    .subtitle {
      font-family: Kalam, "Comic Sans MS", cursive;
      font-size: 22px;
      color: var(--muted);
      margin: 0;
    }

    .chart {
      width: 100%;
      display: flex;
      justify-content: center;
    }

    @keyframes pulse {
      0%, 100% { transform: scale(1); }
      50% { transform: scale(1.04); }
    }

    @media (max-width: 600px) {
      .subtitle {
        font-size: 18px;
      }
    }
  </style>
</head>
<body>
  <main>
    <div id="{{COUNTER_ID}}" class="count" style="opacity: {{OPACITY}}; transform: scale({{SCALE}})">{{COUNT}}</div>
    <p class="subtitle">times absolutely right today</p>
    <p id="{{SECONDARY_ID}}" class="subtitle" style="display: {{SECONDARY_DISPLAY}}">{{SECONDARY}}</p>
    <div id="{{CHART_ID}}" class="chart">{{CHART}}</div>
  </main>

  <script>
    const countEl = document.getElementById('{{COUNTER_ID}}');
    const secondaryEl = document.getElementById('{{SECONDARY_ID}}');
    const chartEl = document.getElementById('{{CHART_ID}}');
    let lastChart = null;

    const apply = (view) => {
      countEl.textContent = view.count === null ? '' : view.count;
      countEl.style.opacity = view.visible ? '1' : '0';
      countEl.style.transform = view.scale === 1 ? '' : `scale(${view.scale})`;
      countEl.classList.toggle('pulsating', view.counter.phase === 'settled');

      secondaryEl.textContent = view.secondary || '';
      secondaryEl.style.display = view.secondary ? 'block' : 'none';

      if (view.chart !== lastChart) {
        chartEl.innerHTML = view.chart;
        lastChart = view.chart;
      }
    };

    const sync = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      apply(await res.json());
    };

    const reportViewport = () =>
      fetch('/api/viewport', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ width: window.innerWidth })
      }).catch((err) => console.error(err));

    window.addEventListener('resize', reportViewport);
    reportViewport();
    setInterval(() => sync().catch((err) => console.error(err)), 250);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CounterPhase;
    use crate::models::HistorySeries;

    fn view(counter: CounterPhase, secondary: Option<&str>) -> PageView {
        PageView {
            counter,
            count: counter.shown_value(),
            visible: counter.is_visible(),
            scale: counter.scale(),
            secondary: secondary.map(str::to_string),
            chart: "<svg></svg>".to_string(),
            viewport_width: 1024,
            redraws: 1,
            history: HistorySeries::default(),
        }
    }

    #[test]
    fn index_fills_regions() {
        let html = render_index(&view(CounterPhase::Settled(5), Some("+ 2 times just \"right\"")));
        assert!(html.contains(r#"<div id="today" class="count" style="opacity: 1; transform: scale(1)">5</div>"#));
        assert!(html.contains("+ 2 times just &quot;right&quot;"));
        assert!(html.contains(r#"style="display: block""#));
        assert!(html.contains(r#"<div id="chart" class="chart"><svg></svg></div>"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn index_hides_unrevealed_counter_and_empty_secondary() {
        let html = render_index(&view(CounterPhase::Hidden, None));
        assert!(html.contains(r#"style="opacity: 0; transform: scale(1)"></div>"#));
        assert!(html.contains(r#"<p id="right-count" class="subtitle" style="display: none"></p>"#));
    }
}
