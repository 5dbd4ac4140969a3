//! Standalone HTML page around the rendered SVGs.

use crate::config::TooltipConfig;
use crate::selector::Header;
use crate::svg::escape_xml;

const STYLE: &str = r"
body { font-family: system-ui, -apple-system, sans-serif; margin: 0; background: #f8fafc; }
main { display: flex; flex-direction: column; align-items: center; padding: 16px; }
#title { margin: 8px 0 0; }
#description { margin: 4px 0 12px; color: #4b5563; }
#treemap-diagram text, #legend text { font-size: 10px; pointer-events: none; }
#legend text { font-size: 12px; }
.tooltip { position: absolute; pointer-events: none; padding: 8px; font-size: 12px;
  background: rgba(255, 255, 204, 0.95); border: 1px solid #d1d5db; border-radius: 4px; }
";

// Mirrors the tooltip controller: fade in on enter, fade out on leave, keep
// the last content and data-value.
const SCRIPT: &str = r##"
(() => {
  const tooltip = document.getElementById("tooltip");
  const line = (label, text) => {
    const row = document.createElement("div");
    const bold = document.createElement("b");
    bold.textContent = label + ": ";
    row.append(bold, text);
    return row;
  };
  document.querySelectorAll("#treemap-diagram g.g").forEach((group) => {
    const rect = group.querySelector("rect.tile");
    if (!rect) return;
    group.addEventListener("mouseover", (event) => {
      tooltip.style.transition = "opacity __FADE_IN__ms ease-in-out";
      tooltip.style.opacity = 1;
      tooltip.replaceChildren(
        line("Name", rect.dataset.name),
        line("Category", rect.dataset.category),
        line("Value", rect.dataset.value)
      );
      tooltip.setAttribute("data-value", rect.dataset.value);
      tooltip.style.left = event.pageX + __OFFSET_X__ + "px";
      tooltip.style.top = event.pageY + __OFFSET_Y__ + "px";
    });
    group.addEventListener("mouseout", () => {
      tooltip.style.transition = "opacity __FADE_OUT__ms ease-in-out";
      tooltip.style.opacity = 0;
    });
  });
})();
"##;

/// Inline script wiring hover events to `#tooltip`.
#[must_use]
pub fn tooltip_script(config: &TooltipConfig) -> String {
    SCRIPT
        .replace("__FADE_IN__", &config.fade_in_ms.to_string())
        .replace("__FADE_OUT__", &config.fade_out_ms.to_string())
        .replace("__OFFSET_X__", &config.offset.x.to_string())
        .replace("__OFFSET_Y__", &config.offset.y.to_string())
}

/// Full page: heading, chart, legend, hidden tooltip and its script.
#[must_use]
pub fn render_page(
    header: &Header,
    treemap_svg: &str,
    legend_svg: &str,
    tooltip: &TooltipConfig,
) -> String {
    let title = escape_xml(&header.title);
    let description = escape_xml(&header.description);
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<h1 id=\"title\">{title}</h1>
<p id=\"description\">{description}</p>
{treemap_svg}{legend_svg}<div class=\"tooltip\" id=\"tooltip\" style=\"opacity: 0\"></div>
</main>
<script>{script}</script>
</body>
</html>
",
        script = tooltip_script(tooltip),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Header {
        Header {
            title: "Movie Sales".to_string(),
            description: "Top 100 <Highest> Grossing".to_string(),
        }
    }

    #[test]
    fn test_page_fields() {
        let page = render_page(
            &header(),
            "<svg id=\"treemap-diagram\"></svg>\n",
            "<svg id=\"legend\"></svg>\n",
            &TooltipConfig::default(),
        );
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h1 id=\"title\">Movie Sales</h1>"));
        assert!(page.contains("<p id=\"description\">Top 100 &lt;Highest&gt; Grossing</p>"));
        assert!(page.contains("<svg id=\"treemap-diagram\"></svg>\n<svg id=\"legend\"></svg>"));
        assert!(page.contains("id=\"tooltip\" style=\"opacity: 0\""));
    }

    #[test]
    fn test_script_uses_configured_timings() {
        let script = tooltip_script(&TooltipConfig::default());
        assert!(script.contains("opacity 250ms"));
        assert!(script.contains("opacity 500ms"));
        assert!(script.contains("event.pageY + -30 + \"px\""));
        assert!(!script.contains("__"));
    }

    #[test]
    fn test_page_embeds_whole_script() {
        let page = render_page(&header(), "", "", &TooltipConfig::default());
        assert!(page.contains(r##"document.querySelectorAll("#treemap-diagram g.g")"##));
        assert!(page.contains(r#"group.querySelector("rect.tile")"#));
        assert!(page.contains("})();\n</script>"));
    }
}
