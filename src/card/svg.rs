use lazy_static::lazy_static;
use regex::Regex;

use super::Card;

lazy_static! {
    static ref GRADIENT_ANGLE: Regex = Regex::new(r"(\d+)deg").unwrap();
    static ref COLOR_STOP: Regex =
        Regex::new(r"(#[a-fA-F0-9]{3,8}|rgba?\([^)]+\))(\s+\d+%)?").unwrap();
}

const CARD_WIDTH: u32 = 560;

const TITLE_SIZE: u32 = 28;
const TEXT_SIZE: u32 = 18;
const LINK_SIZE: u32 = 16;

const TEXT_SPACING: u32 = 26;
const SECTION_SPACING: u32 = 16;
const TEXT_LEFT_MARGIN: u32 = 160;

const TITLE_Y: u32 = 54;
const CONTENT_START_Y: u32 = TITLE_Y + 40;

// in width units, see char_width
const MAX_NAME_WIDTH: f64 = 14.0;
const TEXT_MAX_WIDTH: f64 = 30.0;

const MIN_HEIGHT: u32 = 140;
const BOTTOM_PADDING: u32 = 30;

const AVATAR_SIZE: u32 = 96;
const AVATAR_X: u32 = 36;

const DEFAULT_ANGLE: u32 = 135;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub color: String,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub angle: u32,
    pub stops: Vec<ColorStop>,
}

// Parse a css `linear-gradient(...)` into angle + stops
pub fn parse_gradient(css: &str) -> Gradient {
    let angle = GRADIENT_ANGLE
        .captures(css)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(DEFAULT_ANGLE);

    let stops = COLOR_STOP
        .captures_iter(css)
        .map(|c| ColorStop {
            color: c[1].to_string(),
            offset: c.get(2).map(|m| m.as_str().trim().to_string()),
        })
        .collect();

    Gradient { angle, stops }
}

/// Maps a css gradient angle onto `x1 y1 x2 y2` percentages of the bounding box.
pub fn gradient_points(angle: u32) -> [f64; 4] {
    let radian = (angle as f64 - 90.0).to_radians();
    let (dx, dy) = (radian.cos() * 50.0, radian.sin() * 50.0);
    [50.0 + dx, 50.0 + dy, 50.0 - dx, 50.0 - dy]
}

// Digits and lowercase latin are half width, everything else full width
pub fn char_width(c: char) -> f64 {
    if c.is_ascii_digit() || c.is_ascii_lowercase() {
        0.5
    } else {
        1.0
    }
}

pub fn string_width(s: &str) -> f64 {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` whose width fits in `max`.
pub fn truncate_to_width(s: &str, max: f64) -> &str {
    if string_width(s) <= max {
        return s;
    }

    let mut width = 0.0;
    for (idx, c) in s.char_indices() {
        width += char_width(c);
        if width > max {
            return &s[..idx];
        }
    }
    s
}

/// Breaks `text` into lines no wider than `max_width`, splitting between
/// characters. A single character wider than the limit still gets its own line.
pub fn wrap_text(text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0.0;

    for c in text.chars() {
        let w = char_width(c);
        if width + w > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
        }
        line.push(c);
        width += w;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn gradient_defs(bgcolor: &str) -> String {
    let gradient = parse_gradient(bgcolor);
    let [x1, y1, x2, y2] = gradient_points(gradient.angle);

    let stops: String = gradient
        .stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let offset = stop
                .offset
                .as_deref()
                .unwrap_or(if i == 0 { "0%" } else { "100%" });
            format!(
                r#"
            <stop offset="{}" style="stop-color:{};stop-opacity:1"/>"#,
                escape(offset),
                escape(&stop.color)
            )
        })
        .collect();

    format!(
        r#"
        <linearGradient id="cardGradient" x1="{x1}%" y1="{y1}%" x2="{x2}%" y2="{y2}%">{stops}
        </linearGradient>"#
    )
}

// Standalone svg card; `avatar` is already a data uri
pub fn render(card: &Card, avatar: &str) -> String {
    let style = &card.style;
    let is_gradient = style.bgcolor.contains("linear-gradient");

    let gradient = if is_gradient {
        gradient_defs(&style.bgcolor)
    } else {
        String::new()
    };
    let fill = if is_gradient {
        "url(#cardGradient)".to_string()
    } else {
        escape(&style.bgcolor)
    };

    let name = escape(truncate_to_width(&card.name, MAX_NAME_WIDTH));
    let textcolor = escape(&style.textcolor);
    let linkcolor = escape(&style.linkcolor);

    let lines = wrap_text(&card.specialty, TEXT_MAX_WIDTH);
    let last = lines.len().saturating_sub(1);
    let specialty: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { "✨" } else { "" };
            let suffix = if i == last { "✨" } else { "" };
            let y = CONTENT_START_Y + i as u32 * TEXT_SPACING;
            format!(
                r#"
        <text x="{TEXT_LEFT_MARGIN}" y="{y}" class="card-text" font-size="{TEXT_SIZE}" fill="{textcolor}">{prefix}{}{suffix}</text>"#,
                escape(line)
            )
        })
        .collect();

    let link_y = CONTENT_START_Y + lines.len() as u32 * TEXT_SPACING + SECTION_SPACING;
    let height = MIN_HEIGHT.max(link_y + BOTTOM_PADDING);

    // centre the avatar on the card, or on the text block if that sits lower
    let radius = AVATAR_SIZE as f64 / 2.0;
    let content_height = link_y as f64 - TITLE_Y as f64;
    let avatar_y = ((height as f64 - AVATAR_SIZE as f64) / 2.0)
        .max(TITLE_Y as f64 + (content_height - AVATAR_SIZE as f64) / 2.0);
    let cx = AVATAR_X as f64 + radius;
    let cy = avatar_y + radius;

    let font = &style.font;
    let font_stack =
        format!(r#""{font}", -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif"#);
    let font_url = format!(
        "https://fonts.googleapis.com/css2?family={}",
        url::form_urlencoded::byte_serialize(font.as_bytes()).collect::<String>()
    );

    let redirect_link = escape(&card.redirect_link);
    let display_link = escape(&card.display_link);
    let avatar = escape(avatar);

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
      <svg width="100%" height="100%" viewBox="0 0 {CARD_WIDTH} {height}"
           xmlns="http://www.w3.org/2000/svg"
           xmlns:xlink="http://www.w3.org/1999/xlink">
        <defs>
          <filter id="card-shadow" x="-20%" y="-20%" width="140%" height="140%">
            <feGaussianBlur in="SourceAlpha" stdDeviation="4"/>
            <feOffset dx="0" dy="4" result="offsetblur"/>
            <feComponentTransfer>
              <feFuncA type="linear" slope="0.15"/>
            </feComponentTransfer>
            <feMerge>
              <feMergeNode/>
              <feMergeNode in="SourceGraphic"/>
            </feMerge>
          </filter>
          <filter id="avatar-shadow" x="-20%" y="-20%" width="140%" height="140%">
            <feGaussianBlur in="SourceAlpha" stdDeviation="2"/>
            <feOffset dx="0" dy="2" result="offsetblur"/>
            <feComponentTransfer>
              <feFuncA type="linear" slope="0.15"/>
            </feComponentTransfer>
            <feMerge>
              <feMergeNode/>
              <feMergeNode in="SourceGraphic"/>
            </feMerge>
          </filter>{gradient}
        </defs>
        <defs>
          <style type="text/css">
            @import url('{font_url}');

            .card-text {{
              font-family: {font_stack};
              font-weight: 400;
            }}
            .card-title {{
              font-family: {font_stack};
              font-weight: 700;
            }}
            .card-link {{
              font-family: {font_stack};
              font-weight: 400;
            }}
          </style>
        </defs>

        <rect x="0" y="0" width="{CARD_WIDTH}" height="{height}" rx="20"
              fill="{fill}"
              stroke="#e2e8f0" stroke-width="1"
              filter="url(#card-shadow)"/>

        <g filter="url(#avatar-shadow)" transform="translate(-10, -10)">
          <circle cx="{cx}" cy="{cy}" r="{radius}" fill="white"/>
          <image x="{AVATAR_X}" y="{avatar_y}"
                 width="{AVATAR_SIZE}" height="{AVATAR_SIZE}"
                 href="{avatar}"
                 clip-path="circle({radius}px at {radius}px {radius}px)"/>
        </g>

        <text x="{TEXT_LEFT_MARGIN}" y="{TITLE_Y}" class="card-title" font-size="{TITLE_SIZE}" fill="{textcolor}">{name}</text>{specialty}
        <a xlink:href="{redirect_link}" target="_blank">
          <text x="{TEXT_LEFT_MARGIN}" y="{link_y}" class="card-link" font-size="{LINK_SIZE}" fill="{linkcolor}">{display_link}</text>
        </a>
      </svg>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardQuery;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_default_gradient() {
        let g = parse_gradient("linear-gradient(135deg, #e0e7ff, #f0f4f8)");

        assert_eq!(g.angle, 135);
        assert_eq!(
            g.stops,
            vec![
                ColorStop { color: "#e0e7ff".into(), offset: None },
                ColorStop { color: "#f0f4f8".into(), offset: None },
            ]
        );
    }

    #[test]
    fn parses_rgba_stops_with_offsets() {
        let g = parse_gradient("linear-gradient(rgba(0, 0, 0, 0.5) 10%, #fff 90%)");

        assert_eq!(g.angle, DEFAULT_ANGLE);
        assert_eq!(g.stops[0].color, "rgba(0, 0, 0, 0.5)");
        assert_eq!(g.stops[0].offset.as_deref(), Some("10%"));
        assert_eq!(g.stops[1].color, "#fff");
        assert_eq!(g.stops[1].offset.as_deref(), Some("90%"));
    }

    #[test]
    fn gradient_points_for_common_angles() {
        let [x1, y1, x2, y2] = gradient_points(90);
        assert!(close(x1, 100.0) && close(y1, 50.0) && close(x2, 0.0) && close(y2, 50.0));

        let [x1, y1, x2, y2] = gradient_points(180);
        assert!(close(x1, 50.0) && close(y1, 100.0) && close(x2, 50.0) && close(y2, 0.0));
    }

    #[test]
    fn widths() {
        assert_eq!(string_width("ab12"), 2.0);
        assert_eq!(string_width("AB"), 2.0);
        assert_eq!(string_width("友链"), 2.0);
    }

    #[test]
    fn truncates_name_by_width() {
        // 28 lowercase letters are exactly 14 units
        let fits = "a".repeat(28);
        assert_eq!(truncate_to_width(&fits, MAX_NAME_WIDTH), fits);

        let long = "友".repeat(20);
        assert_eq!(truncate_to_width(&long, MAX_NAME_WIDTH), "友".repeat(14));
    }

    #[test]
    fn wraps_by_width() {
        let lines = wrap_text(&"x".repeat(70), TEXT_MAX_WIDTH);
        assert_eq!(lines, vec!["x".repeat(60), "x".repeat(10)]);

        let lines = wrap_text(&"友".repeat(31), TEXT_MAX_WIDTH);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "友");

        assert!(wrap_text("", TEXT_MAX_WIDTH).is_empty());
    }

    #[test]
    fn renders_gradient_and_layout() {
        let card = Card::from_query(&CardQuery {
            name: Some("Ferris & co".into()),
            specialty: Some("x".repeat(70)),
            ..Default::default()
        })
        .unwrap();

        let svg = render(&card, "data:image/png;base64,AAAA");

        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"fill="url(#cardGradient)""#));
        assert!(svg.contains(r#"<linearGradient id="cardGradient""#));
        assert!(svg.contains(">Ferris &amp; co</text>"));
        assert!(svg.contains(r#"href="data:image/png;base64,AAAA""#));
        // two specialty lines: link at 94 + 2*26 + 16 = 162, height 192
        assert!(svg.contains(r#"y="162" class="card-link""#));
        assert!(svg.contains(r#"viewBox="0 0 560 192""#));
    }

    #[test]
    fn solid_background_is_used_directly() {
        let card = Card::from_query(&CardQuery {
            bgcolor: Some("#123456".into()),
            ..Default::default()
        })
        .unwrap();

        let svg = render(&card, "data:,");

        assert!(svg.contains(r##"fill="#123456""##));
        assert!(!svg.contains("linearGradient"));
        // one line: link at 94 + 26 + 16 = 136, height 166
        assert!(svg.contains(r#"viewBox="0 0 560 166""#));
    }
}
