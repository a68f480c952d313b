//! The single HTML page served at `/`.
//!
//! Markup and script are shared; a `Theme` only supplies the heading text and the CSS
//! palette, so the look can be swapped through `UI_THEME` without touching the page.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::AnalysisMode;

const PAGE_TEMPLATE: &str = include_str!("page.html");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Soft gradients and rounded cards.
    #[default]
    Aurora,
    /// Plain layout with emoji headings.
    Classic,
    /// Indigo panels with teal accents.
    Teal,
}

#[derive(Debug, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aurora" => Ok(Theme::Aurora),
            "classic" => Ok(Theme::Classic),
            "teal" => Ok(Theme::Teal),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Aurora => "aurora",
            Theme::Classic => "classic",
            Theme::Teal => "teal",
        })
    }
}

struct Palette {
    title: &'static str,
    tagline: &'static str,
    resources_heading: &'static str,
    feedback_heading: &'static str,
    css: &'static str,
}

impl Theme {
    fn palette(&self) -> Palette {
        match self {
            Theme::Aurora => Palette {
                title: "ResumeATS Pro",
                tagline: "Craft Your Future, One Resume at a Time",
                resources_heading: "Resources",
                feedback_heading: "Feedback",
                css: ":root { --page-bg: linear-gradient(135deg, #f3f4f6, #e5e7eb); \
                      --card-bg: linear-gradient(135deg, #f9fafb, #e5e7eb); \
                      --sidebar-bg: linear-gradient(180deg, #e5e7eb, #f3f4f6); \
                      --accent: linear-gradient(90deg, #60a5fa, #a855f7); \
                      --accent-text: #1f2937; --border: #d1d5db; --radius: 1.5rem; \
                      --text: #374151; }",
            },
            Theme::Classic => Palette {
                title: "📄 ResumeATS Pro",
                tagline: "Optimize Your Resume for ATS and Land Your Dream Job",
                resources_heading: "📚 Resources",
                feedback_heading: "💡 Feedback",
                css: ":root { --page-bg: #ffffff; --card-bg: #ffffff; --sidebar-bg: #f9fafb; \
                      --accent: #ef4444; --accent-text: #ffffff; --border: #e5e7eb; \
                      --radius: 0.5rem; --text: #111827; }",
            },
            Theme::Teal => Palette {
                title: "ResumeATS Pro",
                tagline: "Optimize Your Resume for ATS and Land Your Dream Job",
                resources_heading: "Resources",
                feedback_heading: "Feedback",
                css: ":root { --page-bg: #ffffff; --card-bg: #eef2ff; --sidebar-bg: #e0e7ff; \
                      --accent: #0d9488; --accent-text: #ffffff; --border: #0d9488; \
                      --radius: 0.5rem; --text: #1f2937; }",
            },
        }
    }
}

/// Renders the page for a theme. The mode radios are generated from `AnalysisMode::ALL`.
pub fn render_page(theme: Theme) -> String {
    let palette = theme.palette();
    let modes: String = AnalysisMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            format!(
                r#"<label class="mode" title="{description}"><input type="radio" name="mode" value="{value}"{checked}> {label}</label>"#,
                description = mode.description(),
                value = mode.as_str(),
                checked = if i == 0 { " checked" } else { "" },
                label = mode.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PAGE_TEMPLATE
        .replace("{theme_name}", &theme.to_string())
        .replace("{theme_css}", palette.css)
        .replace("{title}", palette.title)
        .replace("{tagline}", palette.tagline)
        .replace("{resources_heading}", palette.resources_heading)
        .replace("{feedback_heading}", palette.feedback_heading)
        .replace("{mode_options}", &modes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parses_case_insensitively() {
        assert_eq!("Teal".parse::<Theme>().unwrap(), Theme::Teal);
        assert_eq!(" classic ".parse::<Theme>().unwrap(), Theme::Classic);
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn test_page_lists_every_mode_with_first_checked() {
        let page = render_page(Theme::Aurora);
        for mode in AnalysisMode::ALL {
            assert!(page.contains(&format!(r#"value="{}""#, mode.as_str())));
            assert!(page.contains(mode.label()));
        }
        assert!(page.contains(r#"value="quick_scan" checked"#));
    }

    #[test]
    fn test_themes_share_markup_but_differ_in_style() {
        let aurora = render_page(Theme::Aurora);
        let classic = render_page(Theme::Classic);
        assert_ne!(aurora, classic);
        assert!(classic.contains("📄 ResumeATS Pro"));
        assert!(aurora.contains("Craft Your Future"));
        for page in [&aurora, &classic, &render_page(Theme::Teal)] {
            assert!(page.contains(r#"id="analyze-form""#));
            assert!(page.contains(r#"id="follow-up""#));
            assert!(!page.contains("{mode_options}"));
            assert!(!page.contains("{theme_css}"));
        }
    }

    #[test]
    fn test_follow_up_section_starts_hidden() {
        let page = render_page(Theme::Teal);
        assert!(page.contains(r#"<section id="follow-up" hidden>"#));
    }
}
