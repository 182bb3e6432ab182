//! Color theme: named palettes and the CSS variables derived from them.

use std::fmt::Write;

use crate::config::{ConfigError, SiteConfig};

/// Shade steps shared by every palette.
pub const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// A named color scale.
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    /// Hex colors, one per entry of [`SHADES`]
    pub colors: [&'static str; 11],
}

const PALETTES: &[Palette] = &[
    Palette {
        name: "teal",
        colors: [
            "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488",
            "#0f766e", "#115e59", "#134e4a", "#042f2e",
        ],
    },
    Palette {
        name: "emerald",
        colors: [
            "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669",
            "#047857", "#065f46", "#064e3b", "#022c22",
        ],
    },
    Palette {
        name: "zinc",
        colors: [
            "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b",
            "#3f3f46", "#27272a", "#18181b", "#09090b",
        ],
    },
    Palette {
        name: "slate",
        colors: [
            "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569",
            "#334155", "#1e293b", "#0f172a", "#020617",
        ],
    },
];

impl Palette {
    /// Look up a palette by name (case-insensitive).
    pub fn named(name: &str) -> Option<&'static Palette> {
        PALETTES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Color for a shade step, if the step exists.
    pub fn shade(&self, step: u16) -> Option<&'static str> {
        SHADES
            .iter()
            .position(|s| *s == step)
            .map(|i| self.colors[i])
    }

    fn shades(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        SHADES.iter().copied().zip(self.colors.iter().copied())
    }
}

/// Resolved theme for a site.
#[derive(Debug)]
pub struct Theme {
    pub primary: &'static Palette,
    pub surface: &'static Palette,
    pub dark_mode_selector: String,
}

impl Theme {
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            primary: config.primary_palette()?,
            surface: config.surface_palette()?,
            dark_mode_selector: config.theme.dark_mode_selector.clone(),
        })
    }

    /// Render the palette scales and semantic tokens as CSS custom properties.
    ///
    /// Light tokens live on `:root`; the dark mode selector overrides them.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");

        for (step, color) in self.primary.shades() {
            let _ = writeln!(css, "  --primary-{}: {};", step, color);
        }
        css.push_str("  --surface-0: #ffffff;\n");
        for (step, color) in self.surface.shades() {
            let _ = writeln!(css, "  --surface-{}: {};", step, color);
        }

        css.push_str(LIGHT_TOKENS);
        css.push_str("}\n\n");

        let _ = writeln!(css, "{} {{", self.dark_mode_selector);
        css.push_str(DARK_TOKENS);
        css.push_str("}\n");

        css
    }
}

const LIGHT_TOKENS: &str = r#"  --background: var(--surface-0);
  --foreground: var(--surface-900);
  --muted: var(--surface-100);
  --muted-foreground: var(--surface-600);
  --card: var(--surface-50);
  --card-foreground: var(--surface-800);
  --border: var(--surface-200);
  --accent: var(--primary-100);
  --accent-foreground: var(--primary-900);
  --primary: var(--primary-500);
  --primary-hover: var(--primary-600);
  --primary-foreground: var(--surface-0);
  --ring: var(--primary-400);
"#;

const DARK_TOKENS: &str = r#"  --background: var(--surface-950);
  --foreground: var(--surface-0);
  --muted: var(--surface-900);
  --muted-foreground: var(--surface-400);
  --card: var(--surface-900);
  --card-foreground: var(--surface-100);
  --border: var(--surface-700);
  --accent: var(--primary-900);
  --accent-foreground: var(--primary-100);
  --primary: var(--primary-400);
  --primary-hover: var(--primary-300);
  --primary-foreground: var(--surface-950);
  --ring: var(--primary-500);
"#;
