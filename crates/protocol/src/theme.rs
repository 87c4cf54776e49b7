use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    CategoryWork,
    CategoryInternship,
    CategoryFreelance,

    TrackBackground,
    TrackBorder,

    AxisBackground,
    AxisTick,
    GridLine,

    TextPrimary,
    TextSecondary,
    TextMuted,

    SelectionHighlight,

    Background,
    Surface,
    Border,

    // Drilldown panel
    PanelBackground,
    PanelBorder,
    CurrentBadge,
    SkillChip,
    SkillChipText,
}
