//! Shared UI icons and emojis.
//!
//! Each icon carries a plain-text fallback for terminals without emoji support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");

// Sidebar / headings
pub static HEN: Emoji<'_, '_> = Emoji("🐔 ", "");
pub static CLIPBOARD: Emoji<'_, '_> = Emoji("📋 ", "");
pub static PLUS: Emoji<'_, '_> = Emoji("➕ ", "+");
pub static HISTORY: Emoji<'_, '_> = Emoji("🕘 ", "");
pub static EGG: Emoji<'_, '_> = Emoji("🥚 ", "");
