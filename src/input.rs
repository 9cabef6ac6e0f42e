/// Keyboard navigation between narrative sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    First,
    Last,
    ToggleCamera,
}

#[inline]
pub fn nav_key_for(key: &str) -> Option<NavKey> {
    match key {
        "ArrowDown" | "PageDown" | "j" | "J" => Some(NavKey::Next),
        "ArrowUp" | "PageUp" | "k" | "K" => Some(NavKey::Previous),
        "Home" => Some(NavKey::First),
        "End" => Some(NavKey::Last),
        "c" | "C" => Some(NavKey::ToggleCamera),
        _ => None,
    }
}

/// Section to move to from `current`, or `None` when already there or
/// the key does not navigate.
pub fn target_section(current: usize, section_count: usize, key: NavKey) -> Option<usize> {
    if section_count == 0 {
        return None;
    }
    let last = section_count - 1;
    let current = current.min(last);
    let target = match key {
        NavKey::Next => (current + 1).min(last),
        NavKey::Previous => current.saturating_sub(1),
        NavKey::First => 0,
        NavKey::Last => last,
        NavKey::ToggleCamera => return None,
    };
    (target != current).then_some(target)
}

/// Pixel scroll offset that puts the document at `progress`.
#[inline]
pub fn scroll_top_for_progress(progress: f32, max_offset_px: f64) -> f64 {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    (p as f64 * max_offset_px.max(0.0)).round()
}
