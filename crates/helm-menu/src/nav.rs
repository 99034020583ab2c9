//! Index arithmetic shared by the list screens.

use std::ops::Range;

/// Next index, wrapping to 0 past the end. Returns 0 for an empty list.
pub fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index + 1 >= len { 0 } else { index + 1 }
}

/// Previous index, wrapping to the last item. Returns 0 for an empty list.
pub fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index == 0 || index >= len {
        len - 1
    } else {
        index - 1
    }
}

/// Clamp a selection into a list that may have shrunk since it was made.
pub fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// The slice of a list to show: at most `max` rows, roughly centred on
/// `selected` and pinned to the end of the list.
pub fn visible_window(len: usize, selected: usize, max: usize) -> Range<usize> {
    let max = max.max(1);
    if len <= max {
        return 0..len;
    }
    let selected = clamp(selected, len);
    let start = selected.saturating_sub(max / 2).min(len - max);
    start..start + max
}
