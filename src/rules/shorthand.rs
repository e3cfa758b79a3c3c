//! Alignment keyword tables: short author-facing keywords to the CSS
//! values they stand for. Unknown keywords contribute no declaration.

pub(crate) fn align_items(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "stretch" => "stretch",
        "center" => "center",
        "start" => "flex-start",
        "end" => "flex-end",
        "initial" => "initial",
        _ => return None,
    })
}

pub(crate) fn align_content(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "stretch" => "stretch",
        "center" => "center",
        "start" => "flex-start",
        "end" => "flex-end",
        "space-between" => "space-between",
        "space-around" => "space-around",
        "initial" => "initial",
        _ => return None,
    })
}

pub(crate) fn justify_content(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "start" => "flex-start",
        "end" => "flex-end",
        "center" => "center",
        "between" => "space-between",
        "around" => "space-around",
        "evenly" => "space-evenly",
        "stretch" => "stretch",
        _ => return None,
    })
}

pub(crate) fn align_self(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "auto" => "auto",
        "start" => "flex-start",
        "end" => "flex-end",
        "center" => "center",
        "baseline" => "baseline",
        "stretch" => "stretch",
        _ => return None,
    })
}

/// Flex-axis alignment keywords that have a text-align analog.
pub(crate) fn flex_align_to_text_align(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "center" => "center",
        "start" => "left",
        "end" => "right",
        "initial" => "initial",
        _ => return None,
    })
}

/// Text-align keywords mapped back to their flex-axis equivalent.
pub(crate) fn text_align_to_flex_align(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "center" => "center",
        "left" => "flex-start",
        "right" => "flex-end",
        _ => return None,
    })
}
